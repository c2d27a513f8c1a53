//! Cloudflare `DnsApi` trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::DnsApi;
use crate::types::{DnsRecord, Domain, RecordForm};

use super::CloudflareClient;
use super::types::RecordBody;

fn zone_path(domain_id: &str) -> String {
    format!("/zones/{}", urlencoding::encode(domain_id))
}

fn records_path(domain_id: &str) -> String {
    format!("{}/dns_records", zone_path(domain_id))
}

fn record_path(domain_id: &str, record_id: &str) -> String {
    format!(
        "{}/{}",
        records_path(domain_id),
        urlencoding::encode(record_id)
    )
}

#[async_trait]
impl DnsApi for CloudflareClient {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.call(Method::GET, "/zones", None).await
    }

    async fn list_dns_records(&self, domain_id: &str) -> Result<Vec<DnsRecord>> {
        self.call(Method::GET, &records_path(domain_id), None).await
    }

    async fn create_dns_record(&self, domain_id: &str, form: &RecordForm) -> Result<DnsRecord> {
        let body = RecordBody::from(form);
        self.call(Method::POST, &records_path(domain_id), Some(&body))
            .await
    }

    async fn update_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        form: &RecordForm,
    ) -> Result<DnsRecord> {
        let body = RecordBody::from(form);
        self.call(Method::PUT, &record_path(domain_id, record_id), Some(&body))
            .await
    }

    async fn delete_dns_record(&self, domain_id: &str, record_id: &str) -> Result<bool> {
        self.call_delete(&record_path(domain_id, record_id)).await
    }
}
