use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DnsRecord, Domain, RecordForm};

/// Zone and DNS record operations used by the dashboard.
///
/// [`CloudflareClient`](crate::CloudflareClient) is the production
/// implementation; the view-model only sees this trait so tests and
/// alternative backends can stand in for it.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// 获取域名列表
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// 获取 DNS 记录列表
    async fn list_dns_records(&self, domain_id: &str) -> Result<Vec<DnsRecord>>;

    /// 创建 DNS 记录
    async fn create_dns_record(&self, domain_id: &str, form: &RecordForm) -> Result<DnsRecord>;

    /// 更新 DNS 记录
    async fn update_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        form: &RecordForm,
    ) -> Result<DnsRecord>;

    /// 删除 DNS 记录
    ///
    /// Returns the `success` flag of the server's confirmation envelope.
    async fn delete_dns_record(&self, domain_id: &str, record_id: &str) -> Result<bool>;
}
