//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use cfdash_client::{ClientError, DnsApi, DnsRecord, Domain, RecordForm};
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::services::DomainViewModel;

// ===== MockDnsApi =====

/// In-memory Cloudflare account.
pub struct MockDnsApi {
    domains: RwLock<Vec<Domain>>,
    records: RwLock<HashMap<String, Vec<DnsRecord>>>,
    /// 如果 Some，下一次调用返回此错误
    next_error: RwLock<Option<ClientError>>,
    /// DELETE 返回的 success 标志
    delete_success: RwLock<bool>,
    /// 为 true 时调用永远不会完成（用于测试取消）
    hang: RwLock<bool>,
    /// 下一次调用执行期间取消此 token，调用本身照常完成
    cancel_during: RwLock<Option<CancellationToken>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockDnsApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
            records: RwLock::new(HashMap::new()),
            next_error: RwLock::new(None),
            delete_success: RwLock::new(true),
            hang: RwLock::new(false),
            cancel_during: RwLock::new(None),
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(0),
        }
    }

    pub async fn add_domain(&self, id: &str, name: &str) {
        self.domains.write().await.push(sample_domain(id, name));
        self.records
            .write()
            .await
            .entry(id.to_string())
            .or_default();
    }

    pub async fn add_record(&self, record: DnsRecord) {
        self.records
            .write()
            .await
            .entry(record.zone_id.clone())
            .or_default()
            .push(record);
    }

    pub async fn fail_next(&self, err: ClientError) {
        *self.next_error.write().await = Some(err);
    }

    pub async fn set_delete_success(&self, success: bool) {
        *self.delete_success.write().await = success;
    }

    pub async fn set_hang(&self, hang: bool) {
        *self.hang.write().await = hang;
    }

    pub async fn cancel_during_next_call(&self, token: CancellationToken) {
        *self.cancel_during.write().await = Some(token);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn server_records(&self, domain_id: &str) -> Vec<DnsRecord> {
        self.records
            .read()
            .await
            .get(domain_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Common prologue of every call: count, hang, cancel, injected failure.
    async fn enter(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.hang.read().await {
            std::future::pending::<()>().await;
        }
        if let Some(token) = self.cancel_during.write().await.take() {
            token.cancel();
        }
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> ClientError {
    ClientError::HttpStatus {
        status: 404,
        code: Some(81044),
        raw_message: Some(format!("{what} does not exist.")),
    }
}

fn record_from_form(id: String, domain_id: &str, form: &RecordForm) -> DnsRecord {
    let mut record = sample_record(&id, domain_id, &form.name);
    record.record_type = form.record_type.clone();
    record.content = form.content.clone();
    record.ttl = form.ttl;
    record
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn list_domains(&self) -> Result<Vec<Domain>, ClientError> {
        self.enter().await?;
        Ok(self.domains.read().await.clone())
    }

    async fn list_dns_records(&self, domain_id: &str) -> Result<Vec<DnsRecord>, ClientError> {
        self.enter().await?;
        self.records
            .read()
            .await
            .get(domain_id)
            .cloned()
            .ok_or_else(|| not_found("Zone"))
    }

    async fn create_dns_record(
        &self,
        domain_id: &str,
        form: &RecordForm,
    ) -> Result<DnsRecord, ClientError> {
        self.enter().await?;
        let mut records = self.records.write().await;
        let zone = records.get_mut(domain_id).ok_or_else(|| not_found("Zone"))?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = record_from_form(format!("new-{n}"), domain_id, form);
        zone.push(record.clone());
        Ok(record)
    }

    async fn update_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        form: &RecordForm,
    ) -> Result<DnsRecord, ClientError> {
        self.enter().await?;
        let mut records = self.records.write().await;
        let slot = records
            .get_mut(domain_id)
            .and_then(|zone| zone.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| not_found("Record"))?;
        *slot = record_from_form(record_id.to_string(), domain_id, form);
        Ok(slot.clone())
    }

    async fn delete_dns_record(&self, domain_id: &str, record_id: &str) -> Result<bool, ClientError> {
        self.enter().await?;
        if !*self.delete_success.read().await {
            return Ok(false);
        }
        let mut records = self.records.write().await;
        let zone = records.get_mut(domain_id).ok_or_else(|| not_found("Zone"))?;
        let before = zone.len();
        zone.retain(|r| r.id != record_id);
        if zone.len() == before {
            return Err(not_found("Record"));
        }
        Ok(true)
    }
}

// ===== 工厂方法 =====

pub fn sample_domain(id: &str, name: &str) -> Domain {
    Domain {
        id: id.to_string(),
        name: name.to_string(),
        status: "active".to_string(),
        paused: false,
        zone_type: "full".to_string(),
    }
}

pub fn sample_record(id: &str, zone_id: &str, name: &str) -> DnsRecord {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    DnsRecord {
        id: id.to_string(),
        record_type: "A".into(),
        name: name.to_string(),
        content: "192.0.2.1".to_string(),
        proxiable: true,
        proxied: false,
        ttl: 3600,
        zone_id: zone_id.to_string(),
        zone_name: String::new(),
        created_on: stamp,
        modified_on: stamp,
        locked: Some(false),
    }
}

/// 创建测试用 `DomainViewModel`，连接到新的 `MockDnsApi`
pub fn create_test_view_model() -> (DomainViewModel, Arc<MockDnsApi>) {
    let api = Arc::new(MockDnsApi::new());
    let vm = DomainViewModel::with_api(api.clone());
    (vm, api)
}
