//! Domain view-model: one API call, one state change

use std::future::Future;
use std::sync::Arc;

use cfdash_client::{ClientError, DnsApi, DnsRecord, RecordForm};
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;

use crate::error::{CoreError, CoreResult};
use crate::store::{Action, DashboardState, Store};

/// Drives the dashboard screens.
///
/// Each operation performs exactly one API call and, when it succeeds and the
/// caller has not cancelled, dispatches exactly one [`Action`]. Failures leave
/// the state untouched. Operations are not serialized against each other: the
/// last one to complete wins.
pub struct DomainViewModel {
    api: RwLock<Option<Arc<dyn DnsApi>>>,
    store: Store,
}

impl DomainViewModel {
    /// View-model without a client. Operations fail with
    /// [`CoreError::MissingCredentials`] until [`set_api`](Self::set_api).
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: RwLock::new(None),
            store: Store::new(),
        }
    }

    #[must_use]
    pub fn with_api(api: Arc<dyn DnsApi>) -> Self {
        Self {
            api: RwLock::new(Some(api)),
            store: Store::new(),
        }
    }

    /// Use `api` for subsequent calls. In-flight calls keep their client.
    pub async fn set_api(&self, api: Arc<dyn DnsApi>) {
        *self.api.write().await = Some(api);
    }

    pub async fn has_api(&self) -> bool {
        self.api.read().await.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.store.snapshot()
    }

    /// Forget all loaded zones and records.
    pub fn reset(&self) {
        self.store.dispatch(Action::Reset);
    }

    /// 获取域名列表
    pub async fn fetch_domains(&self, cancel: &CancellationToken) -> CoreResult<()> {
        let api = self.api().await?;
        let domains = settle("fetch_domains", cancel, api.list_domains()).await?;

        log::info!("Loaded {} domains", domains.len());
        self.store.dispatch(Action::DomainsLoaded(domains));
        Ok(())
    }

    /// 获取 DNS 记录列表，并将该域名设为当前域名
    pub async fn fetch_dns_records(
        &self,
        domain_id: &str,
        cancel: &CancellationToken,
    ) -> CoreResult<()> {
        require_id("domain_id", domain_id)?;
        let api = self.api().await?;
        let records = settle("fetch_dns_records", cancel, api.list_dns_records(domain_id)).await?;

        log::info!("Loaded {} records for domain {domain_id}", records.len());
        self.store.dispatch(Action::RecordsLoaded {
            domain_id: domain_id.to_string(),
            records,
        });
        Ok(())
    }

    /// 创建 DNS 记录，成功后追加到列表末尾
    pub async fn add_dns_record(
        &self,
        domain_id: &str,
        form: &RecordForm,
        cancel: &CancellationToken,
    ) -> CoreResult<DnsRecord> {
        require_id("domain_id", domain_id)?;
        check_form(form.validate_new())?;
        let api = self.api().await?;
        let record = settle(
            "add_dns_record",
            cancel,
            api.create_dns_record(domain_id, form),
        )
        .await?;

        log::info!("Created {} record {} ({})", record.record_type, record.name, record.id);
        self.store.dispatch(Action::RecordAdded {
            domain_id: domain_id.to_string(),
            record: record.clone(),
        });
        Ok(record)
    }

    /// 更新 DNS 记录，成功后按 id 原位替换
    ///
    /// The TTL is not range-checked: a form pre-filled from the record keeps
    /// whatever the server holds.
    pub async fn update_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        form: &RecordForm,
        cancel: &CancellationToken,
    ) -> CoreResult<DnsRecord> {
        require_id("domain_id", domain_id)?;
        require_id("record_id", record_id)?;
        check_form(form.validate())?;
        let api = self.api().await?;
        let record = settle(
            "update_dns_record",
            cancel,
            api.update_dns_record(domain_id, record_id, form),
        )
        .await?;

        log::info!("Updated record {}", record.id);
        self.store.dispatch(Action::RecordUpdated {
            domain_id: domain_id.to_string(),
            record: record.clone(),
        });
        Ok(record)
    }

    /// 删除 DNS 记录
    ///
    /// The record leaves the local list only when the server confirmed with
    /// `success: true`; `Ok(false)` means the server declined.
    pub async fn delete_dns_record(
        &self,
        domain_id: &str,
        record_id: &str,
        cancel: &CancellationToken,
    ) -> CoreResult<bool> {
        require_id("domain_id", domain_id)?;
        require_id("record_id", record_id)?;
        let api = self.api().await?;
        let deleted = settle(
            "delete_dns_record",
            cancel,
            api.delete_dns_record(domain_id, record_id),
        )
        .await?;

        if deleted {
            log::info!("Deleted record {record_id}");
            self.store.dispatch(Action::RecordDeleted {
                domain_id: domain_id.to_string(),
                record_id: record_id.to_string(),
            });
        } else {
            log::warn!("Server did not confirm deletion of record {record_id}");
        }
        Ok(deleted)
    }

    async fn api(&self) -> CoreResult<Arc<dyn DnsApi>> {
        let api = self.api.read().await.clone();
        api.ok_or_else(|| {
            log::warn!("No Cloudflare credentials configured");
            CoreError::MissingCredentials
        })
    }
}

impl Default for DomainViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Await `call` unless `cancel` fires first, then classify and log the outcome.
async fn settle<T>(
    op: &'static str,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ClientError>>,
) -> CoreResult<T> {
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            log::debug!("{op} cancelled before completion");
            return Err(CoreError::Cancelled);
        }
        result = call => result,
    };

    match result {
        Ok(_) if cancel.is_cancelled() => {
            log::debug!("{op} completed after cancellation, result discarded");
            Err(CoreError::Cancelled)
        }
        Ok(value) => Ok(value),
        Err(e) => {
            let err = CoreError::from(e);
            if err.is_expected() {
                log::warn!("{op} failed: {err}");
            } else {
                log::error!("{op} failed: {err}");
            }
            Err(err)
        }
    }
}

fn require_id(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field}: must not be empty")));
    }
    Ok(())
}

fn check_form(checked: Result<(), (&'static str, String)>) -> CoreResult<()> {
    checked.map_err(|(field, reason)| {
        let err = CoreError::Validation(format!("{field}: {reason}"));
        log::warn!("Rejected record form: {err}");
        err
    })
}
