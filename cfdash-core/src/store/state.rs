//! Dashboard state and the reducer that applies actions to it

use cfdash_client::{DnsRecord, Domain};
use serde::Serialize;

/// Everything the dashboard screens render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    /// Zones of the account, in server order
    pub domains: Vec<Domain>,
    /// Zone whose records are currently loaded
    pub active_domain: Option<String>,
    /// Records of `active_domain`
    pub records: Vec<DnsRecord>,
}

impl DashboardState {
    fn is_active(&self, domain_id: &str) -> bool {
        self.active_domain.as_deref() == Some(domain_id)
    }
}

/// A state change produced by one completed API call.
#[derive(Debug, Clone)]
pub enum Action {
    DomainsLoaded(Vec<Domain>),
    RecordsLoaded {
        domain_id: String,
        records: Vec<DnsRecord>,
    },
    RecordAdded {
        domain_id: String,
        record: DnsRecord,
    },
    RecordUpdated {
        domain_id: String,
        record: DnsRecord,
    },
    RecordDeleted {
        domain_id: String,
        record_id: String,
    },
    Reset,
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DomainsLoaded(_) => "DomainsLoaded",
            Self::RecordsLoaded { .. } => "RecordsLoaded",
            Self::RecordAdded { .. } => "RecordAdded",
            Self::RecordUpdated { .. } => "RecordUpdated",
            Self::RecordDeleted { .. } => "RecordDeleted",
            Self::Reset => "Reset",
        }
    }
}

/// Apply `action` to `state`. Returns whether the state changed.
///
/// Record actions for a zone other than the active one are ignored.
pub fn reduce(state: &mut DashboardState, action: Action) -> bool {
    match action {
        Action::DomainsLoaded(domains) => {
            state.domains = domains;
            true
        }
        Action::RecordsLoaded { domain_id, records } => {
            state.active_domain = Some(domain_id);
            state.records = records;
            true
        }
        Action::RecordAdded { domain_id, record } => {
            if !state.is_active(&domain_id) {
                return false;
            }
            state.records.push(record);
            true
        }
        Action::RecordUpdated { domain_id, record } => {
            if !state.is_active(&domain_id) {
                return false;
            }
            match state.records.iter_mut().find(|r| r.id == record.id) {
                Some(slot) => {
                    *slot = record;
                    true
                }
                None => false,
            }
        }
        Action::RecordDeleted {
            domain_id,
            record_id,
        } => {
            if !state.is_active(&domain_id) {
                return false;
            }
            let before = state.records.len();
            state.records.retain(|r| r.id != record_id);
            state.records.len() != before
        }
        Action::Reset => {
            let changed = *state != DashboardState::default();
            *state = DashboardState::default();
            changed
        }
    }
}
