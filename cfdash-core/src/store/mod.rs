//! Observable state container

mod state;

pub use state::{Action, DashboardState, reduce};

use tokio::sync::watch;

/// Holds the current [`DashboardState`] and notifies subscribers on change.
///
/// Subscribers only wake when an action actually modified the state.
pub struct Store {
    tx: watch::Sender<DashboardState>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(DashboardState::default());
        Self { tx }
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.tx.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.tx.borrow().clone()
    }

    /// Apply one action and publish the result.
    pub fn dispatch(&self, action: Action) -> bool {
        let name = action.name();
        let changed = self.tx.send_if_modified(|state| reduce(state, action));
        log::debug!("dispatch {name}: changed={changed}");
        changed
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
