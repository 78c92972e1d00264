//! Event intake for the admin console.
//!
//! Option fetches run as spawned tasks and report back here; the loop owning
//! the controllers applies them one at a time.

use std::sync::Arc;

use client_core::{
    CustomerDirectory, DependentFetch, DirectoryError, FetchOutcome, RegistrationForm,
};
use shared::domain::OptionRef;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AdminEvent {
    OptionsFetched {
        fetch: DependentFetch,
        result: Result<Vec<OptionRef>, DirectoryError>,
    },
}

pub struct FetchQueue {
    api: Arc<dyn CustomerDirectory>,
    tx: mpsc::UnboundedSender<AdminEvent>,
    rx: mpsc::UnboundedReceiver<AdminEvent>,
    in_flight: usize,
}

impl FetchQueue {
    pub fn new(api: Arc<dyn CustomerDirectory>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Starts `fetch` without waiting for it.
    pub fn spawn(&mut self, fetch: DependentFetch) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::debug!(kind = ?fetch.kind, parent = %fetch.parent, "spawned option fetch");
        tokio::spawn(async move {
            let (fetch, result) = fetch.run(api.as_ref()).await;
            let _ = tx.send(AdminEvent::OptionsFetched { fetch, result });
        });
    }

    /// Applies every outstanding fetch to `form` in arrival order.
    pub async fn drain_into(&mut self, form: &mut RegistrationForm) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::with_capacity(self.in_flight);
        while self.in_flight > 0 {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            match event {
                AdminEvent::OptionsFetched { fetch, result } => {
                    outcomes.push(form.apply_dependent_options(&fetch, result));
                }
            }
        }
        outcomes
    }
}
