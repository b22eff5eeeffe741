//! Panels: each owns its operations outright and is the only writer to them.
//!
//! Everything here runs on one thread. Panels are `!Send`; independent
//! operations can be in flight at once by joining their futures.

mod dispatch;

pub mod admin;
pub mod search;
pub mod vqa;

use std::cell::Cell;
use std::rc::Rc;

use mmsearch_client::VisionClient;
use mmsearch_core::traits::Transport;
use mmsearch_core::types::HealthStatus;

pub use admin::AdminPanel;
pub use search::SearchPanel;
pub use vqa::VqaPanel;

/// The three panels plus the header's health indicator.
pub struct Console<T> {
    pub search: SearchPanel<T>,
    pub vqa: VqaPanel<T>,
    pub admin: AdminPanel<T>,
    health: Rc<Cell<HealthStatus>>,
}

impl<T: Transport> Console<T> {
    pub fn new(client: VisionClient<T>) -> Self {
        let client = Rc::new(client);
        let health = Rc::new(Cell::new(HealthStatus::Checking));
        let sink = Rc::clone(&health);
        Self {
            search: SearchPanel::new(Rc::clone(&client)),
            vqa: VqaPanel::new(Rc::clone(&client)),
            admin: AdminPanel::new(client, move |status| sink.set(status)),
            health,
        }
    }

    pub fn health(&self) -> HealthStatus { self.health.get() }

    /// Initial health check, stats and metrics, all in flight together.
    pub async fn startup(&self) {
        let (_, _, _) = futures::join!(self.admin.check_health(), self.admin.refresh_stats(), self.admin.load_metrics());
    }
}
