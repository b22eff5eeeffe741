//! Index management plus the monitoring reads (stats, metrics, health).

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::info;

use mmsearch_client::VisionClient;
use mmsearch_core::state::{Operation, OperationState};
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{BinaryPayload, HealthStatus, IndexAck, IndexStats, MetricsText};

use crate::dispatch::{drive, view};

pub type HealthSink = Box<dyn Fn(HealthStatus)>;

pub struct AdminPanel<T> {
    client: Rc<VisionClient<T>>,
    build: RefCell<Operation<IndexAck>>,
    add: RefCell<Operation<IndexAck>>,
    stats: RefCell<Operation<IndexStats>>,
    last_stats: RefCell<Option<IndexStats>>,
    metrics: RefCell<Operation<MetricsText>>,
    on_health: HealthSink,
}

impl<T: Transport> AdminPanel<T> {
    /// `on_health` receives every health check result; it is how the panel
    /// reports to whoever displays backend status.
    pub fn new(client: Rc<VisionClient<T>>, on_health: impl Fn(HealthStatus) + 'static) -> Self {
        Self {
            client,
            build: RefCell::new(Operation::new("index.build")),
            add: RefCell::new(Operation::new("index.add")),
            stats: RefCell::new(Operation::new("index.stats")),
            last_stats: RefCell::new(None),
            metrics: RefCell::new(Operation::new("metrics")),
            on_health: Box::new(on_health),
        }
    }

    pub async fn build_index(&self, image_dir: Option<&str>, train_index: bool) -> bool {
        let applied = drive(&self.build, self.client.build_index(image_dir, train_index)).await;
        if applied && self.build.borrow().state().value().is_some() {
            info!(image_dir = image_dir.unwrap_or("<server default>"), train_index, "index build accepted");
        }
        applied
    }

    pub async fn add_images(&self, images: &[BinaryPayload]) -> bool {
        let applied = drive(&self.add, self.client.add_images(images)).await;
        if applied && self.add.borrow().state().value().is_some() {
            info!(count = images.len(), "images added to index");
        }
        applied
    }

    /// A failed refresh leaves the previously fetched stats in place.
    pub async fn refresh_stats(&self) -> bool {
        let applied = drive(&self.stats, self.client.stats()).await;
        if applied {
            if let Some(stats) = self.stats.borrow().state().value() {
                *self.last_stats.borrow_mut() = Some(stats.clone());
            }
        }
        applied
    }

    pub async fn load_metrics(&self) -> bool { drive(&self.metrics, self.client.metrics()).await }

    pub async fn check_health(&self) -> HealthStatus {
        let status = self.client.health().await;
        (self.on_health)(status);
        status
    }

    pub fn build_state(&self) -> Ref<'_, OperationState<IndexAck>> { view(&self.build) }

    pub fn add_state(&self) -> Ref<'_, OperationState<IndexAck>> { view(&self.add) }

    pub fn stats_state(&self) -> Ref<'_, OperationState<IndexStats>> { view(&self.stats) }

    /// Last successfully fetched stats, if any.
    pub fn stats(&self) -> Option<IndexStats> { self.last_stats.borrow().clone() }

    /// Metrics from the latest load; cleared when that load failed.
    pub fn metrics(&self) -> Option<MetricsText> { self.metrics.borrow().state().value().cloned() }

    pub fn metrics_state(&self) -> Ref<'_, OperationState<MetricsText>> { view(&self.metrics) }
}
