//! Backend facade: builder → transport → normalizer, one method per action.

pub mod transport;

use tracing::{debug, info};

use mmsearch_core::builders;
use mmsearch_core::config::ClientConfig;
use mmsearch_core::error::Result;
use mmsearch_core::normalize;
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{
    AnswerKind, AnswerText, BinaryPayload, HealthStatus, IndexAck, IndexStats, MetricsText, ResultItem, SearchRequest,
};

pub use transport::HttpTransport;

pub struct VisionClient<T = HttpTransport> {
    transport: T,
}

impl VisionClient<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        info!(backend = %config.backend_url, "using backend");
        Ok(Self::new(HttpTransport::from_config(config)?))
    }
}

impl<T: Transport> VisionClient<T> {
    pub fn new(transport: T) -> Self { Self { transport } }

    pub fn transport(&self) -> &T { &self.transport }

    pub async fn search(&self, req: &SearchRequest) -> Result<Vec<ResultItem>> {
        let request = builders::search(req)?;
        let resp = self.transport.send(request).await?;
        let items = normalize::search_results(&resp)?;
        debug!(mode = ?req.mode, k = req.top_k, hits = items.len(), "search normalized");
        Ok(items)
    }

    pub async fn ask(&self, image: Option<&BinaryPayload>, question: &str) -> Result<AnswerText> {
        let resp = self.transport.send(builders::vqa_question(image, question)?).await?;
        normalize::answer(&resp, AnswerKind::Question)
    }

    pub async fn describe(&self, image: Option<&BinaryPayload>) -> Result<AnswerText> {
        let resp = self.transport.send(builders::vqa_describe(image)?).await?;
        normalize::answer(&resp, AnswerKind::Describe)
    }

    pub async fn build_index(&self, image_dir: Option<&str>, train_index: bool) -> Result<IndexAck> {
        let resp = self.transport.send(builders::index_build(image_dir, train_index)).await?;
        Ok(normalize::index_ack(&resp))
    }

    pub async fn add_images(&self, images: &[BinaryPayload]) -> Result<IndexAck> {
        let resp = self.transport.send(builders::index_add(images)?).await?;
        Ok(normalize::index_ack(&resp))
    }

    pub async fn stats(&self) -> Result<IndexStats> {
        let resp = self.transport.send(builders::index_stats()).await?;
        normalize::index_stats(&resp)
    }

    pub async fn metrics(&self) -> Result<MetricsText> {
        let resp = self.transport.send(builders::metrics()).await?;
        Ok(normalize::metrics(&resp))
    }

    /// Any 2xx is healthy; every failure, network or HTTP, is unhealthy.
    pub async fn health(&self) -> HealthStatus {
        match self.transport.send(builders::health()).await {
            Ok(_) => HealthStatus::Healthy,
            Err(err) => {
                debug!(code = err.code(), error = %err, "health check failed");
                HealthStatus::Unhealthy
            }
        }
    }
}
