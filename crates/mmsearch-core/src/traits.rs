use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{RawResponse, TransportRequest};

/// Issues exactly one HTTP exchange. No retries, no timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, TransportError>;
}
