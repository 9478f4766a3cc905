use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::ResourceFetcher;
use crate::lolesports::types::LiveEvent;
use crate::lolesports::EsportsApi;

/// Events currently being broadcast.
pub struct LiveFetcher {
    api: Arc<dyn EsportsApi>,
}

impl LiveFetcher {
    pub fn new(api: Arc<dyn EsportsApi>) -> Self {
        LiveFetcher { api }
    }
}

#[async_trait]
impl ResourceFetcher for LiveFetcher {
    type Doc = LiveEvent;
    const RESOURCE: &'static str = "live";

    async fn fetch(&self) -> Result<Vec<LiveEvent>> {
        Ok(self.api.get_live().await?)
    }
}
