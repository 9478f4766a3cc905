use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::ResourceFetcher;
use crate::lolesports::types::League;
use crate::lolesports::EsportsApi;

pub struct LeagueFetcher {
    api: Arc<dyn EsportsApi>,
}

impl LeagueFetcher {
    pub fn new(api: Arc<dyn EsportsApi>) -> Self {
        LeagueFetcher { api }
    }
}

#[async_trait]
impl ResourceFetcher for LeagueFetcher {
    type Doc = League;
    const RESOURCE: &'static str = "leagues";

    async fn fetch(&self) -> Result<Vec<League>> {
        Ok(self.api.get_leagues().await?)
    }
}
