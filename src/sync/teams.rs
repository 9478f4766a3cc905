use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::ResourceFetcher;
use crate::lolesports::types::Team;
use crate::lolesports::EsportsApi;

pub struct TeamFetcher {
    api: Arc<dyn EsportsApi>,
}

impl TeamFetcher {
    pub fn new(api: Arc<dyn EsportsApi>) -> Self {
        TeamFetcher { api }
    }
}

#[async_trait]
impl ResourceFetcher for TeamFetcher {
    type Doc = Team;
    const RESOURCE: &'static str = "teams";

    async fn fetch(&self) -> Result<Vec<Team>> {
        Ok(self.api.get_teams().await?)
    }
}
