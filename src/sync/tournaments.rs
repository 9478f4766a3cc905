use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::ResourceFetcher;
use crate::db::Database;
use crate::lolesports::types::{League, Tournament};
use crate::lolesports::EsportsApi;

/// Tournaments for every league currently in the store.
pub struct TournamentFetcher {
    api: Arc<dyn EsportsApi>,
    db: Database,
}

impl TournamentFetcher {
    pub fn new(api: Arc<dyn EsportsApi>, db: Database) -> Self {
        TournamentFetcher { api, db }
    }
}

#[async_trait]
impl ResourceFetcher for TournamentFetcher {
    type Doc = Tournament;
    const RESOURCE: &'static str = "tournaments";

    async fn fetch(&self) -> Result<Vec<Tournament>> {
        let leagues = self.db.find_all::<League>()?;
        if leagues.is_empty() {
            warn!("No leagues found, nothing to request tournaments for");
            return Ok(vec![]);
        }

        let mut tournaments = Vec::new();
        for league in leagues {
            let league_id = league.document.id;
            let mut batch = self.api.get_tournaments_for_league(&league_id).await?;
            debug!("League {}: {} tournament(s)", league_id, batch.len());
            // upstream does not repeat the league on each tournament
            for t in &mut batch {
                t.league_id = league_id.clone();
            }
            tournaments.extend(batch);
        }
        Ok(tournaments)
    }
}
