use async_trait::async_trait;

use super::types::{League, LiveEvent, Schedule, Team, Tournament};
use crate::error::ApiResult;

/// Read-only view of the LoL Esports API that the synchronizers depend on.
#[async_trait]
pub trait EsportsApi: Send + Sync {
    async fn get_leagues(&self) -> ApiResult<Vec<League>>;

    /// Tournaments as returned upstream; `league_id` is left empty.
    async fn get_tournaments_for_league(&self, league_id: &str) -> ApiResult<Vec<Tournament>>;

    /// One schedule page. `None` when the payload carries no schedule at all.
    async fn get_schedule(
        &self,
        league_id: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Option<Schedule>>;

    async fn get_teams(&self) -> ApiResult<Vec<Team>>;

    async fn get_live(&self) -> ApiResult<Vec<LiveEvent>>;
}
