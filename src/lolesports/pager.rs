//! Cursor walker for `getSchedule`.
//!
//! A schedule page may point to a `newer` and an `older` page. Starting from an
//! anchor page the caller already holds, the pager chases the `newer` chain to
//! its end, then the `older` chain, one request at a time with a fixed pause
//! between requests to stay under the upstream rate limit.
//!
//! ```text
//!   older ◀── … ◀── older ◀── [anchor] ──▶ newer ──▶ … ──▶ newer
//!                                │
//!          result order:         └─ newer pages…, then older pages…
//! ```

use std::time::Duration;
use tracing::{debug, warn};

use super::provider::EsportsApi;
use super::types::Schedule;
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Newer,
    Older,
}

impl Direction {
    fn cursor(self, page: &Schedule) -> Option<&str> {
        match self {
            Direction::Newer => page.newer(),
            Direction::Older => page.older(),
        }
    }
}

pub struct SchedulePager<'a> {
    api: &'a dyn EsportsApi,
    delay: Duration,
    /// Upper bound on follow-up pages per direction
    max_pages: usize,
}

impl<'a> SchedulePager<'a> {
    pub fn new(api: &'a dyn EsportsApi, delay: Duration, max_pages: usize) -> Self {
        SchedulePager {
            api,
            delay,
            max_pages,
        }
    }

    /// Collect every page reachable from `anchor`, excluding the anchor itself.
    ///
    /// Returns `Ok(None)` when there is no anchor to start from.
    pub async fn walk(
        &self,
        league_id: &str,
        anchor: Option<&Schedule>,
    ) -> ApiResult<Option<Vec<Schedule>>> {
        let Some(anchor) = anchor else {
            return Ok(None);
        };

        let mut pages = Vec::new();
        for direction in [Direction::Newer, Direction::Older] {
            if let Some(cursor) = direction.cursor(anchor) {
                self.follow(league_id, direction, cursor, &mut pages).await?;
            }
        }

        debug!("League {}: {} extra schedule page(s)", league_id, pages.len());
        Ok(Some(pages))
    }

    async fn follow(
        &self,
        league_id: &str,
        direction: Direction,
        start: &str,
        pages: &mut Vec<Schedule>,
    ) -> ApiResult<()> {
        let mut cursor = Some(start.to_string());
        let mut visited = 0;

        while let Some(token) = cursor.take() {
            if visited == self.max_pages {
                warn!(
                    "League {}: stopped {:?} pagination after {} pages",
                    league_id, direction, visited
                );
                break;
            }

            tokio::time::sleep(self.delay).await;
            let Some(page) = self.api.get_schedule(league_id, Some(&token)).await? else {
                warn!(
                    "League {}: {:?} page {} carried no schedule",
                    league_id, direction, token
                );
                break;
            };

            cursor = direction.cursor(&page).map(str::to_string);
            pages.push(page);
            visited += 1;
        }

        Ok(())
    }
}
