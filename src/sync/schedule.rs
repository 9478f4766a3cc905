use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::ResourceFetcher;
use crate::db::Database;
use crate::lolesports::types::{League, ScheduleEvent};
use crate::lolesports::{EsportsApi, SchedulePager};

/// Full schedule (current, upcoming and past pages) of every stored league.
pub struct ScheduleFetcher {
    api: Arc<dyn EsportsApi>,
    db: Database,
    page_delay: Duration,
    max_pages: usize,
}

impl ScheduleFetcher {
    pub fn new(api: Arc<dyn EsportsApi>, db: Database, page_delay: Duration, max_pages: usize) -> Self {
        ScheduleFetcher {
            api,
            db,
            page_delay,
            max_pages,
        }
    }
}

#[async_trait]
impl ResourceFetcher for ScheduleFetcher {
    type Doc = ScheduleEvent;
    const RESOURCE: &'static str = "schedule";

    async fn fetch(&self) -> Result<Vec<ScheduleEvent>> {
        let leagues = self.db.find_all::<League>()?;
        if leagues.is_empty() {
            warn!("No leagues found, nothing to request schedules for");
            return Ok(vec![]);
        }

        let pager = SchedulePager::new(self.api.as_ref(), self.page_delay, self.max_pages);
        let mut events = Vec::new();

        for league in leagues {
            let league_id = &league.document.id;
            let anchor = self.api.get_schedule(league_id, None).await?;
            let Some(pages) = pager.walk(league_id, anchor.as_ref()).await? else {
                warn!("No schedule found for league {}, skipping", league_id);
                continue;
            };

            // the pager never returns the anchor page itself
            let anchor = anchor.unwrap_or_default();
            let before = events.len();
            events.extend(anchor.events);
            for page in pages {
                events.extend(page.events);
            }
            debug!("League {}: {} schedule event(s)", league_id, events.len() - before);
        }

        Ok(events)
    }
}
