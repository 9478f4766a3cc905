//! In-memory `EsportsApi` used by the synchronizer and pager tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::provider::EsportsApi;
use super::types::*;
use crate::error::{ApiError, ApiResult};

#[derive(Default)]
pub struct FakeApi {
    pub leagues: Mutex<Vec<League>>,
    pub tournaments: Mutex<HashMap<String, Vec<Tournament>>>,
    /// (league id, page token) → page; a missing entry means "no schedule"
    pub schedules: Mutex<HashMap<(String, Option<String>), Schedule>>,
    pub teams: Mutex<Vec<Team>>,
    pub live: Mutex<Vec<LiveEvent>>,
    pub failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn add_page(&self, league_id: &str, token: Option<&str>, page: Schedule) {
        self.schedules
            .lock()
            .unwrap()
            .insert((league_id.to_string(), token.map(str::to_string)), page);
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                endpoint: call,
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "upstream down".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EsportsApi for FakeApi {
    async fn get_leagues(&self) -> ApiResult<Vec<League>> {
        self.record("getLeagues".to_string())?;
        Ok(self.leagues.lock().unwrap().clone())
    }

    async fn get_tournaments_for_league(&self, league_id: &str) -> ApiResult<Vec<Tournament>> {
        self.record(format!("getTournamentsForLeague:{league_id}"))?;
        Ok(self
            .tournaments
            .lock()
            .unwrap()
            .get(league_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_schedule(
        &self,
        league_id: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Option<Schedule>> {
        self.record(format!(
            "getSchedule:{league_id}:{}",
            page_token.unwrap_or("-")
        ))?;
        Ok(self
            .schedules
            .lock()
            .unwrap()
            .get(&(league_id.to_string(), page_token.map(str::to_string)))
            .cloned())
    }

    async fn get_teams(&self) -> ApiResult<Vec<Team>> {
        self.record("getTeams".to_string())?;
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn get_live(&self) -> ApiResult<Vec<LiveEvent>> {
        self.record("getLive".to_string())?;
        Ok(self.live.lock().unwrap().clone())
    }
}

// ── Fixtures ───────────────────────────────────────────────────────────────────

pub fn league(id: &str, name: &str) -> League {
    League {
        id: id.to_string(),
        slug: name.to_lowercase(),
        name: name.to_string(),
        region: "NORTH AMERICA".to_string(),
        image: format!("https://static.lolesports.com/leagues/{id}.png"),
        priority: None,
    }
}

pub fn tournament(id: &str, slug: &str) -> Tournament {
    Tournament {
        id: id.to_string(),
        slug: slug.to_string(),
        league_id: String::new(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 14).unwrap(),
    }
}

pub fn schedule_event(match_id: &str, state: &str) -> ScheduleEvent {
    ScheduleEvent {
        start_time: "2024-01-20T17:00:00Z".parse().unwrap(),
        state: Some(state.to_string()),
        event_type: "match".to_string(),
        block_name: Some("Week 1".to_string()),
        league: EventLeague {
            name: "LCS".to_string(),
            slug: "lcs".to_string(),
        },
        game_match: Some(ScheduleMatch {
            id: match_id.to_string(),
            flags: vec!["hasVod".to_string()],
            teams: vec![],
            strategy: Some(Strategy {
                kind: "bestOf".to_string(),
                count: 1,
            }),
        }),
    }
}

pub fn page(events: Vec<ScheduleEvent>, newer: Option<&str>, older: Option<&str>) -> Schedule {
    Schedule {
        pages: Some(PageCursors {
            newer: newer.map(str::to_string),
            older: older.map(str::to_string),
        }),
        events,
    }
}

pub fn team(id: &str, name: &str) -> Team {
    Team {
        id: id.to_string(),
        name: Some(name.to_string()),
        slug: Some(name.to_lowercase()),
        code: Some(name.chars().take(3).collect::<String>().to_uppercase()),
        image: None,
        alternative_image: None,
        background_image: None,
        status: Some("active".to_string()),
        home_league: Some(HomeLeague {
            name: Some("LCS".to_string()),
            region: Some("NORTH AMERICA".to_string()),
        }),
        players: vec![],
    }
}

pub fn live_event(id: &str, state: &str) -> LiveEvent {
    LiveEvent {
        id: id.to_string(),
        start_time: "2024-01-20T17:00:00Z".parse().unwrap(),
        state: state.to_string(),
        event_type: "match".to_string(),
        block_name: Some("Week 1".to_string()),
        league: LiveLeague {
            id: "98767991299243165".to_string(),
            slug: "lcs".to_string(),
            name: "LCS".to_string(),
            image: "lcs.png".to_string(),
            priority: None,
        },
        tournament: Some(TournamentRef {
            id: "110733838935136200".to_string(),
        }),
        game_match: None,
        streams: vec![],
    }
}
