//! Wire types for the LoL Esports `persisted/gw` endpoints.
//!
//! Field names follow the upstream camelCase JSON. The same structs are what
//! gets persisted, so a stored document is exactly the last payload seen.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Leagues ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub region: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LeaguesResponse {
    pub data: LeaguesData,
}

#[derive(Debug, Deserialize)]
pub struct LeaguesData {
    #[serde(default)]
    pub leagues: Vec<League>,
}

// ── Tournaments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub slug: String,
    /// Not part of the upstream payload; stamped from the league the
    /// tournaments were requested for.
    #[serde(default)]
    pub league_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TournamentsResponse {
    pub data: TournamentsData,
}

#[derive(Debug, Deserialize)]
pub struct TournamentsData {
    #[serde(default)]
    pub leagues: Vec<LeagueTournaments>,
}

#[derive(Debug, Deserialize)]
pub struct LeagueTournaments {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

// ── Schedule ─────────────────────────────────────────────────────────────────

/// Opaque pagination tokens attached to a schedule page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageCursors {
    #[serde(default)]
    pub older: Option<String>,
    #[serde(default)]
    pub newer: Option<String>,
}

/// One page of a league schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, alias = "page")]
    pub pages: Option<PageCursors>,
    #[serde(default)]
    pub events: Vec<ScheduleEvent>,
}

impl Schedule {
    pub fn newer(&self) -> Option<&str> {
        self.pages.as_ref().and_then(|p| p.newer.as_deref())
    }

    pub fn older(&self) -> Option<&str> {
        self.pages.as_ref().and_then(|p| p.older.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    pub data: ScheduleData,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub start_time: DateTime<Utc>,
    /// Upstream sends `null` for some blocks
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub block_name: Option<String>,
    pub league: EventLeague,
    /// Absent for non-match blocks such as shows
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub game_match: Option<ScheduleMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLeague {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMatch {
    pub id: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub teams: Vec<MatchTeam>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTeam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub code: String,
    pub image: String,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub record: Option<TeamRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub outcome: Option<String>,
    pub game_wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
}

// ── Teams ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub code: Option<String>,
    pub image: Option<String>,
    pub alternative_image: Option<String>,
    pub background_image: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub home_league: Option<HomeLeague>,
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeLeague {
    pub name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub summoner_name: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct TeamsResponse {
    pub data: TeamsData,
}

#[derive(Debug, Deserialize)]
pub struct TeamsData {
    #[serde(default)]
    pub teams: Vec<Team>,
}

// ── Live ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEvent {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub state: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub block_name: Option<String>,
    pub league: LiveLeague,
    #[serde(default)]
    pub tournament: Option<TournamentRef>,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub game_match: Option<LiveMatch>,
    #[serde(default, rename = "stream")]
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveLeague {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveMatch {
    pub id: String,
    #[serde(default)]
    pub teams: Vec<MatchTeam>,
    #[serde(default)]
    pub strategy: Option<Strategy>,
    #[serde(default)]
    pub games: Vec<LiveGame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveGame {
    pub id: String,
    pub number: u32,
    pub state: String,
    #[serde(default)]
    pub teams: Vec<GameSide>,
    #[serde(default)]
    pub vods: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSide {
    pub id: String,
    pub side: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub parameter: String,
    pub locale: String,
    #[serde(default)]
    pub media_locale: Option<serde_json::Value>,
    pub provider: String,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub stats_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LiveResponse {
    pub data: LiveData,
}

#[derive(Debug, Deserialize)]
pub struct LiveData {
    pub schedule: LiveSchedule,
}

#[derive(Debug, Deserialize)]
pub struct LiveSchedule {
    #[serde(default)]
    pub events: Vec<LiveEvent>,
}
