use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use super::provider::EsportsApi;
use super::types::*;
use crate::error::{ApiError, ApiResult};

/// Client for the LoL Esports `persisted/gw` API.
#[derive(Clone)]
pub struct EsportsClient {
    http: Client,
    base_url: Url,
    api_key: String,
    locale: String,
}

impl EsportsClient {
    pub fn new(base_url: &str, api_key: &str, locale: &str, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: "client builder".to_string(),
                source,
            })?;
        // Url::join drops the last segment unless the base ends with a slash
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(EsportsClient {
            http,
            base_url: Url::parse(&base)?,
            api_key: api_key.to_string(),
            locale: locale.to_string(),
        })
    }

    /// GET `endpoint` with the API key header, the `hl` locale and `params`.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> ApiResult<T> {
        let url = self.base_url.join(endpoint)?;
        let mut query: Vec<(&str, &str)> = vec![("hl", self.locale.as_str())];
        query.extend_from_slice(params);

        debug!("GET {} {:?}", url, query);

        let resp = self
            .http
            .get(url)
            .header("x-api-key", &self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("{} responded {}: {}", endpoint, status, body);
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl EsportsApi for EsportsClient {
    async fn get_leagues(&self) -> ApiResult<Vec<League>> {
        let resp: LeaguesResponse = self.get("getLeagues", &[]).await?;
        Ok(resp.data.leagues)
    }

    async fn get_tournaments_for_league(&self, league_id: &str) -> ApiResult<Vec<Tournament>> {
        let resp: TournamentsResponse = self
            .get("getTournamentsForLeague", &[("leagueId", league_id)])
            .await?;
        Ok(resp
            .data
            .leagues
            .into_iter()
            .flat_map(|l| l.tournaments)
            .collect())
    }

    async fn get_schedule(
        &self,
        league_id: &str,
        page_token: Option<&str>,
    ) -> ApiResult<Option<Schedule>> {
        let mut params = vec![("leagueId", league_id)];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let resp: ScheduleResponse = self.get("getSchedule", &params).await?;
        Ok(resp.data.schedule)
    }

    async fn get_teams(&self) -> ApiResult<Vec<Team>> {
        let resp: TeamsResponse = self.get("getTeams", &[]).await?;
        Ok(resp.data.teams)
    }

    async fn get_live(&self) -> ApiResult<Vec<LiveEvent>> {
        let resp: LiveResponse = self.get("getLive", &[]).await?;
        Ok(resp.data.schedule.events)
    }
}
