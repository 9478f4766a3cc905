use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

const HOUR: u64 = 60 * 60;
const MINUTE: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
    Test,
    Provision,
}

/// LoL Esports data synchronizer
#[derive(Parser, Debug, Clone)]
#[command(name = "esports-sync", version, about)]
pub struct Config {
    /// Runtime environment
    #[arg(long, env = "APP_ENV", value_enum)]
    pub environment: Environment,

    /// Read API listen host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Read API listen port
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// SQLite database path
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// LoL Esports API key, sent as `x-api-key`
    #[arg(long, env = "LOL_ESPORTS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// LoL Esports API base URL
    #[arg(
        long,
        env = "LOL_ESPORTS_API_URL",
        default_value = "https://esports-api.lolesports.com/persisted/gw"
    )]
    pub api_url: String,

    /// Locale sent as the `hl` query parameter
    #[arg(long, env = "LOL_ESPORTS_API_HL", default_value = "en-US")]
    pub locale: String,

    /// League polling interval in hours
    #[arg(long, env = "LEAGUES_FREQUENCY", default_value = "24")]
    pub leagues_frequency: u64,

    /// Tournament polling interval in hours
    #[arg(long, env = "TOURNAMENTS_FREQUENCY", default_value = "24")]
    pub tournaments_frequency: u64,

    /// Team polling interval in hours
    #[arg(long, env = "TEAMS_FREQUENCY", default_value = "24")]
    pub teams_frequency: u64,

    /// Schedule polling interval in minutes
    #[arg(long, env = "SCHEDULE_FREQUENCY", default_value = "60")]
    pub schedule_frequency: u64,

    /// Live events polling interval in minutes
    #[arg(long, env = "LIVE_FREQUENCY", default_value = "2")]
    pub live_frequency: u64,

    /// Pause between two schedule page requests, in milliseconds
    #[arg(long, env = "SCHEDULE_PAGE_DELAY_MS", default_value = "3000")]
    pub schedule_page_delay_ms: u64,

    /// Maximum schedule pages followed per direction and league
    #[arg(long, env = "SCHEDULE_MAX_PAGES", default_value = "50")]
    pub schedule_max_pages: usize,

    /// Upstream request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("LOL_ESPORTS_API_KEY must not be empty");
        }
        if self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| anyhow::anyhow!("LOL_ESPORTS_API_URL is not a valid URL: {}", e))?;
        for (name, value, unit) in [
            ("LEAGUES_FREQUENCY", self.leagues_frequency, HOUR),
            ("TOURNAMENTS_FREQUENCY", self.tournaments_frequency, HOUR),
            ("TEAMS_FREQUENCY", self.teams_frequency, HOUR),
            ("SCHEDULE_FREQUENCY", self.schedule_frequency, MINUTE),
            ("LIVE_FREQUENCY", self.live_frequency, MINUTE),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be positive", name);
            }
            if value.checked_mul(unit).is_none() {
                anyhow::bail!("{} is too large: {}", name, value);
            }
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be positive");
        }
        if self.schedule_max_pages == 0 {
            anyhow::bail!("SCHEDULE_MAX_PAGES must be positive");
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {}:{}: {}", self.host, self.port, e))
    }

    pub fn leagues_period(&self) -> Duration {
        Duration::from_secs(self.leagues_frequency.saturating_mul(HOUR))
    }

    pub fn tournaments_period(&self) -> Duration {
        Duration::from_secs(self.tournaments_frequency.saturating_mul(HOUR))
    }

    pub fn teams_period(&self) -> Duration {
        Duration::from_secs(self.teams_frequency.saturating_mul(HOUR))
    }

    pub fn schedule_period(&self) -> Duration {
        Duration::from_secs(self.schedule_frequency.saturating_mul(MINUTE))
    }

    pub fn live_period(&self) -> Duration {
        Duration::from_secs(self.live_frequency.saturating_mul(MINUTE))
    }

    pub fn schedule_page_delay(&self) -> Duration {
        Duration::from_millis(self.schedule_page_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
