//! Poll-fetch-reconcile loop shared by every resource.
//!
//! A [`SyncTask`] owns one [`ResourceFetcher`] and a poll period. Each tick
//! fetches the current upstream state and reconciles it record by record into
//! the store through [`Database::upsert`]. Failures end the tick, never the
//! loop.

pub mod leagues;
pub mod live;
pub mod schedule;
pub mod teams;
pub mod tournaments;

pub use leagues::LeagueFetcher;
pub use live::LiveFetcher;
pub use schedule::ScheduleFetcher;
pub use teams::TeamFetcher;
pub use tournaments::TournamentFetcher;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::db::{Database, Document, UpsertOutcome};

/// Source of the records for one resource kind.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    type Doc: Document + 'static;

    /// Plural resource name used in logs and interval names
    const RESOURCE: &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Doc>>;
}

/// What one tick did to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Records without a natural key
    pub skipped: usize,
}

impl TickReport {
    pub fn writes(&self) -> usize {
        self.inserted + self.updated
    }
}

// ── Startup ordering ───────────────────────────────────────────────────────────

/// Opened by the synchronizer other tasks depend on, after its first tick.
pub struct StartupSignal(watch::Sender<bool>);

/// Held by dependent synchronizers; resolves once the signal opens.
#[derive(Clone)]
pub struct StartupGate(watch::Receiver<bool>);

pub fn startup_barrier() -> (StartupSignal, StartupGate) {
    let (tx, rx) = watch::channel(false);
    (StartupSignal(tx), StartupGate(rx))
}

impl StartupSignal {
    pub fn open(&self) {
        self.0.send_replace(true);
    }
}

impl StartupGate {
    /// Returns immediately if the signal is open or has been dropped.
    pub async fn wait(mut self) {
        let _ = self.0.wait_for(|ready| *ready).await;
    }
}

// ── Task ───────────────────────────────────────────────────────────────────────

pub struct SyncTask<F> {
    fetcher: F,
    db: Database,
    period: Duration,
    gate: Option<StartupGate>,
    signal: Option<StartupSignal>,
}

impl<F: ResourceFetcher + 'static> SyncTask<F> {
    pub fn new(fetcher: F, db: Database, period: Duration) -> Self {
        SyncTask {
            fetcher,
            db,
            period,
            gate: None,
            signal: None,
        }
    }

    /// Hold the first tick until `gate` opens.
    pub fn after(mut self, gate: StartupGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Open `signal` once the first tick has finished, successfully or not.
    pub fn signals(mut self, signal: StartupSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    #[cfg(test)]
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn name(&self) -> String {
        format!("sync-{}", F::RESOURCE)
    }

    /// Fetch and reconcile once, surfacing any failure.
    pub async fn tick(&self) -> Result<TickReport> {
        debug!("Synchronizing {}", F::RESOURCE);
        let records = self
            .fetcher
            .fetch()
            .await
            .with_context(|| format!("fetching {}", F::RESOURCE))?;

        let mut report = TickReport {
            fetched: records.len(),
            ..Default::default()
        };
        if records.is_empty() {
            warn!("No {} found", F::RESOURCE);
            return Ok(report);
        }

        for record in &records {
            let Some(key) = record.natural_key() else {
                debug!("Skipping {} record without a natural key", F::RESOURCE);
                report.skipped += 1;
                continue;
            };
            match self.db.upsert(record)? {
                UpsertOutcome::Inserted => {
                    debug!("Created {} {}", F::RESOURCE, key);
                    report.inserted += 1;
                }
                UpsertOutcome::Updated => {
                    debug!("Updated {} {}", F::RESOURCE, key);
                    report.updated += 1;
                }
                UpsertOutcome::Unchanged => report.unchanged += 1,
            }
        }

        if report.writes() == 0 {
            debug!("{} already up to date", F::RESOURCE);
        }
        info!(
            "Synchronized {}: {} fetched, {} created, {} updated, {} unchanged, {} skipped",
            F::RESOURCE,
            report.fetched,
            report.inserted,
            report.updated,
            report.unchanged,
            report.skipped
        );
        Ok(report)
    }

    /// One tick with errors logged and swallowed.
    pub async fn run_once(&self) -> Option<TickReport> {
        match self.tick().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Error while synchronizing {}: {:#}", F::RESOURCE, e);
                None
            }
        }
    }

    /// Run immediately, then every `period`, until the process exits.
    ///
    /// Ticks of one task never overlap: a tick longer than the period delays
    /// the next one instead of stacking.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Some(gate) = self.gate.clone() {
                gate.wait().await;
            }
            info!("Interval {} registered (every {:?})", self.name(), self.period);

            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // first tick completes immediately
                interval.tick().await;
                self.run_once().await;
                if let Some(signal) = &self.signal {
                    signal.open();
                }
            }
        })
    }
}
