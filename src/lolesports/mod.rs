pub mod client;
pub mod pager;
pub mod provider;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use client::EsportsClient;
pub use pager::SchedulePager;
pub use provider::EsportsApi;
