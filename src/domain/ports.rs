use crate::domain::model::{ChatUpdate, FuelType, Station};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to the external price dataset. One call returns the
/// full, unfiltered snapshot; filtering is the caller's job.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_stations(&self) -> Result<Vec<Station>>;
}

/// Chat transport: deliver inbound text messages and send replies.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Long-poll for updates with ids >= `offset`.
    async fn next_updates(&self, offset: i64) -> Result<Vec<ChatUpdate>>;

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_endpoint(&self) -> &str;
    fn telegram_api_base(&self) -> &str;
    fn bot_token(&self) -> &str;
    fn default_fuel(&self) -> FuelType;
    fn timeout_seconds(&self) -> u64;
    /// Automatic retries on transport failure. The design caps this at 1.
    fn retry_attempts(&self) -> u32;
    /// Telegram long-poll timeout in seconds.
    fn poll_timeout_seconds(&self) -> u64;
}
