//! Conversation engine: the two-step command flow and the long-poll loop.
//!
//! The engine owns only the per-chat "awaiting a locality" flag; all lookup
//! data is fetched fresh per request and discarded after the reply.

use crate::core::format;
use crate::core::ranker;
use crate::core::resolver::LocalityCatalog;
use crate::domain::model::{FuelType, LocalityMatch, RankedStation};
use crate::domain::ports::{ChatApi, ConfigProvider, PriceSource};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

const START_COMMAND: &str = "/start";
const CANCEL_COMMAND: &str = "/cancelar";

/// Pause before polling again after a transport error.
const POLL_BACKOFF: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatState {
    AwaitingLocality,
}

pub struct BotEngine<S, A, C> {
    source: S,
    chat: A,
    config: C,
    sessions: HashMap<i64, ChatState>,
}

impl<S, A, C> BotEngine<S, A, C>
where
    S: PriceSource,
    A: ChatApi,
    C: ConfigProvider,
{
    pub fn new(source: S, chat: A, config: C) -> Self {
        Self {
            source,
            chat,
            config,
            sessions: HashMap::new(),
        }
    }

    /// Poll updates and answer them until the task is cancelled. Request
    /// failures are answered and logged; they never stop the loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("✅ Bot activo, esperando mensajes...");
        let mut offset = 0i64;

        loop {
            let updates = match self.chat.next_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("polling failed: {}", e);
                    tokio::time::sleep(POLL_BACKOFF).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                debug!("update {} from chat {}", update.update_id, update.chat_id);

                let reply = self.reply_for(update.chat_id, &update.text).await;
                if let Err(e) = self.chat.send_text(update.chat_id, &reply).await {
                    warn!("could not reply to chat {}: {}", update.chat_id, e);
                }
            }
        }
    }

    /// Compute the single text reply for one inbound message.
    pub async fn reply_for(&mut self, chat_id: i64, text: &str) -> String {
        let trimmed = text.trim();
        match trimmed {
            START_COMMAND => {
                self.sessions.insert(chat_id, ChatState::AwaitingLocality);
                format::GREETING.to_string()
            }
            CANCEL_COMMAND => {
                self.sessions.remove(&chat_id);
                format::CANCELLED.to_string()
            }
            _ => {
                if self.sessions.remove(&chat_id) == Some(ChatState::AwaitingLocality) {
                    self.lookup_reply(trimmed).await
                } else {
                    format::HINT.to_string()
                }
            }
        }
    }

    async fn lookup_reply(&self, query: &str) -> String {
        let fuel = self.config.default_fuel();
        match self.top_stations(query, fuel).await {
            Ok(Some((locality, ranked))) if !ranked.is_empty() => {
                info!(
                    "top {} of {} for '{}' ({})",
                    ranked.len(),
                    fuel,
                    locality.name,
                    locality.id
                );
                format::top_stations(&locality.name, fuel, &ranked)
            }
            Ok(Some((locality, _))) => {
                info!("no {} prices in '{}'", fuel, locality.name);
                format::no_results(&locality.name)
            }
            Ok(None) => {
                info!("unknown locality '{}'", query);
                format::not_found(query)
            }
            Err(e) => {
                warn!("lookup for '{}' failed: {}", query, e);
                e.user_message().to_string()
            }
        }
    }

    /// One full lookup: fetch a snapshot, resolve the locality against it,
    /// rank its stations. `None` means the locality is unknown.
    pub async fn top_stations(
        &self,
        query: &str,
        fuel: FuelType,
    ) -> Result<Option<(LocalityMatch, Vec<RankedStation>)>> {
        let stations = self.source.fetch_stations().await?;
        debug!("snapshot holds {} stations", stations.len());

        let catalog = LocalityCatalog::from_stations(&stations);
        let Some(locality) = catalog.resolve(query) else {
            return Ok(None);
        };

        let ranked = ranker::rank(&stations, &locality.id, fuel);
        Ok(Some((locality, ranked)))
    }
}
