use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    /// Transport-level failure reaching the price source (connectivity,
    /// timeout, non-2xx status).
    #[error("price source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// The price source answered, but the payload does not match the
    /// expected schema.
    #[error("invalid price source response: {message}")]
    SourceDataInvalid { message: String },

    #[error("Telegram API error: {message}")]
    Telegram { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl BotError {
    pub fn source_unavailable<S: Into<String>>(message: S) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn source_data_invalid<S: Into<String>>(message: S) -> Self {
        Self::SourceDataInvalid {
            message: message.into(),
        }
    }

    pub fn telegram<S: Into<String>>(message: S) -> Self {
        Self::Telegram {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Fixed Spanish text shown to the chat user when a lookup fails.
    /// Every failure is terminal for the current request; nothing here
    /// triggers recovery.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::SourceUnavailable { .. } | BotError::Telegram { .. } => {
                "⚠️ No se pudo consultar los precios ahora, inténtalo más tarde."
            }
            BotError::SourceDataInvalid { .. } => "⚠️ Error en la respuesta del servidor.",
            BotError::Io { .. }
            | BotError::Config { .. }
            | BotError::InvalidConfigValue { .. } => {
                "⚠️ Error interno, inténtalo más tarde."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
