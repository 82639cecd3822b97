pub mod bot;
pub mod format;
pub mod ranker;
pub mod resolver;

pub use crate::domain::model::{
    ChatUpdate, FuelType, LocalityId, LocalityMatch, RankedStation, Station, StationId,
};
pub use crate::domain::ports::{ChatApi, ConfigProvider, PriceSource};
pub use crate::utils::error::Result;
