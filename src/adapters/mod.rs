// Adapters layer: concrete clients for the external systems (price source,
// chat transport).

pub mod geoportal;
pub mod telegram;
