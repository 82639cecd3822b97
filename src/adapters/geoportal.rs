//! Client for the geoportalgasolineras.es price listing.
//!
//! One GET returns every station in the country; the payload is validated
//! strictly and converted to domain [`Station`]s. Prices arrive as
//! comma-decimal strings ("1,459"); an empty string means the station
//! publishes no price for that fuel.

use crate::domain::model::Station;
use crate::domain::ports::PriceSource;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str =
    "https://geoportalgasolineras.es/rest/geoportalgasolineras/ListaPrecioGasolinerasSinGalp";

pub struct GeoportalClient {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
}

impl GeoportalClient {
    pub fn new(endpoint: &str, timeout: Duration, retry_attempts: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            retry_attempts,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<Station>> {
        debug!("requesting price snapshot from {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| BotError::source_unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::source_unavailable(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::source_unavailable(e.to_string()))?;

        let listing: raw::PriceListResponse = serde_json::from_str(&body)
            .map_err(|e| BotError::source_data_invalid(e.to_string()))?;

        listing
            .stations
            .into_iter()
            .map(raw::RawStation::into_station)
            .collect()
    }
}

#[async_trait]
impl PriceSource for GeoportalClient {
    /// Fetch the full snapshot, retrying at most `retry_attempts` times on
    /// transport failure. Invalid payloads are never retried: the source
    /// will answer the same way again.
    async fn fetch_stations(&self) -> Result<Vec<Station>> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once().await {
                Ok(stations) => {
                    debug!("fetched {} stations", stations.len());
                    return Ok(stations);
                }
                Err(e @ BotError::SourceUnavailable { .. }) if attempt < self.retry_attempts => {
                    attempt += 1;
                    warn!(
                        "price source request failed ({}), retry {}/{}",
                        e, attempt, self.retry_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Wire schema of the geoportal listing. Field names are taken verbatim
/// from the published JSON; a missing required field fails deserialization
/// and surfaces as `SourceDataInvalid`.
mod raw {
    use crate::domain::model::{FuelType, LocalityId, Station, StationId};
    use crate::utils::error::{BotError, Result};
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    pub struct PriceListResponse {
        #[serde(rename = "ListaEESSPrecio")]
        pub stations: Vec<RawStation>,
    }

    #[derive(Debug, Deserialize)]
    pub struct RawStation {
        #[serde(rename = "IDEESS")]
        pub id: String,
        #[serde(rename = "IDMunicipio")]
        pub locality_id: String,
        #[serde(rename = "Municipio")]
        pub municipality: String,
        #[serde(rename = "Rótulo")]
        pub name: String,
        #[serde(rename = "Dirección")]
        pub address: String,
        #[serde(rename = "Horario", default)]
        pub schedule: String,
        #[serde(rename = "Precio Gasoleo A", default)]
        pub diesel_a: Option<String>,
        #[serde(rename = "Precio Gasoleo Premium", default)]
        pub diesel_premium: Option<String>,
        #[serde(rename = "Precio Gasolina 95 E5", default)]
        pub gasoline_95: Option<String>,
        #[serde(rename = "Precio Gasolina 98 E5", default)]
        pub gasoline_98: Option<String>,
    }

    impl RawStation {
        pub fn into_station(self) -> Result<Station> {
            let mut prices = BTreeMap::new();
            let fields = [
                (FuelType::DieselA, "Precio Gasoleo A", &self.diesel_a),
                (
                    FuelType::DieselPremium,
                    "Precio Gasoleo Premium",
                    &self.diesel_premium,
                ),
                (
                    FuelType::Gasoline95,
                    "Precio Gasolina 95 E5",
                    &self.gasoline_95,
                ),
                (
                    FuelType::Gasoline98,
                    "Precio Gasolina 98 E5",
                    &self.gasoline_98,
                ),
            ];
            for (fuel, field, value) in fields {
                if let Some(price) = parse_price(field, value.as_deref())? {
                    prices.insert(fuel, price);
                }
            }

            Ok(Station {
                id: StationId(self.id),
                locality: LocalityId(self.locality_id),
                municipality: self.municipality,
                name: self.name,
                address: self.address,
                schedule: self.schedule,
                prices,
            })
        }
    }

    fn parse_price(field: &str, value: Option<&str>) -> Result<Option<f64>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| {
                BotError::source_data_invalid(format!(
                    "unparsable price '{}' in field '{}'",
                    trimmed, field
                ))
            })
    }
}
