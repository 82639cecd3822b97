use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fuel categories published per station by the geoportal dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelType {
    DieselA,
    DieselPremium,
    Gasoline95,
    Gasoline98,
}

impl FuelType {
    /// Default fuel when the user does not pick one.
    pub const DEFAULT: FuelType = FuelType::DieselA;

    /// Human label used in replies.
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::DieselA => "Diésel A",
            FuelType::DieselPremium => "Diésel Premium",
            FuelType::Gasoline95 => "Gasolina 95",
            FuelType::Gasoline98 => "Gasolina 98",
        }
    }

    /// Marker shown next to the price line.
    pub fn emoji(&self) -> &'static str {
        match self {
            FuelType::DieselA | FuelType::DieselPremium => "🔵",
            FuelType::Gasoline95 | FuelType::Gasoline98 => "🟡",
        }
    }
}

impl Default for FuelType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diesel-a" | "diesel" => Ok(FuelType::DieselA),
            "diesel-premium" => Ok(FuelType::DieselPremium),
            "gasolina-95" | "gasoline-95" => Ok(FuelType::Gasoline95),
            "gasolina-98" | "gasoline-98" => Ok(FuelType::Gasoline98),
            other => Err(format!(
                "unknown fuel type '{}', expected one of: diesel-a, diesel-premium, gasolina-95, gasolina-98",
                other
            )),
        }
    }
}

/// Opaque station identifier (`IDEESS` in the dataset). Ordered
/// lexicographically; used as the deterministic ranking tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub String);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque municipality identifier (`IDMunicipio` in the dataset).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalityId(pub String);

impl fmt::Display for LocalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fuel station as published by the price source. A per-request
/// snapshot; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub locality: LocalityId,
    /// Municipality display name (`Municipio`).
    pub municipality: String,
    /// Brand name (`Rótulo`).
    pub name: String,
    /// Street address (`Dirección`).
    pub address: String,
    /// Opening hours (`Horario`). May be empty.
    pub schedule: String,
    /// Published prices in €/L. A missing key means the station publishes
    /// no price for that fuel.
    pub prices: BTreeMap<FuelType, f64>,
}

impl Station {
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        self.prices.get(&fuel).copied()
    }
}

/// A station paired with the price of the fuel it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: Station,
    pub price: f64,
}

/// Result of resolving a free-text locality query against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityMatch {
    pub id: LocalityId,
    /// Canonical municipality name as published by the source.
    pub name: String,
}

/// An inbound text message, already stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUpdate {
    pub update_id: i64,
    pub chat_id: i64,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_type_from_str() {
        assert_eq!("diesel-a".parse::<FuelType>().unwrap(), FuelType::DieselA);
        assert_eq!("Diesel".parse::<FuelType>().unwrap(), FuelType::DieselA);
        assert_eq!(
            "gasolina-95".parse::<FuelType>().unwrap(),
            FuelType::Gasoline95
        );
        assert_eq!(
            " gasolina-98 ".parse::<FuelType>().unwrap(),
            FuelType::Gasoline98
        );
        assert!("kerosene".parse::<FuelType>().is_err());
    }

    #[test]
    fn test_fuel_type_default_is_diesel_a() {
        assert_eq!(FuelType::default(), FuelType::DieselA);
    }

    #[test]
    fn test_station_price_lookup() {
        let mut prices = BTreeMap::new();
        prices.insert(FuelType::DieselA, 1.459);

        let station = Station {
            id: StationId("1234".to_string()),
            locality: LocalityId("4276".to_string()),
            municipality: "Madrid".to_string(),
            name: "REPSOL".to_string(),
            address: "CALLE MAYOR 1".to_string(),
            schedule: "L-D: 24H".to_string(),
            prices,
        };

        assert_eq!(station.price(FuelType::DieselA), Some(1.459));
        assert_eq!(station.price(FuelType::Gasoline95), None);
    }

    #[test]
    fn test_station_id_ordering_is_lexicographic() {
        assert!(StationId("A".to_string()) < StationId("B".to_string()));
        // Opaque ids compare as strings, not numbers.
        assert!(StationId("10".to_string()) < StationId("9".to_string()));
    }
}
