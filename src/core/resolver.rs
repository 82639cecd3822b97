//! Locality resolution: maps free-text municipality queries to the
//! identifiers used by the price dataset.

use crate::domain::model::{LocalityMatch, Station};
use tracing::debug;

/// Normalize user input and catalog names for matching: trim, lowercase,
/// fold the accents and diacritics that appear in Spanish place names.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

struct CatalogEntry {
    normalized: String,
    entry: LocalityMatch,
}

/// Catalog of known localities, derived from one dataset snapshot.
/// Entries are held in canonical order: normalized name ascending, then
/// locality id ascending. That order decides ambiguous matches.
pub struct LocalityCatalog {
    entries: Vec<CatalogEntry>,
}

impl LocalityCatalog {
    pub fn from_stations(stations: &[Station]) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for station in stations {
            if entries
                .iter()
                .any(|e| e.entry.id == station.locality)
            {
                continue;
            }
            entries.push(CatalogEntry {
                normalized: normalize(&station.municipality),
                entry: LocalityMatch {
                    id: station.locality.clone(),
                    name: station.municipality.clone(),
                },
            });
        }
        entries.sort_by(|a, b| {
            a.normalized
                .cmp(&b.normalized)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text query to a single locality.
    ///
    /// Exact match on the normalized name wins; otherwise the query is
    /// looked for as a substring of catalog names. When several entries
    /// match, the first one in canonical order is picked. `None` means the
    /// locality is unknown.
    pub fn resolve(&self, query: &str) -> Option<LocalityMatch> {
        let needle = normalize(query);
        if needle.is_empty() {
            return None;
        }

        if let Some(hit) = self.entries.iter().find(|e| e.normalized == needle) {
            debug!("resolved '{}' exactly to {}", query, hit.entry.id);
            return Some(hit.entry.clone());
        }

        if let Some(hit) = self
            .entries
            .iter()
            .find(|e| e.normalized.contains(&needle))
        {
            debug!("resolved '{}' by substring to {}", query, hit.entry.id);
            return Some(hit.entry.clone());
        }

        debug!("no locality match for '{}'", query);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FuelType, LocalityId, StationId};
    use std::collections::BTreeMap;

    fn station(id: &str, locality_id: &str, municipality: &str) -> Station {
        let mut prices = BTreeMap::new();
        prices.insert(FuelType::DieselA, 1.5);
        Station {
            id: StationId(id.to_string()),
            locality: LocalityId(locality_id.to_string()),
            municipality: municipality.to_string(),
            name: "REPSOL".to_string(),
            address: "CALLE MAYOR 1".to_string(),
            schedule: String::new(),
            prices,
        }
    }

    fn catalog() -> LocalityCatalog {
        LocalityCatalog::from_stations(&[
            station("1", "100", "Madrid"),
            station("2", "200", "Majadahonda"),
            station("3", "300", "Alcalá de Henares"),
            station("4", "400", "Alcalá la Real"),
        ])
    }

    #[test]
    fn test_normalize_folds_case_whitespace_and_accents() {
        assert_eq!(normalize("  MADRID "), "madrid");
        assert_eq!(normalize("Madríd"), "madrid");
        assert_eq!(normalize("Alcalá de Henares"), "alcala de henares");
        assert_eq!(normalize("A Coruña"), "a coruna");
    }

    #[test]
    fn test_resolve_is_case_and_accent_insensitive() {
        let catalog = catalog();
        let expected = LocalityId("100".to_string());
        for query in ["MADRID", "madrid", "Madríd", " Madrid "] {
            let hit = catalog.resolve(query).unwrap();
            assert_eq!(hit.id, expected, "query: {}", query);
            assert_eq!(hit.name, "Madrid");
        }
    }

    #[test]
    fn test_exact_match_beats_substring() {
        // "madrid" is also a substring of nothing else here, but "alcala"
        // only matches by substring while "Alcalá la Real" matches exactly.
        let catalog = catalog();
        let hit = catalog.resolve("Alcala la Real").unwrap();
        assert_eq!(hit.id, LocalityId("400".to_string()));
    }

    #[test]
    fn test_substring_ambiguity_picks_first_canonical() {
        let catalog = catalog();
        // Both Alcalá entries contain "alcala"; canonical order is by
        // normalized name, so "alcala de henares" wins.
        let hit = catalog.resolve("Alcalá").unwrap();
        assert_eq!(hit.id, LocalityId("300".to_string()));
    }

    #[test]
    fn test_unknown_locality_is_none() {
        let catalog = catalog();
        assert!(catalog.resolve("Zzznotaplace").is_none());
        assert!(catalog.resolve("").is_none());
        assert!(catalog.resolve("   ").is_none());
    }

    #[test]
    fn test_catalog_deduplicates_localities() {
        let catalog = LocalityCatalog::from_stations(&[
            station("1", "100", "Madrid"),
            station("2", "100", "Madrid"),
            station("3", "100", "Madrid"),
        ]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_same_name_different_id_is_deterministic() {
        // Two municipalities can share a name across provinces; the lower
        // id wins, consistently.
        let catalog = LocalityCatalog::from_stations(&[
            station("1", "200", "Mieres"),
            station("2", "100", "Mieres"),
        ]);
        let hit = catalog.resolve("mieres").unwrap();
        assert_eq!(hit.id, LocalityId("100".to_string()));
    }
}
