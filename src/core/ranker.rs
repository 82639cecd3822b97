//! Price ranking: filter one dataset snapshot to a locality, order by
//! price, keep the three cheapest.

use crate::domain::model::{FuelType, LocalityId, RankedStation, Station};

pub const TOP_N: usize = 3;

/// Rank the stations of `locality` by ascending price of `fuel`.
///
/// Stations without a published price for `fuel` are excluded. Ties are
/// broken by station id ascending, so identical input always yields the
/// same ordering. An empty result is valid: it means no eligible station,
/// not an error.
pub fn rank(stations: &[Station], locality: &LocalityId, fuel: FuelType) -> Vec<RankedStation> {
    let mut eligible: Vec<RankedStation> = stations
        .iter()
        .filter(|s| &s.locality == locality)
        .filter_map(|s| {
            s.price(fuel).map(|price| RankedStation {
                station: s.clone(),
                price,
            })
        })
        .collect();

    eligible.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.station.id.cmp(&b.station.id))
    });
    eligible.truncate(TOP_N);
    eligible
}
