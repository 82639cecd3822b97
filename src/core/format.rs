//! Spanish reply texts. Every outcome of a lookup maps to exactly one
//! text message.

use crate::domain::model::{FuelType, RankedStation};

pub const GREETING: &str =
    "👋 ¡Hola! ¿De qué ciudad o pueblo quieres saber el precio del combustible?";

pub const CANCELLED: &str = "❌ Operación cancelada.";

pub const HINT: &str = "Usa /start para buscar los precios de combustible de tu localidad.";

pub fn not_found(query: &str) -> String {
    format!("❌ No he encontrado la localidad '{}'. Prueba con otra.", query)
}

pub fn no_results(municipality: &str) -> String {
    format!(
        "❌ No se encontraron resultados para '{}'. Prueba con otra localidad.",
        title_case(municipality)
    )
}

/// Render the top-3 listing for a municipality.
pub fn top_stations(municipality: &str, fuel: FuelType, ranked: &[RankedStation]) -> String {
    let mut message = format!("⛽ Top 3 en {}:\n", title_case(municipality));

    for entry in ranked {
        message.push('\n');
        message.push_str(&format!(
            "🏷️ {} - {}\n",
            entry.station.name, entry.station.address
        ));
        message.push_str(&format!(
            "{} {}: {:.3} €/L\n",
            fuel.emoji(),
            fuel.label(),
            entry.price
        ));
        if !entry.station.schedule.is_empty() {
            message.push_str(&format!("🕒 Horario: {}\n", entry.station.schedule));
        }
    }

    message.trim_end().to_string()
}

/// Title-case a municipality name for display ("MADRID" -> "Madrid",
/// "alcalá de henares" -> "Alcalá De Henares").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
