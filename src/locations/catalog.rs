use crate::models::location::Location;
use lazy_static::lazy_static;
use std::sync::Arc;

fn entry(name: &str, lat: f64, lng: f64, description: &str, kind: &str) -> Location {
    Location {
        name: name.to_string(),
        lat,
        lng,
        description: Some(description.to_string()),
        kind: Some(kind.to_string()),
    }
}

lazy_static! {
    static ref PHILIPPINES_LOCATIONS: Arc<[Location]> = vec![
        entry("Boracay", 11.9674, 121.9246, "Famous for its white sand beaches", "beach"),
        entry(
            "Palawan Underground River",
            10.1927,
            118.9043,
            "UNESCO World Heritage site, underground river system",
            "nature"
        ),
        entry("Chocolate Hills", 9.8297, 124.1397, "Over a thousand grass-covered karst hills in Bohol", "nature"),
        entry("Banaue Rice Terraces", 16.9267, 121.0583, "Ancient terraces carved into the Ifugao highlands", "heritage"),
        entry("Intramuros", 14.5896, 120.9747, "Walled Spanish colonial city in Manila", "history"),
        entry("Mayon Volcano", 13.2576, 123.6856, "Near-perfect cone volcano in Albay", "nature"),
        entry("Siargao", 9.813, 126.16, "Surfing capital with the Cloud 9 reef break", "surfing"),
    ].into();
}

/// Read-only table of known points of interest.
#[derive(Clone, Debug)]
pub struct LocationCatalog {
    entries: Arc<[Location]>,
}

impl LocationCatalog {
    pub fn new(entries: Vec<Location>) -> Self {
        Self { entries: entries.into() }
    }

    /// The built-in Philippine destinations, shared across every clone.
    pub fn builtin() -> Self {
        Self { entries: Arc::clone(&PHILIPPINES_LOCATIONS) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name, description or type contains any lowercase
    /// whitespace-separated token of `query`. Catalog order is kept.
    pub fn search(&self, query: &str) -> Vec<Location> {
        search_locations(&self.entries, query)
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn search_locations(table: &[Location], query: &str) -> Vec<Location> {
    let lowered = query.to_lowercase();
    let terms: Vec<&str> = lowered.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    table
        .iter()
        .filter(|location| {
            let name = location.name.to_lowercase();
            let description = location.description.as_deref().unwrap_or("").to_lowercase();
            let kind = location.kind.as_deref().unwrap_or("").to_lowercase();
            terms
                .iter()
                .any(|term| {
                    name.contains(term) || description.contains(term) || kind.contains(term)
                })
        })
        .cloned()
        .collect()
}
