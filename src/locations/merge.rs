use crate::models::location::{ Location, Marker };
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which source keeps its record when the reply and the catalog name the same
/// place. The surviving entry always sits where the name was first seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// First write wins: coordinates the model gave in its reply are kept.
    #[default]
    Extracted,
    /// Last write wins: catalog coordinates replace the model's.
    Catalog,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseMergePolicyError {
    message: String,
}

impl fmt::Display for ParseMergePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseMergePolicyError {}

impl FromStr for MergePolicy {
    type Err = ParseMergePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extracted" | "reply" => Ok(MergePolicy::Extracted),
            "catalog" | "matched" => Ok(MergePolicy::Catalog),
            _ =>
                Err(ParseMergePolicyError {
                    message: format!("Invalid merge preference: '{}'", s),
                }),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::Extracted => write!(f, "extracted"),
            MergePolicy::Catalog => write!(f, "catalog"),
        }
    }
}

/// Deduplicates `extracted` followed by `matched` by exact name.
pub fn merge_locations(
    extracted: Vec<Location>,
    matched: Vec<Location>,
    policy: MergePolicy
) -> Vec<Location> {
    let mut merged: Vec<Location> = Vec::with_capacity(extracted.len() + matched.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for location in extracted.into_iter().chain(matched) {
        match positions.get(&location.name) {
            Some(&index) => {
                if policy == MergePolicy::Catalog {
                    merged[index] = location;
                }
            }
            None => {
                positions.insert(location.name.clone(), merged.len());
                merged.push(location);
            }
        }
    }

    merged
}

pub fn to_markers(locations: &[Location]) -> Vec<Marker> {
    locations.iter().map(Marker::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str, lat: f64, lng: f64, description: Option<&str>) -> Location {
        Location {
            name: name.to_string(),
            lat,
            lng,
            description: description.map(str::to_string),
            kind: None,
        }
    }

    fn boracay_collision() -> (Vec<Location>, Vec<Location>) {
        let extracted = vec![loc("Boracay", 1.0, 1.0, None)];
        let matched = vec![loc("Boracay", 11.9674, 121.9246, Some("Famous for white sand beaches"))];
        (extracted, matched)
    }

    #[test]
    fn extracted_entry_wins_by_default() {
        let (extracted, matched) = boracay_collision();
        let merged = merge_locations(extracted, matched, MergePolicy::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].lat, 1.0);
        assert_eq!(merged[0].lng, 1.0);
        assert_eq!(merged[0].description, None);
    }

    #[test]
    fn catalog_entry_wins_when_configured() {
        let (extracted, matched) = boracay_collision();
        let merged = merge_locations(extracted, matched, MergePolicy::Catalog);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].lat, 11.9674);
        assert_eq!(merged[0].description.as_deref(), Some("Famous for white sand beaches"));
    }

    #[test]
    fn survivor_keeps_first_seen_position() {
        let extracted = vec![loc("Siargao", 9.8, 126.1, None), loc("Boracay", 1.0, 1.0, None)];
        let matched = vec![loc("Intramuros", 14.5, 120.9, None), loc("Boracay", 11.9, 121.9, None)];
        for policy in [MergePolicy::Extracted, MergePolicy::Catalog] {
            let names: Vec<String> = merge_locations(extracted.clone(), matched.clone(), policy)
                .into_iter()
                .map(|l| l.name)
                .collect();
            assert_eq!(names, vec!["Siargao", "Boracay", "Intramuros"]);
        }
    }

    #[test]
    fn duplicates_within_one_source_collapse() {
        let extracted = vec![loc("Boracay", 1.0, 1.0, None), loc("Boracay", 2.0, 2.0, None)];
        let merged = merge_locations(extracted, Vec::new(), MergePolicy::Extracted);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].lat, 1.0);
    }

    #[test]
    fn markers_follow_merged_order() {
        let (extracted, matched) = boracay_collision();
        let markers = to_markers(&merge_locations(extracted, matched, MergePolicy::Catalog));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "Boracay - Famous for white sand beaches");
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("extracted".parse::<MergePolicy>(), Ok(MergePolicy::Extracted));
        assert_eq!("Catalog".parse::<MergePolicy>(), Ok(MergePolicy::Catalog));
        assert!("newest".parse::<MergePolicy>().is_err());
    }
}
