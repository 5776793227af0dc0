use serde::{ Serialize, Deserialize };

/// A point of interest, either from the built-in catalog or parsed out of a
/// model reply. `name` is the identity used when the two sources are merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Map pin as consumed by the map widget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
}

impl From<&Location> for Marker {
    fn from(location: &Location) -> Self {
        let title = match location.description.as_deref() {
            Some(description) if !description.is_empty() => {
                format!("{} - {}", location.name, description)
            }
            _ => location.name.clone(),
        };
        Self { lat: location.lat, lng: location.lng, title }
    }
}
