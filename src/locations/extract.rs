//! Scanner for the structured location blocks the assistant is instructed to
//! emit:
//!
//! ```text
//! LOCATION: <name>
//! COORDINATES: <lat>, <lng>
//! DESCRIPTION: <description>
//! TYPE: <type>
//! ```
//!
//! A block ends at the first blank line or at the end of the text. The
//! description and type may wrap onto following lines as long as no blank line
//! intervenes. Blocks that do not have all four fields in this order, or whose
//! coordinates are not finite numbers, produce nothing.

use crate::models::location::Location;
use lazy_static::lazy_static;
use log::debug;
use regex::{ CaptureMatches, Regex };
use std::borrow::Cow;

// `(?:[^\r\n]|\r?\n[^\r\n])` is "any character, but never a blank line",
// for both LF and CRLF text.
lazy_static! {
    static ref LOCATION_BLOCK: Regex = Regex::new(
        concat!(
            r"LOCATION:[ \t]*([^\r\n]*)\r?\n",
            r"COORDINATES:[ \t]*([^,\r\n]*),[ \t]*([^\r\n]*)\r?\n",
            r"DESCRIPTION:[ \t]*((?:[^\r\n]|\r?\n[^\r\n])*?)\r?\n",
            r"TYPE:[ \t]*((?:[^\r\n]|\r?\n[^\r\n])*)"
        )
    ).expect("location block pattern is valid");
}

/// Lazily yields every well-formed block of `text`, in order.
pub struct LocationBlocks<'t> {
    captures: CaptureMatches<'static, 't>,
}

impl<'t> LocationBlocks<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { captures: LOCATION_BLOCK.captures_iter(text) }
    }
}

impl<'t> Iterator for LocationBlocks<'t> {
    type Item = Location;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.captures.by_ref() {
            let field = |i: usize| caps.get(i).map(|m| m.as_str().trim()).unwrap_or("");
            let name = field(1);
            if name.is_empty() {
                debug!("Skipping location block with empty name");
                continue;
            }
            let (lat, lng) = match (parse_coordinate(field(2)), parse_coordinate(field(3))) {
                (Some(lat), Some(lng)) => (lat, lng),
                _ => {
                    debug!(
                        "Skipping location block '{}' with bad coordinates: '{}', '{}'",
                        name,
                        field(2),
                        field(3)
                    );
                    continue;
                }
            };
            return Some(Location {
                name: name.to_string(),
                lat,
                lng,
                description: non_empty(field(4)),
                kind: non_empty(field(5)),
            });
        }
        None
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn extract_locations(text: &str) -> Vec<Location> {
    let text = normalize_line_endings(text);
    LocationBlocks::new(&text).collect()
}
