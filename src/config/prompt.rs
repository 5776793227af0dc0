use crate::models::location::Location;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::info;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful Philippine travel assistant. Help users plan their trips to the Philippines by providing personalized recommendations based on their preferences.

When suggesting locations, always use the following format for each location:
LOCATION: [name]
COORDINATES: [lat], [lng]
DESCRIPTION: [brief description]
TYPE: [type of attraction]

Focus on:
- Understanding their travel style, budget, and interests
- Suggesting specific destinations and activities
- Providing practical travel tips
- Only recommend places in the Philippines
- Keep responses concise and friendly
- Format locations as specified above";

pub const DEFAULT_LOCATIONS_HEADING: &str = "Relevant locations:";

const BLOCK_FIELDS: [&str; 4] = ["LOCATION:", "COORDINATES:", "DESCRIPTION:", "TYPE:"];

#[derive(Debug)]
pub enum PromptError {
    MissingField(&'static str),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::MissingField(field) =>
                write!(f, "System prompt never asks for the '{}' field", field),
            PromptError::IoError(e) => write!(f, "Prompt file IO error: {}", e),
            PromptError::JsonError(e) => write!(f, "Prompt JSON parsing error: {}", e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(e) => Some(e),
            PromptError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err)
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        PromptError::JsonError(err)
    }
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_locations_heading() -> String {
    DEFAULT_LOCATIONS_HEADING.to_string()
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PromptConfig {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_locations_heading")]
    pub locations_heading: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            locations_heading: default_locations_heading(),
        }
    }
}

impl PromptConfig {
    /// Replies are only mapped if the model is told about every block field.
    fn validate(&self) -> Result<(), PromptError> {
        for field in BLOCK_FIELDS {
            if !self.system_prompt.contains(field) {
                return Err(PromptError::MissingField(field));
            }
        }
        Ok(())
    }
}

pub fn load_prompts<P: AsRef<Path>>(path: P) -> Result<Arc<PromptConfig>, PromptError> {
    let file_content = fs::read_to_string(&path)?;
    let config: PromptConfig = serde_json::from_str(&file_content)?;
    config.validate()?;
    info!("Loaded prompt configuration from {}", path.as_ref().display());
    Ok(Arc::new(config))
}

/// Uses the file at `path` when given, the built-in prompt otherwise.
pub fn load_prompts_or_default(
    path: Option<&str>
) -> Result<Arc<PromptConfig>, Box<dyn Error + Send + Sync>> {
    match path {
        Some(p) if !p.trim().is_empty() => {
            load_prompts(p).map_err(|e| -> Box<dyn Error + Send + Sync> {
                format!("Failed to load prompts file '{}': {}", p, e).into()
            })
        }
        _ => Ok(Arc::new(PromptConfig::default())),
    }
}

pub fn format_location_block(location: &Location) -> String {
    format!(
        "LOCATION: {}\nCOORDINATES: {}, {}\nDESCRIPTION: {}\nTYPE: {}",
        location.name,
        location.lat,
        location.lng,
        location.description.as_deref().unwrap_or(""),
        location.kind.as_deref().unwrap_or("")
    )
}

pub fn build_context_prompt(
    config: &PromptConfig,
    user_message: &str,
    relevant_locations: &[Location]
) -> String {
    let mut prompt = format!("{}\n\nUser message: {}", config.system_prompt, user_message);
    if !relevant_locations.is_empty() {
        let blocks = relevant_locations
            .iter()
            .map(format_location_block)
            .collect::<Vec<_>>()
            .join("\n\n");
        prompt.push_str(&format!("\n\n{}\n{}", config.locations_heading, blocks));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::extract_locations;
    use std::io::Write;

    fn boracay() -> Location {
        Location {
            name: "Boracay".to_string(),
            lat: 11.9674,
            lng: 121.9246,
            description: Some("Famous for its white sand beaches".to_string()),
            kind: Some("beach".to_string()),
        }
    }

    #[test]
    fn prompt_without_matches_is_system_plus_message() {
        let prompt = build_context_prompt(&PromptConfig::default(), "Hello", &[]);
        assert_eq!(prompt, format!("{}\n\nUser message: Hello", DEFAULT_SYSTEM_PROMPT));
    }

    #[test]
    fn matched_locations_are_appended_as_blocks() {
        let prompt = build_context_prompt(&PromptConfig::default(), "Boracay?", &[boracay()]);
        assert!(
            prompt.ends_with(
                "User message: Boracay?\n\nRelevant locations:\nLOCATION: Boracay\nCOORDINATES: 11.9674, 121.9246\nDESCRIPTION: Famous for its white sand beaches\nTYPE: beach"
            )
        );
    }

    #[test]
    fn context_blocks_read_back_through_the_extractor() {
        let mut second = boracay();
        second.name = "Puka Beach".to_string();
        let prompt = build_context_prompt(&PromptConfig::default(), "beaches", &[boracay(), second]);
        let names: Vec<String> = extract_locations(&prompt)
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Boracay", "Puka Beach"]);
    }

    #[test]
    fn default_prompt_passes_validation() {
        assert!(PromptConfig::default().validate().is_ok());
    }

    #[test]
    fn loads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"system_prompt": "Be brief. LOCATION: COORDINATES: DESCRIPTION: TYPE:"}}"#
        ).unwrap();
        let config = load_prompts(file.path()).unwrap();
        assert!(config.system_prompt.starts_with("Be brief."));
        assert_eq!(config.locations_heading, DEFAULT_LOCATIONS_HEADING);
    }

    #[test]
    fn rejects_prompt_that_omits_block_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"system_prompt": "Just chat. LOCATION: only"}}"#).unwrap();
        match load_prompts(file.path()) {
            Err(PromptError::MissingField("COORDINATES:")) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(load_prompts("/definitely/not/here.json"), Err(PromptError::IoError(_))));
        assert!(load_prompts_or_default(None).is_ok());
        assert!(load_prompts_or_default(Some("/definitely/not/here.json")).is_err());
    }
}
