// src/config/mod.rs
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How section windows are located in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// First start keyword only, one flat list of programs
    Single,
    /// Every start keyword occurrence, one list per section
    Multi,
}

/// Built-in keyword and heuristic presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Basic,
    Extended,
}

/// Which noise lines the cleaner drops. Empty lines are always dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub drop_dates: bool,
    pub drop_page_numbers: bool,
    pub drop_placeholders: bool,
    /// Compared case-insensitively against the whole trimmed line
    pub boilerplate_headings: Vec<String>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            drop_dates: true,
            drop_page_numbers: true,
            drop_placeholders: true,
            boilerplate_headings: to_strings(&[
                "experiments",
                "list of experiments",
                "programming exercises",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Case-sensitive words that open a new program when they start a line
    pub lead_verbs: Vec<String>,
    /// Also open a new program on lines like "3. ..."
    pub numbered_leads: bool,
    /// Strip source numbering and prefix "1. ", "2. ", ...
    pub renumber: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            lead_verbs: to_strings(&["Develop", "Write", "Design", "Implement", "Simulate"]),
            numbered_leads: true,
            renumber: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub strategy: Strategy,
    pub start_keywords: Vec<String>,
    pub end_keywords: Vec<String>,
    pub cleaner: CleanerConfig,
    pub splitter: SplitterConfig,
    /// Keep sections whose text cleans down to nothing as empty lists
    pub retain_empty_sections: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self::extended()
    }
}

impl ExtractionConfig {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Basic => Self::basic(),
            Profile::Extended => Self::extended(),
        }
    }

    /// Single section, verb-only splitting, source numbering left alone.
    pub fn basic() -> Self {
        Self {
            strategy: Strategy::Single,
            start_keywords: to_strings(&[
                "Programming Exercises:",
                "Experiments",
                "List of Experiments",
            ]),
            end_keywords: to_strings(&["Course outcomes", "Assessment Details", "SEE for IC"]),
            cleaner: CleanerConfig {
                drop_placeholders: false,
                ..CleanerConfig::default()
            },
            splitter: SplitterConfig {
                lead_verbs: to_strings(&["Develop", "Write", "Design"]),
                numbered_leads: false,
                renumber: false,
            },
            retain_empty_sections: false,
        }
    }

    /// Every lab section, numbered splitting, renumbered output.
    pub fn extended() -> Self {
        Self {
            strategy: Strategy::Multi,
            start_keywords: to_strings(&[
                "Laboratory Component",
                "Lab Section",
                "Programming Exercises:",
                "List of Experiments",
            ]),
            end_keywords: to_strings(&[
                "Teaching-Learning Process",
                "Course outcomes",
                "Assessment Details",
                "SEE for IC",
            ]),
            cleaner: CleanerConfig::default(),
            splitter: SplitterConfig::default(),
            retain_empty_sections: false,
        }
    }

    /// Loads a JSON config file. Missing fields fall back to the extended profile.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded extraction config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_keywords.is_empty() {
            return Err(ConfigError::Invalid("at least one start keyword is required".to_string()));
        }
        let blank = self
            .start_keywords
            .iter()
            .chain(&self.end_keywords)
            .chain(&self.splitter.lead_verbs)
            .any(|k| k.trim().is_empty());
        if blank {
            return Err(ConfigError::Invalid("keywords and lead verbs must not be blank".to_string()));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
