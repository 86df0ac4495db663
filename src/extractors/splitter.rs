// src/extractors/splitter.rs

// --- Imports ---
use crate::config::SplitterConfig;
use crate::extractors::cleaner::is_placeholder;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// Source numbering at the head of a program, e.g. "3. ", "12.\n" or a bare "4."
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.(?:\s+|$)").expect("Failed to compile LEADING_NUMBER_RE")
});

/// Splits a cleaned section into individual programs.
#[derive(Debug, Clone)]
pub struct ProgramSplitter {
    // Anchored at the start of the haystack; tested against the text following each newline.
    // None when no lead tokens are configured.
    lead_re: Option<Regex>,
    renumber: bool,
}

impl ProgramSplitter {
    pub fn new(config: &SplitterConfig) -> Result<Self, ExtractError> {
        let mut alternatives: Vec<String> = Vec::new();
        if config.numbered_leads {
            alternatives.push(r"\d+\.\s".to_string());
        }
        alternatives.extend(config.lead_verbs.iter().map(|verb| regex::escape(verb)));

        let lead_re = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!("^(?:{})", alternatives.join("|"));
            tracing::trace!("Program lead pattern: {}", pattern);
            Some(Regex::new(&pattern)?)
        };

        Ok(Self { lead_re, renumber: config.renumber })
    }

    /// Cuts the text before every line that opens with a lead token, trims the pieces
    /// and drops empty ones. Renumbering also drops placeholders and rewrites numbering.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut segments: Vec<&str> = Vec::new();
        let mut seg_start = 0;
        if let Some(lead_re) = &self.lead_re {
            for (idx, _) in text.match_indices('\n') {
                let next = idx + 1;
                if lead_re.is_match(&text[next..]) {
                    segments.push(&text[seg_start..idx]);
                    seg_start = next;
                }
            }
        }
        segments.push(&text[seg_start..]);

        let programs: Vec<&str> = segments
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        tracing::debug!("Split section into {} segments", programs.len());

        if !self.renumber {
            return programs.into_iter().map(str::to_string).collect();
        }

        programs
            .into_iter()
            .filter(|p| !is_placeholder(p))
            .map(|p| LEADING_NUMBER_RE.replace(p, ""))
            // A bare "2." line carries no program of its own
            .filter(|p| !p.is_empty())
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, p))
            .collect()
    }
}
