// src/extractors/cleaner.rs

// --- Imports ---
use crate::config::CleanerConfig;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Line Patterns (Lazy Static) ---
// e.g. "11.12.2022" printed in page headers/footers
static DATE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").expect("Failed to compile DATE_LINE_RE")
});

static PAGE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+$").expect("Failed to compile PAGE_NUMBER_RE")
});

// Empty numbered slot left in syllabus templates, e.g. "1. :"
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s*:$").expect("Failed to compile PLACEHOLDER_RE")
});

// --- Predicates ---
// All predicates expect an already trimmed line.

pub fn is_date_line(line: &str) -> bool {
    DATE_LINE_RE.is_match(line)
}

pub fn is_page_number(line: &str) -> bool {
    PAGE_NUMBER_RE.is_match(line)
}

pub fn is_placeholder(line: &str) -> bool {
    PLACEHOLDER_RE.is_match(line)
}

pub fn is_boilerplate_heading(line: &str, headings: &[String]) -> bool {
    let lowered = line.to_lowercase();
    headings.iter().any(|h| h.to_lowercase() == lowered)
}

/// Drops page furniture lines from extracted text.
pub struct TextCleaner<'a> {
    config: &'a CleanerConfig,
}

impl<'a> TextCleaner<'a> {
    pub fn new(config: &'a CleanerConfig) -> Self {
        Self { config }
    }

    /// True if the trimmed line carries no program text.
    pub fn is_noise(&self, line: &str) -> bool {
        line.is_empty()
            || (self.config.drop_dates && is_date_line(line))
            || (self.config.drop_page_numbers && is_page_number(line))
            || (self.config.drop_placeholders && is_placeholder(line))
            || is_boilerplate_heading(line, &self.config.boilerplate_headings)
    }

    /// Trims every line and removes noise lines, keeping the order of the rest.
    pub fn clean(&self, text: &str) -> String {
        let mut dropped = 0usize;
        let kept: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| {
                let noise = self.is_noise(line);
                if noise && !line.is_empty() {
                    tracing::trace!("Dropping noise line: '{}'", line);
                    dropped += 1;
                }
                !noise
            })
            .collect();
        tracing::debug!("Cleaner kept {} lines, dropped {} noise lines", kept.len(), dropped);
        kept.join("\n")
    }
}
