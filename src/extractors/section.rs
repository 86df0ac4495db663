// src/extractors/section.rs

// --- Imports ---
use crate::config::{ExtractionConfig, Strategy};
use crate::utils::error::ExtractError;
use regex::{Regex, RegexBuilder};

// --- Data Structures ---

/// Byte range of a lab section inside the document text.
/// `start` is just past the start keyword, `end` is the next end keyword or end of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionWindow {
    pub start: usize,
    pub end: usize,
}

impl SectionWindow {
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Ordered list of literal keywords, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl KeywordSet {
    pub fn new(keywords: &[String]) -> Result<Self, ExtractError> {
        let patterns = keywords
            .iter()
            .map(|k| {
                RegexBuilder::new(&regex::escape(k))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keywords: keywords.to_vec(), patterns })
    }

    /// Earliest occurrence of any keyword at or after `from`, as (start, end).
    /// Keywords matching at the same offset resolve to the one listed first.
    pub fn first_match(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let best = self
            .patterns
            .iter()
            .enumerate()
            .filter_map(|(idx, re)| re.find_at(text, from).map(|m| (idx, m.start(), m.end())))
            .min_by_key(|&(_, start, _)| start)?;
        tracing::trace!("Keyword '{}' matched at {}", self.keywords[best.0], best.1);
        Some((best.1, best.2))
    }

    /// End offsets of every non-overlapping occurrence of every keyword, sorted, without duplicates.
    pub fn all_match_ends(&self, text: &str) -> Vec<usize> {
        let mut ends: Vec<usize> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.end()))
            .collect();
        ends.sort_unstable();
        ends.dedup();
        ends
    }
}

// --- Strategies ---

/// Locates lab section windows in a document's text.
/// An empty result means no start keyword occurs in the text.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;
    fn locate(&self, text: &str) -> Vec<SectionWindow>;
}

/// Window from the earliest start keyword to the nearest end keyword after it.
pub struct SingleSectionStrategy {
    start: KeywordSet,
    end: KeywordSet,
}

impl SingleSectionStrategy {
    pub fn new(start: KeywordSet, end: KeywordSet) -> Self {
        Self { start, end }
    }
}

impl ExtractionStrategy for SingleSectionStrategy {
    fn name(&self) -> &'static str {
        "single"
    }

    fn locate(&self, text: &str) -> Vec<SectionWindow> {
        let Some((_, start)) = self.start.first_match(text, 0) else {
            return Vec::new();
        };
        let end = window_end(&self.end, text, start);
        tracing::debug!("Single section window: {}..{}", start, end);
        vec![SectionWindow { start, end }]
    }
}

/// One window per start keyword occurrence. Each window ends at the nearest end
/// keyword after its own start, so windows may overlap.
pub struct MultiSectionStrategy {
    start: KeywordSet,
    end: KeywordSet,
}

impl MultiSectionStrategy {
    pub fn new(start: KeywordSet, end: KeywordSet) -> Self {
        Self { start, end }
    }
}

impl ExtractionStrategy for MultiSectionStrategy {
    fn name(&self) -> &'static str {
        "multi"
    }

    fn locate(&self, text: &str) -> Vec<SectionWindow> {
        let windows: Vec<SectionWindow> = self
            .start
            .all_match_ends(text)
            .into_iter()
            .map(|start| SectionWindow { start, end: window_end(&self.end, text, start) })
            .collect();
        tracing::debug!("Multi section windows: {:?}", windows);
        windows
    }
}

fn window_end(end_keywords: &KeywordSet, text: &str, start: usize) -> usize {
    end_keywords
        .first_match(text, start)
        .map(|(end, _)| end)
        .unwrap_or(text.len())
}

/// Builds the strategy named by the config, with its keyword sets compiled.
pub fn strategy_for(config: &ExtractionConfig) -> Result<Box<dyn ExtractionStrategy>, ExtractError> {
    let start = KeywordSet::new(&config.start_keywords)?;
    let end = KeywordSet::new(&config.end_keywords)?;
    Ok(match config.strategy {
        Strategy::Single => Box::new(SingleSectionStrategy::new(start, end)),
        Strategy::Multi => Box::new(MultiSectionStrategy::new(start, end)),
    })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> KeywordSet {
        let owned: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        KeywordSet::new(&owned).unwrap()
    }

    #[test]
    fn test_first_match_takes_earliest_position_not_list_order() {
        let set = keywords(&["Experiments", "List of Experiments"]);
        let text = "Intro\nList of Experiments\n1. Write";
        // "List of Experiments" starts earlier than its inner "Experiments"
        assert_eq!(set.first_match(text, 0), Some((6, 25)));
    }

    #[test]
    fn test_first_match_is_case_insensitive_and_literal() {
        let set = keywords(&["Programming Exercises:"]);
        assert_eq!(set.first_match("PROGRAMMING EXERCISES: x", 0), Some((0, 22)));
        assert_eq!(set.first_match("Programming Exercises x", 0), None);

        let dotted = keywords(&["SEE for IC."]);
        assert_eq!(dotted.first_match("SEE for ICs", 0), None);
    }

    #[test]
    fn test_first_match_ties_prefer_earlier_keyword() {
        let set = keywords(&["Lab", "Lab Section"]);
        assert_eq!(set.first_match("Lab Section 1", 0), Some((0, 3)));
    }

    #[test]
    fn test_single_section_window_bounds() {
        let strategy = SingleSectionStrategy::new(
            keywords(&["List of Experiments"]),
            keywords(&["Course outcomes", "Assessment Details"]),
        );
        let text = "Header\nList of Experiments\nWrite a program\nAssessment Details\nCourse outcomes";
        let windows = strategy.locate(text);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].slice(text), "\nWrite a program\n");
    }

    #[test]
    fn test_single_section_runs_to_end_without_end_keyword() {
        let strategy = SingleSectionStrategy::new(keywords(&["Experiments"]), keywords(&["Course outcomes"]));
        let text = "Experiments\nWrite a program";
        let windows = strategy.locate(text);
        assert_eq!(windows, vec![SectionWindow { start: 11, end: text.len() }]);
    }

    #[test]
    fn test_end_keyword_before_start_is_ignored() {
        let strategy = SingleSectionStrategy::new(keywords(&["Experiments"]), keywords(&["Course outcomes"]));
        let text = "Course outcomes\nExperiments\nDesign a filter";
        assert_eq!(strategy.locate(text)[0].slice(text), "\nDesign a filter");
    }

    #[test]
    fn test_no_start_keyword_yields_no_windows() {
        let single = SingleSectionStrategy::new(keywords(&["Lab Section"]), keywords(&["Course outcomes"]));
        let multi = MultiSectionStrategy::new(keywords(&["Lab Section"]), keywords(&["Course outcomes"]));
        let text = "Course outcomes\nNothing relevant here";
        assert!(single.locate(text).is_empty());
        assert!(multi.locate(text).is_empty());
    }

    #[test]
    fn test_multi_section_windows_are_sorted_and_independent() {
        let strategy = MultiSectionStrategy::new(
            keywords(&["Lab Section", "Laboratory Component"]),
            keywords(&["Course outcomes"]),
        );
        let text = "Laboratory Component\nA\nCourse outcomes\nLab Section\nB\nCourse outcomes\n";
        let windows = strategy.locate(text);
        let slices: Vec<&str> = windows.iter().map(|w| w.slice(text)).collect();
        assert_eq!(slices, vec!["\nA\n", "\nB\n"]);
    }

    #[test]
    fn test_multi_section_windows_may_overlap() {
        let strategy = MultiSectionStrategy::new(keywords(&["Lab Section"]), keywords(&["Course outcomes"]));
        let text = "Lab Section\nA\nLab Section\nB\nCourse outcomes";
        let windows = strategy.locate(text);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].slice(text), "\nA\nLab Section\nB\n");
        assert_eq!(windows[1].slice(text), "\nB\n");
    }

    #[test]
    fn test_multi_section_merges_keywords_ending_at_same_offset() {
        let strategy = MultiSectionStrategy::new(
            keywords(&["List of Experiments", "Experiments"]),
            keywords(&["Course outcomes"]),
        );
        let text = "List of Experiments\nWrite a program\nCourse outcomes";
        assert_eq!(strategy.locate(text).len(), 1);
    }

    #[test]
    fn test_strategy_for_follows_config() {
        let mut config = ExtractionConfig::extended();
        assert_eq!(strategy_for(&config).unwrap().name(), "multi");
        config.strategy = Strategy::Single;
        assert_eq!(strategy_for(&config).unwrap().name(), "single");
    }
}
