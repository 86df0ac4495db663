// src/extractors/mod.rs
pub mod cleaner;
pub mod section;
pub mod splitter;

use crate::config::{ExtractionConfig, Strategy};
use crate::utils::error::ExtractError;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use cleaner::TextCleaner;
#[allow(unused_imports)]
pub use section::{
    ExtractionStrategy,
    KeywordSet,
    MultiSectionStrategy,
    SectionWindow,
    SingleSectionStrategy,
};
pub use splitter::ProgramSplitter;

pub const NO_PROGRAMS_FOUND: &str = "No lab programs found.";

/// Result of running the extraction pipeline over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabPrograms {
    /// No start keyword occurs in the text
    NotFound,
    /// Single-section strategy: one flat list
    Programs(Vec<String>),
    /// Multi-section strategy: one list per located section
    Sections(Vec<Vec<String>>),
}

impl LabPrograms {
    pub fn section_count(&self) -> usize {
        match self {
            LabPrograms::NotFound => 0,
            LabPrograms::Programs(_) => 1,
            LabPrograms::Sections(sections) => sections.len(),
        }
    }

    pub fn program_count(&self) -> usize {
        match self {
            LabPrograms::NotFound => 0,
            LabPrograms::Programs(programs) => programs.len(),
            LabPrograms::Sections(sections) => sections.iter().map(Vec::len).sum(),
        }
    }
}

/// Runs locate -> clean -> split over a document's text. Performs no I/O.
pub fn process(text: &str, config: &ExtractionConfig) -> Result<LabPrograms, ExtractError> {
    let strategy = section::strategy_for(config)?;
    let cleaner = TextCleaner::new(&config.cleaner);
    let splitter = ProgramSplitter::new(&config.splitter)?;

    let windows = strategy.locate(text);
    if windows.is_empty() {
        tracing::warn!("No start keyword found using {} strategy", strategy.name());
        return Ok(LabPrograms::NotFound);
    }
    tracing::info!("Located {} lab section(s) using {} strategy", windows.len(), strategy.name());

    let mut sections: Vec<Vec<String>> = windows
        .iter()
        .map(|window| splitter.split(&cleaner.clean(window.slice(text))))
        .collect();

    Ok(match config.strategy {
        Strategy::Single => {
            LabPrograms::Programs(sections.pop().unwrap_or_default())
        }
        Strategy::Multi => {
            if !config.retain_empty_sections {
                let before = sections.len();
                sections.retain(|programs| !programs.is_empty());
                if sections.len() < before {
                    tracing::debug!("Omitted {} empty section(s)", before - sections.len());
                }
            }
            LabPrograms::Sections(sections)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_extended() -> ExtractionConfig {
        ExtractionConfig { strategy: Strategy::Single, ..ExtractionConfig::extended() }
    }

    #[test]
    fn test_numbered_list_single_section() {
        let text = "List of Experiments\n1. Write a program to add two numbers\n2. Write a program to sort an array\nCourse outcomes\n...";
        let result = process(text, &single_extended()).unwrap();
        assert_eq!(
            result,
            LabPrograms::Programs(vec![
                "1. Write a program to add two numbers".to_string(),
                "2. Write a program to sort an array".to_string(),
            ])
        );
    }

    #[test]
    fn test_dates_and_page_numbers_removed_inside_section() {
        let text = "List of Experiments\nWrite a program to add\n11.12.2022\n7\nWrite a program to sort\nCourse outcomes";
        let result = process(text, &single_extended()).unwrap();
        assert_eq!(
            result,
            LabPrograms::Programs(vec![
                "1. Write a program to add".to_string(),
                "2. Write a program to sort".to_string(),
            ])
        );
    }

    #[test]
    fn test_two_sections_are_numbered_independently() {
        let text = "List of Experiments\n1. Write A\n2. Write B\nCourse outcomes\n\
                    Theory part\nList of Experiments\n4. Develop C\n5. Develop D\n6. Develop E\nCourse outcomes\n";
        let result = process(text, &ExtractionConfig::extended()).unwrap();
        assert_eq!(
            result,
            LabPrograms::Sections(vec![
                vec!["1. Write A".to_string(), "2. Write B".to_string()],
                vec!["1. Develop C".to_string(), "2. Develop D".to_string(), "3. Develop E".to_string()],
            ])
        );
        assert_eq!(result.section_count(), 2);
        assert_eq!(result.program_count(), 5);
    }

    #[test]
    fn test_missing_start_keyword_is_not_found() {
        let text = "Course outcomes\nStudents will learn things\n";
        assert_eq!(process(text, &ExtractionConfig::extended()).unwrap(), LabPrograms::NotFound);
        assert_eq!(process(text, &ExtractionConfig::basic()).unwrap(), LabPrograms::NotFound);
    }

    #[test]
    fn test_empty_sections_omitted_unless_retained() {
        let text = "Lab Section\n1. :\nCourse outcomes\nLab Section\nImplement a queue\nCourse outcomes";
        let mut config = ExtractionConfig::extended();
        assert_eq!(
            process(text, &config).unwrap(),
            LabPrograms::Sections(vec![vec!["1. Implement a queue".to_string()]])
        );

        config.retain_empty_sections = true;
        assert_eq!(
            process(text, &config).unwrap(),
            LabPrograms::Sections(vec![vec![], vec!["1. Implement a queue".to_string()]])
        );
    }

    #[test]
    fn test_basic_profile_keeps_entries_unnumbered() {
        let text = "Programming Exercises:\nWrite a program to reverse\na string\nDesign a calculator\nAssessment Details";
        assert_eq!(
            process(text, &ExtractionConfig::basic()).unwrap(),
            LabPrograms::Programs(vec![
                "Write a program to reverse\na string".to_string(),
                "Design a calculator".to_string(),
            ])
        );
    }

    #[test]
    fn test_single_section_without_programs_is_empty_list() {
        let text = "List of Experiments\n12\nCourse outcomes";
        assert_eq!(process(text, &single_extended()).unwrap(), LabPrograms::Programs(vec![]));
    }

    #[test]
    fn test_entries_never_blank() {
        let text = "Laboratory Component\n\n  \n1.\n2. Write x\n \n3.   Simulate y\n\nTeaching-Learning Process";
        let result = process(text, &ExtractionConfig::extended()).unwrap();
        let LabPrograms::Sections(sections) = result else {
            panic!("expected sections");
        };
        for section in &sections {
            for (i, program) in section.iter().enumerate() {
                assert!(!program.trim().is_empty());
                assert!(program.starts_with(&format!("{}. ", i + 1)));
            }
        }
        assert_eq!(sections, vec![vec!["1. Write x".to_string(), "2. Simulate y".to_string()]]);
    }
}
