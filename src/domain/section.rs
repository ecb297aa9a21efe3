//! Course sections and the completed-module set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::AcademyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    Intro,
    Patterns,
    Risk,
    Timeframes,
    Entries,
    Quiz,
}

impl Section {
    /// Sections that can be completed, in course order.
    pub const MODULES: [Section; 5] = [
        Section::Patterns,
        Section::Risk,
        Section::Timeframes,
        Section::Entries,
        Section::Quiz,
    ];

    pub const ALL: [Section; 6] = [
        Section::Intro,
        Section::Patterns,
        Section::Risk,
        Section::Timeframes,
        Section::Entries,
        Section::Quiz,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Intro => "intro",
            Section::Patterns => "patterns",
            Section::Risk => "risk",
            Section::Timeframes => "timeframes",
            Section::Entries => "entries",
            Section::Quiz => "quiz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Intro => "Introduction",
            Section::Patterns => "Pattern Recognition",
            Section::Risk => "Risk Management",
            Section::Timeframes => "Timeframe Analysis",
            Section::Entries => "Entry & Exit Strategies",
            Section::Quiz => "Test Your Knowledge",
        }
    }

    pub fn is_module(&self) -> bool {
        !matches!(self, Section::Intro)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.id() == wanted)
            .ok_or_else(|| AcademyError::UnknownSection(s.trim().to_string()))
    }
}

/// Modules the learner has finished during this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedSections {
    sections: BTreeSet<Section>,
}

impl CompletedSections {
    /// Returns true only the first time a module is marked.
    pub fn mark(&mut self, section: Section) -> bool {
        section.is_module() && self.sections.insert(section)
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn count(&self) -> usize {
        self.sections.len()
    }

    pub fn total(&self) -> usize {
        Section::MODULES.len()
    }

    pub fn is_course_complete(&self) -> bool {
        self.count() == self.total()
    }

    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_case_insensitively() {
        assert_eq!("Risk".parse::<Section>().unwrap(), Section::Risk);
        assert_eq!(" quiz ".parse::<Section>().unwrap(), Section::Quiz);
        assert_eq!("intro".parse::<Section>().unwrap(), Section::Intro);
    }

    #[test]
    fn unknown_id_is_error() {
        let err = "charts".parse::<Section>().unwrap_err();
        assert!(matches!(err, AcademyError::UnknownSection(s) if s == "charts"));
    }

    #[test]
    fn ids_round_trip_through_parse() {
        for section in Section::ALL {
            assert_eq!(section.id().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn intro_is_not_a_module() {
        assert!(!Section::Intro.is_module());
        assert!(!Section::MODULES.contains(&Section::Intro));
    }

    #[test]
    fn mark_reports_first_completion_only() {
        let mut done = CompletedSections::default();
        assert!(done.mark(Section::Risk));
        assert!(!done.mark(Section::Risk));
        assert_eq!(done.count(), 1);
    }

    #[test]
    fn intro_cannot_be_completed() {
        let mut done = CompletedSections::default();
        assert!(!done.mark(Section::Intro));
        assert_eq!(done.count(), 0);
    }

    #[test]
    fn course_complete_after_all_modules() {
        let mut done = CompletedSections::default();
        for section in Section::MODULES {
            assert!(!done.is_course_complete());
            done.mark(section);
        }
        assert!(done.is_course_complete());
        assert_eq!(done.iter().collect::<Vec<_>>(), Section::MODULES.to_vec());
    }
}
