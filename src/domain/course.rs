//! Course content bundle, loaded once at startup.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::error::AcademyError;
use crate::domain::pattern::{Pattern, PATTERNS};
use crate::domain::quiz::{Question, QUESTIONS};
use crate::domain::risk::PositionInputs;
use crate::domain::section::Section;
use crate::domain::strategy::{EntryStrategy, STRATEGIES};
use crate::domain::timeframe::{Scenario, SCENARIOS};

#[derive(Debug, Clone, PartialEq)]
pub struct CourseSettings {
    /// Values the calculator opens with.
    pub calculator: PositionInputs,
    /// Report degenerate calculator input instead of sizing zero shares.
    pub strict_calculator: bool,
    /// Seed for the timeframe charts; `None` draws from OS entropy.
    pub trend_seed: Option<u64>,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            calculator: PositionInputs::default(),
            strict_calculator: false,
            trend_seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Course {
    settings: CourseSettings,
    scenarios: Vec<Scenario>,
}

impl Course {
    pub fn load(settings: CourseSettings) -> Self {
        let mut rng = match settings.trend_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scenarios = SCENARIOS
            .iter()
            .map(|spec| Scenario::generate(spec, &mut rng))
            .collect();
        tracing::debug!(seed = ?settings.trend_seed, "course content loaded");
        Self {
            settings,
            scenarios,
        }
    }

    pub fn settings(&self) -> &CourseSettings {
        &self.settings
    }

    pub fn patterns(&self) -> &'static [Pattern] {
        PATTERNS
    }

    pub fn strategies(&self) -> &'static [EntryStrategy] {
        STRATEGIES
    }

    pub fn questions(&self) -> &'static [Question] {
        QUESTIONS
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Number of steppable items in a section's list.
    pub fn item_count(&self, section: Section) -> usize {
        match section {
            Section::Patterns => PATTERNS.len(),
            Section::Timeframes => self.scenarios.len(),
            Section::Entries => STRATEGIES.len(),
            Section::Quiz => QUESTIONS.len(),
            Section::Intro | Section::Risk => 0,
        }
    }

    pub fn pattern(&self, index: usize) -> Result<&'static Pattern, AcademyError> {
        PATTERNS.get(index).ok_or_else(|| unknown("pattern", index, PATTERNS.len()))
    }

    pub fn strategy(&self, index: usize) -> Result<&'static EntryStrategy, AcademyError> {
        STRATEGIES
            .get(index)
            .ok_or_else(|| unknown("strategy", index, STRATEGIES.len()))
    }

    pub fn scenario(&self, index: usize) -> Result<&Scenario, AcademyError> {
        self.scenarios
            .get(index)
            .ok_or_else(|| unknown("scenario", index, self.scenarios.len()))
    }
}

fn unknown(kind: &str, index: usize, available: usize) -> AcademyError {
    AcademyError::UnknownItem {
        kind: kind.to_string(),
        index: index + 1,
        available,
    }
}
