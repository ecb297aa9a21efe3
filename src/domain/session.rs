//! Per-learner session state and the action dispatcher shared by the
//! terminal and web front ends.

use crate::domain::course::Course;
use crate::domain::error::AcademyError;
use crate::domain::pattern::PatternWalkthrough;
use crate::domain::quiz::QuizSession;
use crate::domain::risk::{CalculatorField, PositionInputs};
use crate::domain::section::{CompletedSections, Section};
use crate::domain::stepper::{Advance, Stepper};

/// Local state of the open section. Replaced whenever another section is
/// opened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub enum Screen {
    Intro,
    Patterns(PatternWalkthrough),
    Risk(PositionInputs),
    Timeframes(Stepper),
    Entries(Stepper),
    Quiz(QuizSession),
}

impl Screen {
    pub fn open(section: Section, course: &Course) -> Self {
        match section {
            Section::Intro => Screen::Intro,
            Section::Patterns => Screen::Patterns(PatternWalkthrough::new()),
            Section::Risk => Screen::Risk(course.settings().calculator),
            Section::Timeframes => Screen::Timeframes(Stepper::new(course.item_count(section))),
            Section::Entries => Screen::Entries(Stepper::new(course.item_count(section))),
            Section::Quiz => Screen::Quiz(QuizSession::new()),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Screen::Intro => Section::Intro,
            Screen::Patterns(_) => Section::Patterns,
            Screen::Risk(_) => Section::Risk,
            Screen::Timeframes(_) => Section::Timeframes,
            Screen::Entries(_) => Section::Entries,
            Screen::Quiz(_) => Section::Quiz,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Open(Section),
    Start,
    Next,
    Previous,
    Reveal,
    /// 0-based item or option index.
    Select(usize),
    SetInput(CalculatorField, f64),
    Submit,
    Complete,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Open(_) => "open",
            Action::Start => "start",
            Action::Next => "go next",
            Action::Previous => "go back",
            Action::Reveal => "reveal",
            Action::Select(_) => "select",
            Action::SetInput(..) => "set input",
            Action::Submit => "submit",
            Action::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Opened(Section),
    Updated,
    /// Emitted once per module, on its first completion.
    ModuleCompleted(Section),
    Unchanged,
}

enum Outcome {
    Done(Event),
    Open(Section),
    Complete,
}

fn advance_outcome(advance: Advance) -> Outcome {
    match advance {
        Advance::Moved(_) => Outcome::Done(Event::Updated),
        Advance::Finished => Outcome::Complete,
        Advance::AlreadyFinished => Outcome::Done(Event::Unchanged),
    }
}

fn moved(changed: bool) -> Outcome {
    Outcome::Done(if changed { Event::Updated } else { Event::Unchanged })
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseSession {
    screen: Screen,
    completed: CompletedSections,
}

impl Default for CourseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseSession {
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            completed: CompletedSections::default(),
        }
    }

    pub fn starting_at(course: &Course, section: Section) -> Self {
        Self {
            screen: Screen::open(section, course),
            completed: CompletedSections::default(),
        }
    }

    pub fn current(&self) -> Section {
        self.screen.section()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn completed(&self) -> &CompletedSections {
        &self.completed
    }

    pub fn apply(&mut self, course: &Course, action: Action) -> Result<Event, AcademyError> {
        let section = self.current();
        tracing::debug!(section = section.id(), action = action.name(), "applying action");

        let outcome = match (&mut self.screen, action) {
            (_, Action::Open(target)) => Outcome::Open(target),
            (Screen::Intro, Action::Start) => Outcome::Open(Section::Patterns),

            (Screen::Patterns(walk), Action::Next) => advance_outcome(walk.next()),
            (Screen::Patterns(walk), Action::Complete) if walk.stepper().is_last() => {
                advance_outcome(walk.next())
            }
            (Screen::Patterns(walk), Action::Previous) => moved(walk.previous()),
            (Screen::Patterns(walk), Action::Reveal) => {
                let changed = !walk.is_revealed();
                walk.reveal();
                moved(changed)
            }

            (Screen::Risk(inputs), Action::SetInput(field, value)) => {
                let changed = inputs.get(field) != value;
                inputs.set(field, value);
                moved(changed)
            }
            (Screen::Risk(_), Action::Complete) => Outcome::Complete,

            (Screen::Timeframes(stepper) | Screen::Entries(stepper), Action::Next) => {
                advance_outcome(stepper.next())
            }
            (Screen::Timeframes(stepper) | Screen::Entries(stepper), Action::Previous) => {
                moved(stepper.previous())
            }
            (Screen::Timeframes(stepper) | Screen::Entries(stepper), Action::Select(index)) => {
                let before = stepper.index();
                moved(stepper.select(index) != before)
            }
            (Screen::Timeframes(stepper) | Screen::Entries(stepper), Action::Complete) => {
                stepper.finish();
                Outcome::Complete
            }

            (Screen::Quiz(quiz), Action::Select(option)) => moved(quiz.select(option)?),
            (Screen::Quiz(quiz), Action::Submit) => {
                if quiz.is_submitted() {
                    Outcome::Done(Event::Unchanged)
                } else if quiz.submit().is_some() {
                    Outcome::Done(Event::Updated)
                } else {
                    return Err(AcademyError::invalid_input(
                        "option",
                        "select an answer before submitting",
                    ));
                }
            }
            (Screen::Quiz(quiz), Action::Next) => moved(quiz.next()),
            (Screen::Quiz(quiz), Action::Complete) if quiz.is_complete() => Outcome::Complete,

            (_, action) => {
                return Err(AcademyError::InvalidAction {
                    section: section.title().to_string(),
                    action: action.name().to_string(),
                });
            }
        };

        Ok(match outcome {
            Outcome::Done(event) => event,
            Outcome::Open(target) => self.open(course, target),
            Outcome::Complete => self.mark_complete(section),
        })
    }

    fn open(&mut self, course: &Course, target: Section) -> Event {
        if target == self.current() {
            return Event::Unchanged;
        }
        self.screen = Screen::open(target, course);
        Event::Opened(target)
    }

    /// Adds `section` to the completed set; idempotent.
    pub fn mark_complete(&mut self, section: Section) -> Event {
        if self.completed.mark(section) {
            tracing::debug!(
                section = section.id(),
                completed = self.completed.count(),
                "module completed"
            );
            Event::ModuleCompleted(section)
        } else {
            Event::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::course::CourseSettings;
    use crate::domain::quiz::QUESTIONS;

    fn course() -> Course {
        Course::load(CourseSettings {
            trend_seed: Some(1),
            ..CourseSettings::default()
        })
    }

    fn apply(session: &mut CourseSession, course: &Course, action: Action) -> Event {
        session.apply(course, action).unwrap()
    }

    #[test]
    fn starts_on_intro() {
        let session = CourseSession::new();
        assert_eq!(session.current(), Section::Intro);
        assert_eq!(session.completed().count(), 0);
    }

    #[test]
    fn start_opens_patterns() {
        let course = course();
        let mut session = CourseSession::new();
        assert_eq!(
            apply(&mut session, &course, Action::Start),
            Event::Opened(Section::Patterns)
        );
    }

    #[test]
    fn start_outside_intro_is_invalid() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Risk);
        let err = session.apply(&course, Action::Start).unwrap_err();
        assert!(matches!(err, AcademyError::InvalidAction { .. }));
    }

    #[test]
    fn reopening_current_section_keeps_state() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Patterns);
        apply(&mut session, &course, Action::Next);
        assert_eq!(
            apply(&mut session, &course, Action::Open(Section::Patterns)),
            Event::Unchanged
        );
        match session.screen() {
            Screen::Patterns(walk) => assert_eq!(walk.stepper().index(), 1),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn switching_sections_resets_local_state() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Patterns);
        apply(&mut session, &course, Action::Next);
        apply(&mut session, &course, Action::Open(Section::Risk));
        apply(&mut session, &course, Action::Open(Section::Patterns));
        match session.screen() {
            Screen::Patterns(walk) => assert_eq!(walk.stepper().index(), 0),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn walking_past_last_pattern_completes_once() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Patterns);
        let mut events = Vec::new();
        for _ in 0..6 {
            events.push(apply(&mut session, &course, Action::Next));
        }
        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::ModuleCompleted(Section::Patterns)))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(events[3], Event::ModuleCompleted(Section::Patterns));
        assert!(session.completed().contains(Section::Patterns));
    }

    #[test]
    fn pattern_complete_only_on_last() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Patterns);
        assert!(session.apply(&course, Action::Complete).is_err());
        for _ in 0..3 {
            apply(&mut session, &course, Action::Next);
        }
        assert_eq!(
            apply(&mut session, &course, Action::Complete),
            Event::ModuleCompleted(Section::Patterns)
        );
    }

    #[test]
    fn risk_inputs_start_from_settings() {
        let custom = Course::load(CourseSettings {
            calculator: PositionInputs {
                account_size: 25_000.0,
                ..PositionInputs::default()
            },
            trend_seed: Some(1),
            ..CourseSettings::default()
        });
        let mut session = CourseSession::new();
        apply(&mut session, &custom, Action::Open(Section::Risk));
        match session.screen() {
            Screen::Risk(inputs) => assert_eq!(inputs.account_size, 25_000.0),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn risk_set_input_and_complete() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Risk);
        assert_eq!(
            apply(&mut session, &course, Action::SetInput(CalculatorField::StopLoss, 47.0)),
            Event::Updated
        );
        assert_eq!(
            apply(&mut session, &course, Action::SetInput(CalculatorField::StopLoss, 47.0)),
            Event::Unchanged
        );
        assert_eq!(
            apply(&mut session, &course, Action::Complete),
            Event::ModuleCompleted(Section::Risk)
        );
        assert_eq!(apply(&mut session, &course, Action::Complete), Event::Unchanged);
    }

    #[test]
    fn scenario_select_clamps() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Timeframes);
        apply(&mut session, &course, Action::Select(10));
        match session.screen() {
            Screen::Timeframes(stepper) => assert_eq!(stepper.index(), 2),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn entries_next_past_end_then_complete_fires_once() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Entries);
        apply(&mut session, &course, Action::Next);
        apply(&mut session, &course, Action::Next);
        assert_eq!(
            apply(&mut session, &course, Action::Next),
            Event::ModuleCompleted(Section::Entries)
        );
        assert_eq!(apply(&mut session, &course, Action::Complete), Event::Unchanged);
        assert_eq!(session.completed().count(), 1);
    }

    #[test]
    fn quiz_flow_to_completion() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Quiz);
        assert!(session.apply(&course, Action::Submit).is_err());
        assert!(session.apply(&course, Action::Complete).is_err());

        for (i, q) in QUESTIONS.iter().enumerate() {
            apply(&mut session, &course, Action::Select(q.correct));
            apply(&mut session, &course, Action::Submit);
            if i + 1 < QUESTIONS.len() {
                assert_eq!(apply(&mut session, &course, Action::Next), Event::Updated);
            }
        }
        assert_eq!(apply(&mut session, &course, Action::Next), Event::Unchanged);
        match session.screen() {
            Screen::Quiz(quiz) => {
                assert!(quiz.is_complete());
                assert_eq!(quiz.score(), QUESTIONS.len());
            }
            other => panic!("unexpected screen {other:?}"),
        }
        assert_eq!(
            apply(&mut session, &course, Action::Complete),
            Event::ModuleCompleted(Section::Quiz)
        );
    }

    #[test]
    fn quiz_rejects_bad_option() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Quiz);
        assert!(matches!(
            session.apply(&course, Action::Select(9)),
            Err(AcademyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn unsupported_action_names_section() {
        let course = course();
        let mut session = CourseSession::starting_at(&course, Section::Risk);
        let err = session.apply(&course, Action::Reveal).unwrap_err();
        assert_eq!(err.to_string(), "cannot reveal in Risk Management");
    }

    #[test]
    fn intro_cannot_be_marked_complete() {
        let mut session = CourseSession::new();
        assert_eq!(session.mark_complete(Section::Intro), Event::Unchanged);
    }
}
