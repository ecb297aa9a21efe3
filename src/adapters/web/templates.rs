//! HTML templates using Askama, and the view models feeding them.

use askama::Template;

use crate::adapters::format::{money, price};
use crate::adapters::svg_chart::render_svg;
use crate::domain::course::Course;
use crate::domain::error::AcademyError;
use crate::domain::intro;
use crate::domain::pattern::{self, PatternWalkthrough};
use crate::domain::quiz::QuizSession;
use crate::domain::risk::{self, CalculatorField, PositionInputs, PRACTICE};
use crate::domain::section::Section;
use crate::domain::session::{CourseSession, Screen};
use crate::domain::stepper::Stepper;
use crate::domain::strategy;
use crate::domain::timeframe;

pub struct Pair {
    pub title: &'static str,
    pub text: &'static str,
}

fn pairs(items: &'static [(&'static str, &'static str)]) -> Vec<Pair> {
    items
        .iter()
        .map(|&(title, text)| Pair { title, text })
        .collect()
}

pub struct NavItem {
    pub id: &'static str,
    pub title: &'static str,
    pub active: bool,
    pub done: bool,
}

/// Entry in a selectable list of scenarios or strategies.
pub struct ListItem {
    pub index: usize,
    pub number: usize,
    pub title: &'static str,
    pub active: bool,
}

pub struct StepView {
    pub number: usize,
    pub count: usize,
    pub percent: String,
    pub is_first: bool,
    pub is_last: bool,
}

impl StepView {
    fn new(stepper: &Stepper) -> Self {
        Self {
            number: stepper.index() + 1,
            count: stepper.len(),
            percent: format!("{:.0}", stepper.progress_percent()),
            is_first: stepper.is_first(),
            is_last: stepper.is_last(),
        }
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "shell.html")]
pub struct ShellTemplate<'a> {
    pub course_title: &'static str,
    pub nav: Vec<NavItem>,
    pub completed: usize,
    pub total: usize,
    pub percent: usize,
    pub notice: Option<String>,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

#[derive(Template)]
#[template(path = "intro.html")]
pub struct IntroTemplate {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub welcome: &'static str,
    pub what_is: &'static str,
    pub principles: Vec<Pair>,
    pub methodology: Vec<Pair>,
    pub path: Vec<Pair>,
}

impl IntroTemplate {
    pub fn new() -> Self {
        Self {
            title: intro::COURSE_TITLE,
            subtitle: intro::COURSE_SUBTITLE,
            welcome: intro::WELCOME,
            what_is: intro::WHAT_IS_SWING_TRADING,
            principles: pairs(intro::CORE_PRINCIPLES),
            methodology: pairs(intro::METHODOLOGY),
            path: pairs(intro::LEARNING_PATH),
        }
    }
}

pub struct LevelView {
    pub name: &'static str,
    pub price: String,
}

#[derive(Template)]
#[template(path = "patterns.html")]
pub struct PatternsTemplate {
    pub step: StepView,
    pub name: &'static str,
    pub description: &'static str,
    pub chart_svg: String,
    pub revealed: bool,
    pub signal: &'static str,
    pub levels: Vec<LevelView>,
    pub concepts: Vec<Pair>,
}

impl PatternsTemplate {
    pub fn new(walk: &PatternWalkthrough) -> Self {
        let p = walk.current();
        Self {
            step: StepView::new(walk.stepper()),
            name: p.name,
            description: p.description,
            chart_svg: render_svg(&p.chart(walk.is_revealed())),
            revealed: walk.is_revealed(),
            signal: p.signal,
            levels: p
                .key_levels
                .iter()
                .map(|l| LevelView {
                    name: l.name,
                    price: price(l.price),
                })
                .collect(),
            concepts: pairs(pattern::KEY_CONCEPTS),
        }
    }
}

pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

pub struct SizeView {
    pub risk_amount: String,
    pub risk_per_share: String,
    pub shares: i64,
    pub total_value: String,
}

#[derive(Template)]
#[template(path = "risk.html")]
pub struct RiskTemplate {
    pub fields: Vec<FieldView>,
    pub size: Option<SizeView>,
    pub problem: Option<String>,
    pub done: bool,
    pub two_percent_rule: &'static str,
    pub stop_placement: Vec<Pair>,
    pub profit_targets: Vec<Pair>,
    pub practice: Vec<String>,
    pub principles: Vec<Pair>,
}

impl RiskTemplate {
    pub fn new(inputs: &PositionInputs, strict: bool, done: bool) -> Self {
        let (size, problem) = match inputs.calculate(strict) {
            Ok(s) => (
                Some(SizeView {
                    risk_amount: money(s.risk_amount),
                    risk_per_share: money(s.risk_per_share),
                    shares: s.shares,
                    total_value: money(s.total_value),
                }),
                None,
            ),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            fields: CalculatorField::ALL
                .iter()
                .map(|&f| FieldView {
                    key: f.key(),
                    label: f.label(),
                    value: price(inputs.get(f)),
                })
                .collect(),
            size,
            problem,
            done,
            two_percent_rule: risk::TWO_PERCENT_RULE,
            stop_placement: pairs(risk::STOP_PLACEMENT),
            profit_targets: pairs(risk::PROFIT_TARGETS),
            practice: PRACTICE.lines(),
            principles: pairs(risk::KEY_PRINCIPLES),
        }
    }
}

pub struct TimeframeChartView {
    pub name: &'static str,
    pub role: &'static str,
    pub svg: String,
}

#[derive(Template)]
#[template(path = "timeframes.html")]
pub struct TimeframesTemplate {
    pub intro: &'static str,
    pub step: StepView,
    pub items: Vec<ListItem>,
    pub title: &'static str,
    pub charts: Vec<TimeframeChartView>,
    pub signal: String,
    pub power_zone: bool,
    pub description: &'static str,
    pub action: &'static str,
    pub insights: Vec<Pair>,
    pub checklist: &'static [&'static str],
}

impl TimeframesTemplate {
    pub fn new(course: &Course, stepper: &Stepper) -> Result<Self, AcademyError> {
        let scenario = course.scenario(stepper.index())?;
        Ok(Self {
            intro: timeframe::INTRO,
            step: StepView::new(stepper),
            items: course
                .scenarios()
                .iter()
                .enumerate()
                .map(|(i, s)| ListItem {
                    index: i,
                    number: i + 1,
                    title: s.spec.title,
                    active: i == stepper.index(),
                })
                .collect(),
            title: scenario.spec.title,
            charts: scenario
                .charts
                .iter()
                .map(|c| TimeframeChartView {
                    name: c.timeframe.name(),
                    role: c.timeframe.role(),
                    svg: render_svg(&c.chart()),
                })
                .collect(),
            signal: scenario.spec.signal.to_string(),
            power_zone: scenario.is_power_zone(),
            description: scenario.spec.description,
            action: scenario.spec.action,
            insights: pairs(timeframe::INSIGHTS),
            checklist: timeframe::CHECKLIST,
        })
    }
}

#[derive(Template)]
#[template(path = "entries.html")]
pub struct EntriesTemplate {
    pub intro: &'static str,
    pub step: StepView,
    pub items: Vec<ListItem>,
    pub title: &'static str,
    pub description: &'static str,
    pub chart_svg: String,
    pub entry: String,
    pub entry_label: &'static str,
    pub stop: String,
    pub stop_label: &'static str,
    pub target: String,
    pub target_label: &'static str,
    pub ratio: String,
    pub rules: &'static [&'static str],
    pub profit_taking: &'static [&'static str],
    pub stop_exits: &'static [&'static str],
    pub discipline: &'static [&'static str],
}

impl EntriesTemplate {
    pub fn new(course: &Course, stepper: &Stepper) -> Result<Self, AcademyError> {
        let s = course.strategy(stepper.index())?;
        Ok(Self {
            intro: strategy::INTRO,
            step: StepView::new(stepper),
            items: course
                .strategies()
                .iter()
                .enumerate()
                .map(|(i, s)| ListItem {
                    index: i,
                    number: i + 1,
                    title: s.title,
                    active: i == stepper.index(),
                })
                .collect(),
            title: s.title,
            description: s.description,
            chart_svg: render_svg(&s.chart()),
            entry: money(s.entry.price),
            entry_label: s.entry.label,
            stop: money(s.stop.price),
            stop_label: s.stop.label,
            target: money(s.target.price),
            target_label: s.target.label,
            ratio: s.reward_to_risk_label(),
            rules: s.rules,
            profit_taking: strategy::PROFIT_TAKING,
            stop_exits: strategy::STOP_EXITS,
            discipline: strategy::DISCIPLINE,
        })
    }
}

pub struct OptionView {
    pub index: usize,
    pub letter: char,
    pub text: &'static str,
    pub selected: bool,
    /// CSS class once the answer is submitted.
    pub verdict: &'static str,
}

pub struct BreakdownRow {
    pub number: usize,
    pub prompt: &'static str,
    pub correct: bool,
}

pub struct ResultsView {
    pub percent: u32,
    pub tier_class: &'static str,
    pub message: &'static str,
    pub breakdown: Vec<BreakdownRow>,
}

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
    pub number: usize,
    pub total: usize,
    pub score: usize,
    pub answered: usize,
    pub prompt: &'static str,
    pub options: Vec<OptionView>,
    pub submitted: bool,
    pub has_selection: bool,
    pub is_correct: bool,
    pub explanation: &'static str,
    pub results: Option<ResultsView>,
}

impl QuizTemplate {
    pub fn new(quiz: &QuizSession) -> Self {
        let q = quiz.current();
        let outcome = quiz.outcome();
        let options = q
            .options
            .iter()
            .enumerate()
            .map(|(i, &text)| OptionView {
                index: i,
                letter: (b'A' + i as u8) as char,
                text,
                selected: quiz.selected() == Some(i),
                verdict: match outcome {
                    Some(o) if i == o.correct => "option-correct",
                    Some(o) if i == o.selected => "option-wrong",
                    _ => "",
                },
            })
            .collect();
        let results = quiz.is_complete().then(|| {
            let tier = quiz.tier();
            ResultsView {
                percent: quiz.score_percent(),
                tier_class: tier.css_class(),
                message: tier.message(),
                breakdown: quiz
                    .breakdown()
                    .into_iter()
                    .enumerate()
                    .map(|(i, (q, correct))| BreakdownRow {
                        number: i + 1,
                        prompt: q.prompt,
                        correct,
                    })
                    .collect(),
            }
        });
        Self {
            number: quiz.stepper().index() + 1,
            total: quiz.total(),
            score: quiz.score(),
            answered: quiz.answered(),
            prompt: q.prompt,
            options,
            submitted: quiz.is_submitted(),
            has_selection: quiz.selected().is_some(),
            is_correct: outcome.is_some_and(|o| o.is_correct),
            explanation: q.explanation,
            results,
        }
    }
}

/// One-off messages shown alongside the rendered section.
#[derive(Debug, Default)]
pub struct Feedback {
    /// Shown in the shell banner, e.g. after completing a module.
    pub notice: Option<String>,
    /// Calculator input that could not be used; replaces the sizing problem.
    pub input_problem: Option<String>,
}

impl Feedback {
    pub fn notice(notice: Option<String>) -> Self {
        Self {
            notice,
            input_problem: None,
        }
    }
}

/// Renders the open section wrapped in the navigation shell. This is the
/// HTMX fragment; full pages wrap it once more in [`PageTemplate`].
pub fn render_app(
    course: &Course,
    learner: &CourseSession,
    feedback: Feedback,
) -> Result<String, crate::adapters::web::WebError> {
    let done = learner.completed().contains(learner.current());
    let body = match learner.screen() {
        Screen::Intro => IntroTemplate::new().render()?,
        Screen::Patterns(walk) => PatternsTemplate::new(walk).render()?,
        Screen::Risk(inputs) => {
            let mut view = RiskTemplate::new(inputs, course.settings().strict_calculator, done);
            if feedback.input_problem.is_some() {
                view.problem = feedback.input_problem;
            }
            view.render()?
        }
        Screen::Timeframes(stepper) => TimeframesTemplate::new(course, stepper)?.render()?,
        Screen::Entries(stepper) => EntriesTemplate::new(course, stepper)?.render()?,
        Screen::Quiz(quiz) => QuizTemplate::new(quiz).render()?,
    };

    let completed = learner.completed();
    let shell = ShellTemplate {
        course_title: intro::COURSE_TITLE,
        nav: Section::ALL
            .iter()
            .map(|&s| NavItem {
                id: s.id(),
                title: s.title(),
                active: s == learner.current(),
                done: completed.contains(s),
            })
            .collect(),
        completed: completed.count(),
        total: completed.total(),
        percent: completed.count() * 100 / completed.total(),
        notice: feedback.notice,
        body: &body,
    };
    Ok(shell.render()?)
}
