//! Plain-text rendering of course screens and full lessons.


use super::ascii_chart::{render_ascii, DEFAULT_HEIGHT};
use super::command::option_letter;
use crate::adapters::format::{money, price};
use crate::domain::course::Course;
use crate::domain::error::AcademyError;
use crate::domain::intro;
use crate::domain::pattern::{self, Pattern, PatternWalkthrough};
use crate::domain::quiz::{Question, QuizSession};
use crate::domain::risk::{self, CalculatorField, PositionInputs, PRACTICE};
use crate::domain::section::{CompletedSections, Section};
use crate::domain::session::{CourseSession, Screen};
use crate::domain::stepper::Stepper;
use crate::domain::strategy::{self, EntryStrategy};
use crate::domain::timeframe::{self, Scenario};

pub fn render_header(session: &CourseSession) -> String {
    let completed = session.completed();
    format!(
        "== {} :: {} ==  [{}/{} modules]\n",
        intro::COURSE_TITLE,
        session.current().title(),
        completed.count(),
        completed.total()
    )
}

pub fn render_menu(completed: &CompletedSections, current: Section) -> String {
    let mut out = String::from("Sections:\n");
    for section in Section::ALL {
        let mark = if completed.contains(section) { "x" } else { " " };
        let here = if section == current { " <" } else { "" };
        out.push_str(&format!("  [{mark}] {:<11} {}{here}\n", section.id(), section.title()));
    }
    out.push_str(&format!(
        "Progress: {}/{} modules completed\n",
        completed.count(),
        completed.total()
    ));
    out
}

/// Header plus the open section's current state.
pub fn render_screen(course: &Course, session: &CourseSession) -> String {
    let mut out = render_header(session);
    out.push('\n');
    let body = match session.screen() {
        Screen::Intro => intro_text(),
        Screen::Patterns(walk) => pattern_screen(walk),
        Screen::Risk(inputs) => risk_screen(course, inputs),
        Screen::Timeframes(stepper) => scenario_screen(course, stepper),
        Screen::Entries(stepper) => strategy_screen(course, stepper),
        Screen::Quiz(quiz) => quiz_screen(quiz),
    };
    out.push_str(&body);
    out
}

/// Everything a section teaches, with signals revealed and the quiz
/// answer key included.
pub fn render_lesson(course: &Course, section: Section) -> Result<String, AcademyError> {
    let mut out = format!("{}\n{}\n\n", section.title(), "=".repeat(section.title().len()));
    match section {
        Section::Intro => out.push_str(&intro_text()),
        Section::Patterns => {
            for (i, p) in course.patterns().iter().enumerate() {
                out.push_str(&format!("Pattern {} of {}\n", i + 1, course.patterns().len()));
                out.push_str(&pattern_block(p, true));
                out.push('\n');
            }
            out.push_str(&pairs("Key Pattern Concepts", pattern::KEY_CONCEPTS));
        }
        Section::Risk => {
            let settings = course.settings();
            out.push_str(&calculator_block(&settings.calculator, settings.strict_calculator));
            out.push('\n');
            out.push_str(&risk_prose());
        }
        Section::Timeframes => {
            out.push_str(timeframe::INTRO);
            out.push_str("\n\n");
            for index in 0..course.scenarios().len() {
                out.push_str(&scenario_block(course.scenario(index)?));
                out.push('\n');
            }
            out.push_str(&timeframe_prose());
        }
        Section::Entries => {
            out.push_str(strategy::INTRO);
            out.push_str("\n\n");
            for s in course.strategies() {
                out.push_str(&strategy_block(s));
                out.push('\n');
            }
            out.push_str(&exit_prose());
        }
        Section::Quiz => {
            for (i, q) in course.questions().iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, q.prompt));
                for (o, option) in q.options.iter().enumerate() {
                    let mark = if o == q.correct { "*" } else { " " };
                    out.push_str(&format!("  {mark} {}) {option}\n", option_letter(o)));
                }
                out.push_str(&format!("  {}\n\n", q.explanation));
            }
        }
    }
    Ok(out)
}

fn intro_text() -> String {
    let mut out = format!(
        "{}\n{}\n\n{}\n\n",
        intro::COURSE_TITLE,
        intro::COURSE_SUBTITLE,
        intro::WELCOME
    );
    out.push_str(&format!("What is Swing Trading?\n{}\n\n", intro::WHAT_IS_SWING_TRADING));
    out.push_str(&pairs("Core Principles", intro::CORE_PRINCIPLES));
    out.push_str(&pairs("Farley's Methodology", intro::METHODOLOGY));
    out.push_str(&pairs("Your Learning Path", intro::LEARNING_PATH));
    out.push_str("Type 'start' to begin, or 'menu' to pick a section.\n");
    out
}

fn pairs(heading: &str, items: &[(&str, &str)]) -> String {
    let mut out = format!("{heading}\n");
    for (title, text) in items {
        out.push_str(&format!("  - {title}: {text}\n"));
    }
    out.push('\n');
    out
}

fn bullets(heading: &str, items: &[&str]) -> String {
    let mut out = format!("{heading}\n");
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
    out.push('\n');
    out
}

fn position(stepper: &Stepper, noun: &str) -> String {
    format!(
        "{noun} {} of {} ({:.0}%)\n",
        stepper.index() + 1,
        stepper.len(),
        stepper.progress_percent()
    )
}

fn pattern_block(p: &Pattern, revealed: bool) -> String {
    let mut out = format!("{}\n{}\n\n", p.name, p.description);
    out.push_str(&render_ascii(&p.chart(revealed), DEFAULT_HEIGHT));
    out.push('\n');
    if revealed {
        out.push_str(&format!("Trading signal: {}\n", p.signal));
        for level in p.key_levels {
            out.push_str(&format!("  {}: {}\n", level.name, price(level.price)));
        }
    }
    out
}

fn pattern_screen(walk: &PatternWalkthrough) -> String {
    let mut out = position(walk.stepper(), "Pattern");
    out.push_str(&pattern_block(walk.current(), walk.is_revealed()));
    if !walk.is_revealed() {
        out.push_str("Type 's' to reveal the trading signal.\n");
    }
    out.push('\n');
    out.push_str(&pairs("Key Pattern Concepts", pattern::KEY_CONCEPTS));
    if walk.stepper().is_last() {
        out.push_str("Commands: s, p, next or complete to finish the module\n");
    } else {
        out.push_str("Commands: s, n, p\n");
    }
    out
}

fn calculator_block(inputs: &PositionInputs, strict: bool) -> String {
    let mut out = String::from("Position Size Calculator\n");
    for field in CalculatorField::ALL {
        out.push_str(&format!("  {:<20} {}\n", field.label(), price(inputs.get(field))));
    }
    out.push('\n');
    match inputs.calculate(strict) {
        Ok(size) => {
            out.push_str(&format!("  Risk Amount:          {}\n", money(size.risk_amount)));
            out.push_str(&format!("  Risk Per Share:       {}\n", money(size.risk_per_share)));
            out.push_str(&format!("  Position Size:        {} shares\n", size.shares));
            out.push_str(&format!("  Total Position Value: {}\n", money(size.total_value)));
        }
        Err(e) => {
            out.push_str(&format!("  Cannot size this position: {e}\n"));
        }
    }
    out
}

fn risk_prose() -> String {
    let mut out = format!("The 2% Rule\n{}\n\n", risk::TWO_PERCENT_RULE);
    out.push_str(&pairs("Stop Loss Placement", risk::STOP_PLACEMENT));
    out.push_str(&pairs("Take Profit Targets", risk::PROFIT_TARGETS));
    out.push_str("Practice Scenario\n");
    for line in PRACTICE.lines() {
        out.push_str(&format!("  {line}\n"));
    }
    let inputs = &PRACTICE.inputs;
    if let Some(ratio) = risk::reward_to_risk(inputs.entry_price, inputs.stop_loss, PRACTICE.target) {
        out.push_str(&format!(
            "  Target {} gives {} reward for a {:.0}:1 reward-to-risk ratio\n",
            money(PRACTICE.target),
            money(PRACTICE.reward()),
            ratio
        ));
    }
    out.push('\n');
    out.push_str(&pairs("Key Risk Management Principles", risk::KEY_PRINCIPLES));
    out
}

fn risk_screen(course: &Course, inputs: &PositionInputs) -> String {
    let mut out = calculator_block(inputs, course.settings().strict_calculator);
    out.push('\n');
    out.push_str(&risk_prose());
    out.push_str("Commands: account|risk|entry|stop <value>, complete\n");
    out
}

fn scenario_block(scenario: &Scenario) -> String {
    let spec = scenario.spec;
    let mut out = format!("{}\n\n", spec.title);
    for chart in &scenario.charts {
        out.push_str(&format!("{}: {}\n", chart.timeframe.name(), chart.timeframe.role()));
        out.push_str(&render_ascii(&chart.chart(), 6));
        out.push('\n');
    }
    out.push_str(&format!("Signal: {}\n", spec.signal));
    if scenario.is_power_zone() {
        out.push_str("Power zone: all timeframes agree.\n");
    }
    out.push_str(&format!("{}\n", spec.description));
    out.push_str(&format!("Action: {}\n", spec.action));
    out
}

fn timeframe_prose() -> String {
    let mut out = pairs("Key Insights", timeframe::INSIGHTS);
    out.push_str(&bullets("Multi-Timeframe Checklist", timeframe::CHECKLIST));
    out
}

fn scenario_screen(course: &Course, stepper: &Stepper) -> String {
    let mut out = format!("{}\n\n", timeframe::INTRO);
    for (i, scenario) in course.scenarios().iter().enumerate() {
        let here = if i == stepper.index() { ">" } else { " " };
        out.push_str(&format!(" {here} {}. {}\n", i + 1, scenario.spec.title));
    }
    out.push('\n');
    match course.scenario(stepper.index()) {
        Ok(scenario) => out.push_str(&scenario_block(scenario)),
        Err(e) => {
            out.push_str(&format!("{e}\n"));
        }
    }
    out.push('\n');
    out.push_str(&timeframe_prose());
    out.push_str("Commands: select <n>, n, p, complete\n");
    out
}

fn strategy_block(s: &EntryStrategy) -> String {
    let mut out = format!("{}\n{}\n\n", s.title, s.description);
    out.push_str(&render_ascii(&s.chart(), DEFAULT_HEIGHT));
    out.push('\n');
    out.push_str(&format!("  Entry:  {} ({})\n", money(s.entry.price), s.entry.label));
    out.push_str(&format!("  Stop:   {} ({})\n", money(s.stop.price), s.stop.label));
    out.push_str(&format!("  Target: {} ({})\n", money(s.target.price), s.target.label));
    out.push_str(&format!("  {}\n", s.reward_to_risk_label()));
    out.push_str("Entry Rules\n");
    for (i, rule) in s.rules.iter().enumerate() {
        out.push_str(&format!("  {}. {rule}\n", i + 1));
    }
    out
}

fn exit_prose() -> String {
    let mut out = bullets("Profit Taking", strategy::PROFIT_TAKING);
    out.push_str(&bullets("Stop Loss Exits", strategy::STOP_EXITS));
    out.push_str(&bullets("Trading Discipline", strategy::DISCIPLINE));
    out
}

fn strategy_screen(course: &Course, stepper: &Stepper) -> String {
    let mut out = format!("{}\n\n", strategy::INTRO);
    for (i, s) in course.strategies().iter().enumerate() {
        let here = if i == stepper.index() { ">" } else { " " };
        out.push_str(&format!(" {here} {}. {}\n", i + 1, s.title));
    }
    out.push('\n');
    match course.strategy(stepper.index()) {
        Ok(s) => out.push_str(&strategy_block(s)),
        Err(e) => {
            out.push_str(&format!("{e}\n"));
        }
    }
    out.push('\n');
    out.push_str(&exit_prose());
    out.push_str("Commands: select <n>, n, p, complete\n");
    out
}

fn question_block(q: &Question, quiz: &QuizSession) -> String {
    let mut out = format!("{}\n", q.prompt);
    let outcome = quiz.outcome();
    for (i, option) in q.options.iter().enumerate() {
        let chosen = if quiz.selected() == Some(i) { "*" } else { " " };
        let verdict = match outcome {
            Some(o) if i == o.correct => "  (correct)",
            Some(o) if i == o.selected => "  (your answer)",
            _ => "",
        };
        out.push_str(&format!("  {chosen} {}) {option}{verdict}\n", option_letter(i)));
    }
    if let Some(o) = outcome {
        let verdict = if o.is_correct { "Correct!" } else { "Incorrect." };
        out.push_str(&format!("\n{verdict} {}\n", q.explanation));
    }
    out
}

fn quiz_screen(quiz: &QuizSession) -> String {
    let mut out = format!(
        "Question {} of {}    Score: {}/{}\n\n",
        quiz.stepper().index() + 1,
        quiz.total(),
        quiz.score(),
        quiz.answered()
    );
    out.push_str(&question_block(quiz.current(), quiz));
    out.push('\n');

    if quiz.is_complete() {
        let tier = quiz.tier();
        out.push_str(&format!(
            "Quiz complete: {}/{} ({}%)\n{}\n\n",
            quiz.score(),
            quiz.total(),
            quiz.score_percent(),
            tier.message()
        ));
        for (i, (q, correct)) in quiz.breakdown().into_iter().enumerate() {
            let mark = if correct { "+" } else { "x" };
            out.push_str(&format!("  [{mark}] {}. {}\n", i + 1, q.prompt));
        }
        out.push_str("\nType 'complete' to finish the course.\n");
    } else if quiz.is_submitted() {
        out.push_str("Type 'n' for the next question.\n");
    } else {
        out.push_str("Choose a, b, c or d, then 'submit'.\n");
    }
    out
}
