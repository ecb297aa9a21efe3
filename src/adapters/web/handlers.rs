//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use tower_sessions::Session;

use crate::domain::error::AcademyError;
use crate::domain::intro::COURSE_TITLE;
use crate::domain::risk::{parse_amount, CalculatorField};
use crate::domain::section::{CompletedSections, Section};
use crate::domain::session::{Action, CourseSession, Event};

use super::templates::{render_app, Feedback, PageTemplate};
use super::{is_htmx_request, AppState, WebError};

const LEARNER_KEY: &str = "learner";

fn session_error(err: tower_sessions::session::Error) -> WebError {
    AcademyError::Session {
        reason: err.to_string(),
    }
    .into()
}

async fn load_learner(session: &Session) -> Result<CourseSession, WebError> {
    let learner = session
        .get::<CourseSession>(LEARNER_KEY)
        .await
        .map_err(session_error)?;
    Ok(learner.unwrap_or_default())
}

async fn save_learner(session: &Session, learner: &CourseSession) -> Result<(), WebError> {
    session
        .insert(LEARNER_KEY, learner)
        .await
        .map_err(session_error)
}

fn completion_notice(section: Section, completed: &CompletedSections) -> String {
    if completed.is_course_complete() {
        format!("Congratulations! You have completed the {COURSE_TITLE}.")
    } else {
        format!(
            "{} complete. {}/{} modules done.",
            section.title(),
            completed.count(),
            completed.total()
        )
    }
}

/// HTMX requests get the app fragment, everything else the full page.
fn render(
    state: &AppState,
    headers: &HeaderMap,
    learner: &CourseSession,
    feedback: Feedback,
) -> Result<Response, WebError> {
    let app = render_app(&state.course, learner, feedback)?;
    if is_htmx_request(headers) {
        return Ok(Html(app).into_response());
    }
    let page = PageTemplate {
        title: learner.current().title(),
        content: &app,
    };
    Ok(Html(page.render()?).into_response())
}

/// Applies `actions` in order and stores the session. Plain form posts are
/// redirected to the current section so a reload does not repeat them.
async fn apply_actions(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
    actions: &[Action],
) -> Result<Response, WebError> {
    let result: Result<Response, WebError> = async {
        let mut learner = load_learner(session).await?;
        let mut notice = None;
        for &action in actions {
            if let Event::ModuleCompleted(section) = learner.apply(&state.course, action)? {
                notice = Some(completion_notice(section, learner.completed()));
            }
        }
        save_learner(session, &learner).await?;

        if is_htmx_request(headers) {
            render(state, headers, &learner, Feedback::notice(notice))
        } else {
            Ok(Redirect::to(&format!("/section/{}", learner.current().id())).into_response())
        }
    }
    .await;
    result.map_err(|e| e.for_request(headers))
}

async fn open(
    state: &AppState,
    headers: &HeaderMap,
    session: &Session,
    section: Section,
) -> Result<Response, WebError> {
    let result: Result<Response, WebError> = async {
        let mut learner = load_learner(session).await?;
        if learner.apply(&state.course, Action::Open(section))? != Event::Unchanged {
            save_learner(session, &learner).await?;
        }
        render(state, headers, &learner, Feedback::default())
    }
    .await;
    result.map_err(|e| e.for_request(headers))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    open(&state, &headers, &session, Section::Intro).await
}

pub async fn section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    let section: Section = id
        .parse()
        .map_err(|e: AcademyError| WebError::from(e).for_request(&headers))?;
    open(&state, &headers, &session, section).await
}

pub async fn start(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Start]).await
}

pub async fn next(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Next]).await
}

pub async fn previous(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Previous]).await
}

pub async fn reveal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Reveal]).await
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Submit]).await
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Complete]).await
}

/// `index` is 0-based: a scenario, a strategy or a quiz option.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    headers: HeaderMap,
    session: Session,
) -> Result<Response, WebError> {
    apply_actions(&state, &headers, &session, &[Action::Select(index)]).await
}

/// Calculator fields as typed. Missing fields keep their current value.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CalculatorForm {
    pub account_size: Option<String>,
    pub risk_percent: Option<String>,
    pub entry_price: Option<String>,
    pub stop_loss: Option<String>,
}

impl CalculatorForm {
    /// Inputs for every field that parses, and the first field that did not.
    fn parse(&self) -> (Vec<Action>, Option<AcademyError>) {
        let raw = [
            (CalculatorField::AccountSize, &self.account_size),
            (CalculatorField::RiskPercent, &self.risk_percent),
            (CalculatorField::EntryPrice, &self.entry_price),
            (CalculatorField::StopLoss, &self.stop_loss),
        ];
        let mut actions = Vec::new();
        let mut problem = None;
        for (field, value) in raw {
            let Some(value) = value else { continue };
            match parse_amount(field, value) {
                Ok(amount) => actions.push(Action::SetInput(field, amount)),
                Err(e) => {
                    problem.get_or_insert(e);
                }
            }
        }
        (actions, problem)
    }
}

/// Recomputes the position size. Unreadable input keeps the last good values
/// and is reported inside the calculator rather than as an error page.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    Form(form): Form<CalculatorForm>,
) -> Result<Response, WebError> {
    let (actions, problem) = form.parse();
    let Some(problem) = problem else {
        return apply_actions(&state, &headers, &session, &actions).await;
    };

    let result: Result<Response, WebError> = async {
        let mut learner = load_learner(&session).await?;
        if learner.current() != Section::Risk {
            return Err(AcademyError::InvalidAction {
                section: learner.current().title().to_string(),
                action: "calculate".to_string(),
            }
            .into());
        }
        for &action in &actions {
            learner.apply(&state.course, action)?;
        }
        save_learner(&session, &learner).await?;
        let feedback = Feedback {
            input_problem: Some(problem.to_string()),
            ..Feedback::default()
        };
        render(&state, &headers, &learner, feedback)
    }
    .await;
    result.map_err(|e| e.for_request(&headers))
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
