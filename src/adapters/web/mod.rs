//! Web server adapter.
//!
//! Axum server with an HTMX front end. Each browser gets its own
//! [`CourseSession`](crate::domain::session::CourseSession) kept in an
//! in-memory session store; nothing outlives the process. Sessions idle
//! for longer than [`AppState::session_idle_minutes`] expire and are swept.

mod error;
mod handlers;
mod session_store;
mod templates;

pub use error::{status_from_error, WebError};
pub use handlers::*;
pub use session_store::LearnerStore;
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::cli::DEFAULT_SESSION_MINUTES;
use crate::domain::course::Course;
use crate::domain::error::AcademyError;

const SWEEP_PERIOD: Duration = Duration::from_secs(60);

pub struct AppState {
    pub course: Course,
    pub static_dir: PathBuf,
    pub sessions: LearnerStore,
    pub session_idle_minutes: i64,
}

impl AppState {
    pub fn new(course: Course, static_dir: PathBuf) -> Self {
        Self {
            course,
            static_dir,
            sessions: LearnerStore::default(),
            session_idle_minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let idle = time::Duration::minutes(state.session_idle_minutes);
    let sessions = SessionManagerLayer::new(state.sessions.clone())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(idle));
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/section/{id}", get(handlers::section))
        .route("/start", post(handlers::start))
        .route("/next", post(handlers::next))
        .route("/previous", post(handlers::previous))
        .route("/reveal", post(handlers::reveal))
        .route("/submit", post(handlers::submit))
        .route("/complete", post(handlers::complete))
        .route("/select/{index}", post(handlers::select))
        .route("/risk/calculate", post(handlers::calculate))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(sessions),
        )
        .with_state(Arc::new(state))
}

pub async fn serve(listen: SocketAddr, state: AppState) -> Result<(), AcademyError> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(
        %listen,
        static_dir = %state.static_dir.display(),
        session_idle_minutes = state.session_idle_minutes,
        "web server listening"
    );
    let sweeper = tokio::spawn(state.sessions.clone().sweep_every(SWEEP_PERIOD));
    let served = axum::serve(listener, build_router(state)).await;
    sweeper.abort();
    served?;
    Ok(())
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
