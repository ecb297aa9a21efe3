#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Full page vs HTMX fragment responses
//! - Per-browser session state carried by the session cookie
//! - Calculator form submission
//! - Error statuses for unknown routes, bad input and invalid actions
//! - HTMX error fragments that retarget the app
//! - Session expiry and the session store
//! - Static files

mod common;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use swingacademy::adapters::web::{build_router, AppState, LearnerStore};
use tower::ServiceExt;

use common::*;

fn test_state() -> AppState {
    AppState::new(
        seeded_course(11),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
    )
}

fn create_test_app() -> Router {
    build_router(test_state())
}

async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).into_owned()
}

/// Browser stand-in that keeps the session cookie between requests.
struct Browser {
    app: Router,
    cookie: Option<String>,
    htmx: bool,
}

impl Browser {
    fn new(htmx: bool) -> Self {
        Self {
            app: create_test_app(),
            cookie: None,
            htmx,
        }
    }

    async fn send(&mut self, method: &str, uri: &str, form: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if self.htmx {
            builder = builder.header("HX-Request", "true");
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap_or("");
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str) -> Response<Body> {
        self.send("POST", uri, None).await
    }
}

mod pages {
    use super::*;

    #[tokio::test]
    async fn index_renders_full_page() {
        let mut browser = Browser::new(false);
        let response = browser.get("/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<main id="app">"#));
        assert!(html.contains("What is Swing Trading?"));
        assert!(html.contains("0/5 modules"));
    }

    #[tokio::test]
    async fn htmx_request_gets_fragment() {
        let mut browser = Browser::new(true);
        let html = body_text(browser.get("/").await).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.trim_start().starts_with(r#"<main id="app">"#));
    }

    #[tokio::test]
    async fn section_page_opens_that_section() {
        let mut browser = Browser::new(false);
        let html = body_text(browser.get("/section/risk").await).await;
        assert!(html.contains("Position Size Calculator"));
        assert!(html.contains("100 shares"));
    }

    #[tokio::test]
    async fn quiz_page_shows_first_question() {
        let mut browser = Browser::new(true);
        let html = body_text(browser.get("/section/quiz").await).await;
        assert!(html.contains("Question 1 of 10"));
        assert!(html.contains(r#"hx-post="/select/3""#));
    }

    #[tokio::test]
    async fn scenario_page_embeds_svg_charts() {
        let mut browser = Browser::new(true);
        let html = body_text(browser.get("/section/timeframes").await).await;
        assert!(html.contains("<svg"));
        assert!(html.contains("Strong Alignment"));
    }
}

mod session_flow {
    use super::*;

    #[tokio::test]
    async fn state_survives_between_requests() {
        let mut browser = Browser::new(true);
        let html = body_text(browser.post("/start").await).await;
        assert!(html.contains("Pattern 1 of 4"));
        assert!(browser.cookie.is_some(), "start should set a session cookie");

        let html = body_text(browser.post("/next").await).await;
        assert!(html.contains("Pattern 2 of 4"));

        let html = body_text(browser.post("/reveal").await).await;
        assert!(html.contains("Trading Signal"));
    }

    #[tokio::test]
    async fn separate_browsers_do_not_share_progress() {
        let mut first = Browser::new(true);
        first.get("/section/risk").await;
        let html = body_text(first.post("/complete").await).await;
        assert!(html.contains("1/5 modules"));

        let mut second = Browser::new(true);
        let html = body_text(second.get("/").await).await;
        assert!(html.contains("0/5 modules"));
    }

    #[tokio::test]
    async fn completing_a_module_shows_a_notice() {
        let mut browser = Browser::new(true);
        browser.get("/section/risk").await;
        let html = body_text(browser.post("/complete").await).await;
        assert!(html.contains("Risk Management complete. 1/5 modules done."));
        assert!(html.contains("Module completed."));
    }

    #[tokio::test]
    async fn plain_form_post_redirects_to_current_section() {
        let mut browser = Browser::new(false);
        let response = browser.post("/start").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/section/patterns"
        );
    }

    #[tokio::test]
    async fn quiz_answer_is_marked() {
        let mut browser = Browser::new(true);
        browser.get("/section/quiz").await;
        browser.post(&format!("/select/{}", ANSWER_KEY[0])).await;
        let html = body_text(browser.post("/submit").await).await;
        assert!(html.contains("Correct!"));
        assert!(html.contains("Score: 1/1"));
    }

    #[tokio::test]
    async fn perfect_quiz_shows_results() {
        let mut browser = Browser::new(true);
        browser.get("/section/quiz").await;
        let mut html = String::new();
        for (i, answer) in ANSWER_KEY.iter().enumerate() {
            browser.post(&format!("/select/{answer}")).await;
            html = body_text(browser.post("/submit").await).await;
            if i + 1 < ANSWER_KEY.len() {
                browser.post("/next").await;
            }
        }
        assert!(html.contains("Quiz Complete: 10/10 (100%)"));

        let html = body_text(browser.post("/complete").await).await;
        assert!(html.contains("1/5 modules"));
    }
}

mod calculator {
    use super::*;

    #[tokio::test]
    async fn form_resizes_position() {
        let mut browser = Browser::new(true);
        browser.get("/section/risk").await;
        let response = browser
            .send(
                "POST",
                "/risk/calculate",
                Some("account_size=10000&risk_percent=1&entry_price=20&stop_loss=19"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("$100.00"));
        assert!(html.contains("100 shares"));
        assert!(html.contains("$2,000.00"));
    }

    #[tokio::test]
    async fn single_changed_field_recomputes() {
        let mut browser = Browser::new(true);
        browser.get("/section/risk").await;
        let response = browser
            .send("POST", "/risk/calculate", Some("stop_loss=49"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"<div id="calc-results">"#));
        assert!(html.contains("200 shares"));
        assert!(html.contains("$10,000.00"));
    }

    #[tokio::test]
    async fn form_recomputes_as_the_learner_types() {
        let mut browser = Browser::new(true);
        let html = body_text(browser.get("/section/risk").await).await;
        assert!(html.contains(r#"hx-trigger="input delay:300ms, submit""#));
        assert!(html.contains(r##"hx-target="#calc-results""##));
    }

    #[tokio::test]
    async fn non_numeric_input_is_shown_in_the_calculator() {
        let mut browser = Browser::new(true);
        browser.get("/section/risk").await;
        let response = browser
            .send(
                "POST",
                "/risk/calculate",
                Some("account_size=lots&risk_percent=1&entry_price=20&stop_loss=19"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"<div id="calc-results">"#));
        assert!(html.contains("invalid account_size"));
        assert!(html.contains("100 shares"), "valid fields still apply");
    }

    #[tokio::test]
    async fn cleared_field_is_shown_in_the_calculator() {
        let mut browser = Browser::new(true);
        browser.get("/section/risk").await;
        let response = browser
            .send("POST", "/risk/calculate", Some("entry_price="))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("invalid entry_price"));
    }

    #[tokio::test]
    async fn bad_input_outside_risk_section_conflicts() {
        let mut browser = Browser::new(true);
        let response = browser
            .send("POST", "/risk/calculate", Some("stop_loss=soon"))
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn calculating_outside_risk_section_conflicts() {
        let mut browser = Browser::new(true);
        let response = browser
            .send(
                "POST",
                "/risk/calculate",
                Some("account_size=10000&risk_percent=1&entry_price=20&stop_loss=19"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn unknown_section_is_not_found() {
        let mut browser = Browser::new(false);
        let response = browser.get("/section/charts").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let mut browser = Browser::new(false);
        let response = browser.get("/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("page not found"));
    }

    #[tokio::test]
    async fn reveal_on_intro_conflicts() {
        let mut browser = Browser::new(true);
        let response = browser.post("/reveal").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn htmx_error_is_a_retargeted_fragment() {
        let mut browser = Browser::new(true);
        let response = browser.post("/reveal").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()["HX-Retarget"], "#app");
        assert_eq!(response.headers()["HX-Reswap"], "outerHTML");

        let html = body_text(response).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.trim_start().starts_with(r#"<main id="app">"#));
        assert!(html.contains("cannot reveal in"));
    }

    #[tokio::test]
    async fn plain_error_is_a_full_page() {
        let mut browser = Browser::new(false);
        let response = browser.post("/reveal").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(response.headers().get("HX-Retarget").is_none());
        assert!(body_text(response).await.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn htmx_unknown_section_is_a_fragment() {
        let mut browser = Browser::new(true);
        let response = browser.get("/section/charts").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["HX-Retarget"], "#app");
    }

    #[tokio::test]
    async fn quiz_option_out_of_range_is_bad_request() {
        let mut browser = Browser::new(true);
        browser.get("/section/quiz").await;
        let response = browser.post("/select/7").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod sessions {
    use super::*;

    #[tokio::test]
    async fn cookie_expires_after_idle_time() {
        let mut browser = Browser::new(true);
        let response = browser.post("/start").await;
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=3600"), "cookie was {cookie}");
    }

    #[tokio::test]
    async fn configured_idle_time_sets_cookie_age() {
        let mut state = test_state();
        state.session_idle_minutes = 15;
        let app = build_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/start")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=900"), "cookie was {cookie}");
    }

    #[tokio::test]
    async fn saved_progress_lands_in_the_shared_store() {
        let store = LearnerStore::default();
        let mut state = test_state();
        state.sessions = store.clone();
        let mut browser = Browser {
            app: build_router(state),
            cookie: None,
            htmx: true,
        };
        assert!(store.is_empty().await);

        browser.post("/start").await;
        browser.post("/next").await;
        assert_eq!(store.len().await, 1);
    }
}

mod static_files {
    use super::*;

    #[tokio::test]
    async fn stylesheet_is_served() {
        let mut browser = Browser::new(false);
        let response = browser.get("/static/academy.css").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
