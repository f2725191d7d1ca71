//! Page handlers
//!
//! Each form submission is one full recomputation: the action named by the
//! pressed button runs against the submitted text and the page is rebuilt.
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::state::AppState;
use crate::view::PageView;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Form,
};
use serde::Deserialize;
use sna_core::SnaError;
use std::sync::Arc;

const STYLESHEET: &str = include_str!("../../assets/style.css");

/// Which button was pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Analyze,
    Answer,
}

/// Submitted form fields
#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub article: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub action: Action,
}

/// Render the empty page
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    state.increment_requests();
    Html(PageView::default().render())
}

/// Handle a button press
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PageForm>,
) -> Result<Html<String>, AppError> {
    state.increment_requests();

    let mut view = PageView::new(form.article, form.question);

    let outcome = match form.action {
        Action::Analyze => state
            .service
            .analyze(&view.article)
            .await
            .map(|report| view.report = Some(report)),
        Action::Answer => state
            .service
            .get_answer(&view.article, &view.question)
            .await
            .map(|answer| view.answer = Some(answer)),
    };

    match outcome {
        Ok(()) => match form.action {
            Action::Analyze => state.record_analyze(),
            Action::Answer => state.record_answer(),
        },
        Err(SnaError::EmptyInput(field)) => {
            tracing::warn!(action = ?form.action, ?field, "Blank input");
            state.record_warning();
            let warning = Some(field.warning().to_string());
            match form.action {
                Action::Analyze => view.analyze_warning = warning,
                Action::Answer => view.answer_warning = warning,
            }
        }
        Err(err) => {
            state.record_error();
            return Err(err.into());
        }
    }

    Ok(Html(view.render()))
}

/// Serve the stylesheet
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
