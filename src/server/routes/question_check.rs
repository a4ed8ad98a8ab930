use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Router,
};
use serde::Deserialize;

use crate::{
    questions::{AdmissionType, FilterState, QuestionCategory},
    server::app::AppState,
    view::{EditRequest, ModalSurface, QuestionCheck, TableView},
};

use super::ApiResponse;

// htmx sends both selects on every change; both values are applied together as one fetch
#[derive(Deserialize)]
struct FilterQuery {
    #[serde(rename = "type")]
    admission_type: Option<AdmissionType>,
    category: Option<QuestionCategory>,
}

struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

fn type_options(filter: &FilterState) -> Vec<SelectOption> {
    AdmissionType::ALL
        .iter()
        .map(|t| SelectOption {
            value: t.code(),
            label: t.label(),
            selected: *t == filter.admission_type,
        })
        .collect()
}

fn category_options(filter: &FilterState) -> Vec<SelectOption> {
    QuestionCategory::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.code(),
            label: c.label(),
            selected: *c == filter.category,
        })
        .collect()
}

#[derive(Template, WebTemplate)]
#[template(path = "question_check/page.html")]
struct QuestionCheckPage {
    types: Vec<SelectOption>,
    categories: Vec<SelectOption>,
    table: TableView,
}

#[derive(Template, WebTemplate)]
#[template(path = "question_check/table.html")]
struct QuestionTable {
    table: TableView,
}

#[derive(Template, WebTemplate)]
#[template(path = "question_check/edit_modal.html")]
struct EditModal {
    request: Option<EditRequest>,
}

impl From<&ModalSurface> for EditModal {
    fn from(surface: &ModalSurface) -> Self {
        Self {
            request: surface.current(),
        }
    }
}

async fn question_check_page(State(view): State<QuestionCheck>) -> QuestionCheckPage {
    view.mount().await;
    let snapshot = view.snapshot().await;
    QuestionCheckPage {
        types: type_options(&snapshot.filter),
        categories: category_options(&snapshot.filter),
        table: TableView::from(&snapshot),
    }
}

async fn question_table(
    State(view): State<QuestionCheck>,
    Query(query): Query<FilterQuery>,
) -> QuestionTable {
    view.update_filter(|filter| {
        if let Some(admission_type) = query.admission_type {
            filter.admission_type = admission_type;
        }
        if let Some(category) = query.category {
            filter.category = category;
        }
    })
    .await;
    QuestionTable {
        table: TableView::from(&view.snapshot().await),
    }
}

async fn open_row(
    State(view): State<QuestionCheck>,
    State(modal): State<Arc<ModalSurface>>,
    Path(id): Path<i64>,
) -> ApiResponse<EditModal> {
    view.select_row(id).await?;
    Ok(EditModal::from(modal.as_ref()))
}

async fn close_modal(
    State(view): State<QuestionCheck>,
    State(modal): State<Arc<ModalSurface>>,
) -> EditModal {
    view.close_edit().await;
    EditModal::from(modal.as_ref())
}

pub fn question_check_router(state: AppState) -> Router {
    Router::new()
        .route("/question-check", get(question_check_page))
        .route("/question-check/table", get(question_table))
        .route("/question-check/rows/{id}", get(open_row))
        .route("/question-check/modal", delete(close_modal))
        .with_state(state)
}
