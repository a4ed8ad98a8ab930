//! Server-side state of the question check console.
//!
//! [`QuestionCheck`] holds the filter pair, the rows currently on screen and the
//! loading flag. Every filter change issues one fetch; each fetch is tagged with a
//! sequence number and only the most recent one may replace the rows.

pub mod diagnostics;
pub mod edit_surface;
pub mod table;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::questions::{
    map_records, AdmissionType, FetchError, FilterState, MissingAnswerError, QuestionCategory,
    QuestionRecord, QuestionSource,
};

pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use edit_surface::{EditRequest, EditSurface, ModalSurface};
pub use table::{RowView, StatusBadge, TableView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    MissingAnswer(#[from] MissingAnswerError),
    #[error("question fetch was interrupted: {message}")]
    Interrupted { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("question {0} is not in the displayed list")]
    UnknownRow(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { rows: usize },
    Failed(RefreshError),
    /// A newer fetch was started before this one settled.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub filter: FilterState,
    pub records: Vec<QuestionRecord>,
    pub loading: bool,
}

#[derive(Default)]
struct ViewState {
    filter: FilterState,
    records: Vec<QuestionRecord>,
    loading: bool,
    latest_request: u64,
    selected: Option<QuestionRecord>,
}

impl ViewState {
    fn begin_fetch(&mut self) -> (u64, FilterState) {
        self.latest_request += 1;
        self.loading = true;
        (self.latest_request, self.filter)
    }
}

struct Inner {
    source: Arc<dyn QuestionSource>,
    diagnostics: Arc<dyn Diagnostics>,
    edit_surface: Arc<dyn EditSurface>,
    state: Mutex<ViewState>,
}

impl Inner {
    async fn fetch_and_settle(self: Arc<Self>, sequence: u64, filter: FilterState) -> RefreshOutcome {
        let result = match self.source.fetch_questions(&filter).await {
            Ok(raw) => map_records(raw).map_err(RefreshError::from),
            Err(e) => Err(RefreshError::from(e)),
        };
        self.settle(sequence, filter, result).await
    }

    async fn settle(
        &self,
        sequence: u64,
        filter: FilterState,
        result: Result<Vec<QuestionRecord>, RefreshError>,
    ) -> RefreshOutcome {
        let mut state = self.state.lock().await;
        if sequence != state.latest_request {
            drop(state);
            self.diagnostics.stale_response(&filter, sequence);
            return RefreshOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(records) => {
                let rows = records.len();
                state.records = records;
                drop(state);
                self.diagnostics.fetch_succeeded(&filter, rows);
                RefreshOutcome::Applied { rows }
            }
            Err(error) => {
                drop(state);
                self.diagnostics.fetch_failed(&filter, &error);
                RefreshOutcome::Failed(error)
            }
        }
    }
}

#[derive(Clone)]
pub struct QuestionCheck {
    inner: Arc<Inner>,
}

impl QuestionCheck {
    pub fn new(
        source: Arc<dyn QuestionSource>,
        diagnostics: Arc<dyn Diagnostics>,
        edit_surface: Arc<dyn EditSurface>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                diagnostics,
                edit_surface,
                state: Mutex::new(ViewState::default()),
            }),
        }
    }

    /// Fresh page load: default filters, no rows, edit surface closed, one fetch.
    pub async fn mount(&self) -> RefreshOutcome {
        let (sequence, filter) = {
            let mut state = self.inner.state.lock().await;
            state.filter = FilterState::default();
            state.records.clear();
            state.selected = None;
            state.begin_fetch()
        };
        self.inner.edit_surface.close();
        self.run(sequence, filter).await
    }

    /// Returns `None` when the type was already selected and nothing was fetched.
    pub async fn set_type(&self, admission_type: AdmissionType) -> Option<RefreshOutcome> {
        self.update_filter(|f| f.admission_type = admission_type)
            .await
    }

    pub async fn set_category(&self, category: QuestionCategory) -> Option<RefreshOutcome> {
        self.update_filter(|f| f.category = category).await
    }

    pub async fn set_filter(&self, filter: FilterState) -> Option<RefreshOutcome> {
        self.update_filter(|f| *f = filter).await
    }

    /// Applies `change` under one lock; a single fetch is issued if the pair differs afterwards.
    pub async fn update_filter(
        &self,
        change: impl FnOnce(&mut FilterState),
    ) -> Option<RefreshOutcome> {
        let (sequence, filter) = {
            let mut state = self.inner.state.lock().await;
            let mut filter = state.filter;
            change(&mut filter);
            if filter == state.filter {
                return None;
            }
            state.filter = filter;
            state.begin_fetch()
        };
        Some(self.run(sequence, filter).await)
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let (sequence, filter) = self.inner.state.lock().await.begin_fetch();
        self.run(sequence, filter).await
    }

    // The fetch runs on its own task so that a dropped caller cannot leave `loading` set.
    async fn run(&self, sequence: u64, filter: FilterState) -> RefreshOutcome {
        tracing::debug!(sequence, ?filter, "Fetching questions");
        let task = tokio::spawn(self.inner.clone().fetch_and_settle(sequence, filter));
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = RefreshError::Interrupted {
                    message: e.to_string(),
                };
                self.inner.settle(sequence, filter, Err(error)).await
            }
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.inner.state.lock().await;
        ViewSnapshot {
            filter: state.filter,
            records: state.records.clone(),
            loading: state.loading,
        }
    }

    pub async fn filter(&self) -> FilterState {
        self.inner.state.lock().await.filter
    }

    pub async fn selected(&self) -> Option<QuestionRecord> {
        self.inner.state.lock().await.selected.clone()
    }

    /// Row click: opens the edit surface with the clicked question.
    pub async fn select_row(&self, question_id: i64) -> Result<EditRequest, ViewError> {
        let request = {
            let mut state = self.inner.state.lock().await;
            let record = state
                .records
                .iter()
                .find(|r| r.id == question_id)
                .cloned()
                .ok_or(ViewError::UnknownRow(question_id))?;
            let request = EditRequest::from(&record);
            state.selected = Some(record);
            request
        };
        self.inner.edit_surface.open(request.clone());
        Ok(request)
    }

    pub async fn close_edit(&self) {
        self.inner.state.lock().await.selected = None;
        self.inner.edit_surface.close();
    }
}
