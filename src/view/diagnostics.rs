use std::sync::{Mutex, PoisonError};

use crate::questions::FilterState;
use crate::telemetry::QUESTION_FETCH_CNTR;

use super::RefreshError;

/// Where the question view reports what went wrong while refreshing.
pub trait Diagnostics: Send + Sync {
    fn fetch_succeeded(&self, filter: &FilterState, rows: usize);
    fn fetch_failed(&self, filter: &FilterState, error: &RefreshError);
    fn stale_response(&self, filter: &FilterState, sequence: u64);
}

#[derive(Default)]
pub struct TracingDiagnostics;

fn count(filter: &FilterState, outcome: &str) {
    QUESTION_FETCH_CNTR
        .with_label_values(&[filter.admission_type.code(), filter.category.code(), outcome])
        .inc();
}

impl Diagnostics for TracingDiagnostics {
    fn fetch_succeeded(&self, filter: &FilterState, rows: usize) {
        tracing::debug!(?filter, rows, "Question list refreshed");
        count(filter, "ok");
    }

    fn fetch_failed(&self, filter: &FilterState, error: &RefreshError) {
        tracing::error!(?filter, "Error fetching questions: {}", error);
        count(filter, "error");
    }

    fn stale_response(&self, filter: &FilterState, sequence: u64) {
        tracing::info!(?filter, sequence, "Dropping superseded question list");
        count(filter, "stale");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Succeeded { filter: FilterState, rows: usize },
    Failed { filter: FilterState, error: RefreshError },
    Stale { filter: FilterState, sequence: u64 },
}

/// Keeps every report in memory, for tests and for inspecting a console session.
#[derive(Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<Report>>,
}

impl RecordingDiagnostics {
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn failures(&self) -> Vec<RefreshError> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Failed { error, .. } => Some(error),
                _ => None,
            })
            .collect()
    }

    fn push(&self, report: Report) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn fetch_succeeded(&self, filter: &FilterState, rows: usize) {
        self.push(Report::Succeeded {
            filter: *filter,
            rows,
        });
    }

    fn fetch_failed(&self, filter: &FilterState, error: &RefreshError) {
        self.push(Report::Failed {
            filter: *filter,
            error: error.clone(),
        });
    }

    fn stale_response(&self, filter: &FilterState, sequence: u64) {
        self.push(Report::Stale {
            filter: *filter,
            sequence,
        });
    }
}
