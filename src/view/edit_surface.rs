use std::sync::{Mutex, PoisonError};

use crate::questions::QuestionRecord;

/// What the edit dialog is opened with when an operator picks a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub modal_title: String,
    pub modal_content: String,
    pub modal_content_id: i64,
    pub question_id: i64,
    pub is_checked: bool,
}

impl From<&QuestionRecord> for EditRequest {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            modal_title: record.content.clone(),
            modal_content: record.answer.content.clone(),
            modal_content_id: record.answer.id,
            question_id: record.id,
            is_checked: record.is_checked,
        }
    }
}

/// Dialog that edits an answer and its checked status. It owns any update it performs.
pub trait EditSurface: Send + Sync {
    fn open(&self, request: EditRequest);
    fn close(&self);
}

/// Edit surface of the server-rendered console: remembers the open request so the
/// modal fragment can be rendered from it.
#[derive(Default)]
pub struct ModalSurface {
    current: Mutex<Option<EditRequest>>,
}

impl ModalSurface {
    pub fn current(&self) -> Option<EditRequest> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }
}

impl EditSurface for ModalSurface {
    fn open(&self, request: EditRequest) {
        tracing::debug!(question_id = request.question_id, "Opening edit modal");
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(request);
    }

    fn close(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::AnswerRecord;

    fn record() -> QuestionRecord {
        QuestionRecord {
            id: 3,
            content: "Is there an interview?".to_owned(),
            view_count: "9".to_owned(),
            is_checked: true,
            answer: AnswerRecord {
                id: 30,
                content: "Only for the arts track".to_owned(),
            },
        }
    }

    #[test]
    fn request_carries_question_and_answer_fields() {
        let request = EditRequest::from(&record());
        assert_eq!(request.modal_title, "Is there an interview?");
        assert_eq!(request.modal_content, "Only for the arts track");
        assert_eq!(request.modal_content_id, 30);
        assert_eq!(request.question_id, 3);
        assert!(request.is_checked);
    }

    #[test]
    fn modal_surface_tracks_open_and_close() {
        let surface = ModalSurface::default();
        assert!(!surface.is_open());

        surface.open(EditRequest::from(&record()));
        assert_eq!(surface.current().map(|r| r.question_id), Some(3));

        surface.close();
        assert!(surface.current().is_none());
    }
}
