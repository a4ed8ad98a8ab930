use crate::questions::QuestionRecord;

use super::ViewSnapshot;

pub const COLUMN_TITLES: [&str; 3] = ["질문내용", "질문횟수", "질문확인여부"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Confirmed,
    Unconfirmed,
}

impl StatusBadge {
    pub fn from_checked(is_checked: bool) -> Self {
        if is_checked {
            StatusBadge::Confirmed
        } else {
            StatusBadge::Unconfirmed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Confirmed => "확인",
            StatusBadge::Unconfirmed => "미확인",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StatusBadge::Confirmed => "green",
            StatusBadge::Unconfirmed => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: i64,
    pub content: String,
    pub view_count: String,
    pub badge_label: &'static str,
    pub badge_color: &'static str,
}

impl From<&QuestionRecord> for RowView {
    fn from(record: &QuestionRecord) -> Self {
        let badge = StatusBadge::from_checked(record.is_checked);
        Self {
            id: record.id,
            content: record.content.clone(),
            view_count: record.view_count.clone(),
            badge_label: badge.label(),
            badge_color: badge.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: [&'static str; 3],
    pub rows: Vec<RowView>,
    pub loading: bool,
}

impl From<&ViewSnapshot> for TableView {
    fn from(snapshot: &ViewSnapshot) -> Self {
        Self {
            columns: COLUMN_TITLES,
            rows: snapshot.records.iter().map(RowView::from).collect(),
            loading: snapshot.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{AnswerRecord, FilterState};
    use rstest::rstest;

    fn record(id: i64, is_checked: bool) -> QuestionRecord {
        QuestionRecord {
            id,
            content: format!("question {id}"),
            view_count: (id * 2).to_string(),
            is_checked,
            answer: AnswerRecord {
                id: id + 100,
                content: "answer".to_owned(),
            },
        }
    }

    #[rstest]
    #[case(true, StatusBadge::Confirmed, "확인", "green")]
    #[case(false, StatusBadge::Unconfirmed, "미확인", "red")]
    fn badge_follows_checked_status(
        #[case] is_checked: bool,
        #[case] badge: StatusBadge,
        #[case] label: &str,
        #[case] color: &str,
    ) {
        assert_eq!(StatusBadge::from_checked(is_checked), badge);
        let row = RowView::from(&record(1, is_checked));
        assert_eq!(row.badge_label, label);
        assert_eq!(row.badge_color, color);
    }

    #[test]
    fn table_keeps_snapshot_order_and_loading() {
        let snapshot = ViewSnapshot {
            filter: FilterState::default(),
            records: vec![record(5, true), record(2, false), record(9, true)],
            loading: true,
        };
        let table = TableView::from(&snapshot);
        let ids: Vec<i64> = table.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert_eq!(table.rows[1].view_count, "4");
        assert!(table.loading);
        assert_eq!(table.columns, COLUMN_TITLES);
    }
}
