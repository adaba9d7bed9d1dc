//! Closet cleanup: mark each row for discard or donation, then submit.

use serde::Serialize;

use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Discard,
    Donate,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Discard => "discard",
            Mark::Donate => "donate",
        }
    }

    pub fn other(&self) -> Mark {
        match self {
            Mark::Discard => Mark::Donate,
            Mark::Donate => Mark::Discard,
        }
    }

    pub const fn all() -> &'static [Mark] {
        &[Mark::Discard, Mark::Donate]
    }
}

impl TryFrom<&str> for Mark {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "discard" => Ok(Mark::Discard),
            "donate" => Ok(Mark::Donate),
            _ => Err(anyhow::anyhow!("Unknown mark '{value}'. Expected discard or donate.")),
        }
    }
}

/// A row holds at most one mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRow {
    pub id: String,
    selection: Option<Mark>,
}

impl CleanupRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), selection: None }
    }

    pub fn selection(&self) -> Option<Mark> {
        self.selection
    }

    pub fn is_marked(&self, mark: Mark) -> bool {
        self.selection == Some(mark)
    }

    /// Checking one mark clears the other; unchecking clears only itself.
    pub fn set(&mut self, mark: Mark, checked: bool) {
        if checked {
            self.selection = Some(mark);
        } else if self.selection == Some(mark) {
            self.selection = None;
        }
    }

    pub fn toggle(&mut self, mark: Mark) {
        let checked = !self.is_marked(mark);
        self.set(mark, checked);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: String,
    pub action: Mark,
}

#[derive(Debug, Clone, Default)]
pub struct CleanupPicker {
    rows: Vec<CleanupRow>,
    mode: Mark,
}

impl CleanupPicker {
    /// Rows in the given order; a repeated id is kept once.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<CleanupRow> = Vec::new();
        for id in ids {
            let id = id.into();
            if rows.iter().any(|r| r.id == id) {
                continue;
            }
            rows.push(CleanupRow::new(id));
        }
        Self { rows, mode: Mark::default() }
    }

    pub fn rows(&self) -> &[CleanupRow] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&CleanupRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn row_mut(&mut self, id: &str) -> Option<&mut CleanupRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn mode(&self) -> Mark {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mark) {
        self.mode = mode;
    }

    /// Direct checkbox change. Returns `false` for an unknown row.
    pub fn set_mark(&mut self, id: &str, mark: Mark, checked: bool) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.set(mark, checked);
                true
            }
            None => false,
        }
    }

    /// Tap on the row body: toggle the mark of the current mode.
    pub fn tap_row(&mut self, id: &str) -> bool {
        let mode = self.mode;
        match self.row_mut(id) {
            Some(row) => {
                row.toggle(mode);
                true
            }
            None => false,
        }
    }

    /// Every marked row, in row order. Nothing marked is a validation failure.
    pub fn collect(&self) -> Result<Vec<Submission>, ValidationError> {
        let picked: Vec<Submission> = self
            .rows
            .iter()
            .filter_map(|r| r.selection.map(|action| Submission { id: r.id.clone(), action }))
            .collect();

        if picked.is_empty() {
            return Err(ValidationError::NothingSelected);
        }
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_donate_clears_discard() {
        let mut picker = CleanupPicker::new(["a"]);
        picker.set_mark("a", Mark::Discard, true);
        picker.set_mark("a", Mark::Donate, true);

        let row = picker.row("a").unwrap();
        assert!(row.is_marked(Mark::Donate));
        assert!(!row.is_marked(Mark::Discard));
    }

    #[test]
    fn repeated_ids_collapse_to_one_row() {
        let mut picker = CleanupPicker::new(["a", "b", "a"]);
        assert_eq!(picker.rows().len(), 2);

        picker.set_mark("a", Mark::Discard, true);
        let picked = picker.collect().unwrap();
        assert_eq!(picked, vec![Submission { id: "a".into(), action: Mark::Discard }]);
    }

    #[test]
    fn unchecking_other_mark_keeps_selection() {
        let mut row = CleanupRow::new("a");
        row.set(Mark::Discard, true);
        row.set(Mark::Donate, false);
        assert_eq!(row.selection(), Some(Mark::Discard));
        row.set(Mark::Discard, false);
        assert_eq!(row.selection(), None);
    }

    #[test]
    fn tap_uses_current_mode() {
        let mut picker = CleanupPicker::new(["a", "b"]);
        assert_eq!(picker.mode(), Mark::Discard);

        picker.tap_row("a");
        assert_eq!(picker.row("a").unwrap().selection(), Some(Mark::Discard));

        picker.set_mode(Mark::Donate);
        picker.tap_row("a");
        assert_eq!(picker.row("a").unwrap().selection(), Some(Mark::Donate));

        picker.tap_row("a");
        assert_eq!(picker.row("a").unwrap().selection(), None);
        assert!(!picker.tap_row("missing"));
    }

    #[test]
    fn collect_skips_unmarked_rows() {
        let mut picker = CleanupPicker::new(["a", "b", "c"]);
        picker.set_mark("a", Mark::Donate, true);
        picker.set_mark("c", Mark::Discard, true);

        let picked = picker.collect().unwrap();
        assert_eq!(
            picked,
            vec![
                Submission { id: "a".into(), action: Mark::Donate },
                Submission { id: "c".into(), action: Mark::Discard },
            ]
        );
        assert_eq!(
            serde_json::to_string(&picked[0]).unwrap(),
            r#"{"id":"a","action":"donate"}"#
        );
    }

    #[test]
    fn collect_with_nothing_marked_fails_validation() {
        let picker = CleanupPicker::new(["a"]);
        assert_eq!(picker.collect(), Err(ValidationError::NothingSelected));
    }

    #[test]
    fn mark_parses_from_str() {
        for mark in Mark::all() {
            assert_eq!(Mark::try_from(mark.as_str()).unwrap(), *mark);
        }
        assert!(Mark::try_from("keep").is_err());
    }
}
