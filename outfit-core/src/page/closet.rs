use std::collections::{BTreeMap, BTreeSet};

use crate::{
    ValidationError,
    cleanup::{CleanupPicker, Mark, Submission},
    ui::{Dispatch, EventKind, Node, NodeId, Notice, Selector, UiTree, add_toast_control, toast_for},
};

/// Shown after the marked rows were handed over.
pub const SUBMITTED_TOAST: &str = "선택한 옷을 정리 목록에 담았어요.";

/// Controls inside a row that handle their own clicks.
const OWN_CLICK: [Selector; 4] =
    [Selector::Tag("input"), Selector::Tag("label"), Selector::Tag("button"), Selector::Tag("a")];

#[derive(Debug, Clone, Copy)]
struct RowNodes {
    row: NodeId,
    name: NodeId,
    discard: NodeId,
    donate: NodeId,
}

/// Closet cleanup list: each row is marked discard or donate.
#[derive(Debug)]
pub struct ClosetPage {
    picker: CleanupPicker,
    tree: UiTree,
    body: NodeId,
    submit_button: NodeId,
    rows: BTreeMap<String, RowNodes>,
    notices: Vec<Notice>,
}

impl ClosetPage {
    /// One row per `(id, display name)`. A repeated id keeps its first row.
    pub fn new<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut seen = BTreeSet::new();
        let items: Vec<(&str, &str)> = items
            .into_iter()
            .filter(|(id, _)| {
                let fresh = seen.insert(*id);
                if !fresh {
                    tracing::warn!(id, "duplicate cleanup row ignored");
                }
                fresh
            })
            .collect();
        let picker = CleanupPicker::new(items.iter().map(|(id, _)| *id));

        let mut tree = UiTree::new();
        let body = tree.insert(None, Node::new("body"));
        let rows = items
            .iter()
            .map(|(id, name)| {
                let row = tree.insert(
                    Some(body),
                    Node::new("div").class("cleanup-row").attr("data-row-id", *id),
                );
                let name = tree.insert(Some(row), Node::new("span").attr("data-name", *name));
                let mut pick = |mark: Mark| {
                    let label = tree.insert(Some(row), Node::new("label"));
                    tree.insert(
                        Some(label),
                        Node::new("input").class("pick").attr("data-kind", mark.as_str()),
                    )
                };
                let discard = pick(Mark::Discard);
                let donate = pick(Mark::Donate);
                (id.to_string(), RowNodes { row, name, discard, donate })
            })
            .collect();
        let submit_button = tree.insert(
            Some(body),
            Node::new("button").attr("data-submit", "").attr("data-toast", SUBMITTED_TOAST),
        );

        Self { picker, tree, body, submit_button, rows, notices: Vec::new() }
    }

    pub fn submit_button(&self) -> NodeId {
        self.submit_button
    }

    /// Register another control that shows `message` as a toast.
    pub fn add_toast_control(&mut self, message: &str) -> NodeId {
        add_toast_control(&mut self.tree, self.body, message)
    }

    pub fn picker(&self) -> &CleanupPicker {
        &self.picker
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn row_node(&self, id: &str) -> Option<NodeId> {
        self.rows.get(id).map(|r| r.row)
    }

    pub fn name_node(&self, id: &str) -> Option<NodeId> {
        self.rows.get(id).map(|r| r.name)
    }

    pub fn pick_node(&self, id: &str, mark: Mark) -> Option<NodeId> {
        self.rows.get(id).map(|r| match mark {
            Mark::Discard => r.discard,
            Mark::Donate => r.donate,
        })
    }

    /// The global mode radio.
    pub fn set_mode(&mut self, mode: Mark) {
        self.picker.set_mode(mode);
    }

    /// Marked rows for submission, or a blocking notice when there are none.
    pub fn submit(&mut self) -> Result<Vec<Submission>, ValidationError> {
        self.picker.collect().inspect_err(|e| {
            self.notices.push(Notice::Alert(e.user_message().to_string()));
        })
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn row_id(&self, target: NodeId) -> Option<String> {
        let row = self.tree.closest(target, Selector::Class("cleanup-row"))?;
        self.tree.attr(row, "data-row-id").map(str::to_string)
    }

    /// A checkbox flipped by the user.
    fn on_change(&mut self, target: NodeId) -> bool {
        let Some(pick) = self.tree.closest(target, Selector::Class("pick")) else {
            return false;
        };
        let mark = self.tree.attr(pick, "data-kind").and_then(|k| Mark::try_from(k).ok());
        let (Some(mark), Some(id)) = (mark, self.row_id(pick)) else {
            return false;
        };
        let checked = self.picker.row(&id).is_some_and(|r| !r.is_marked(mark));
        self.picker.set_mark(&id, mark, checked)
    }

    fn on_click(&mut self, target: NodeId) -> bool {
        // The submit toast is only shown once something was actually submitted.
        if let Some(button) = self.tree.closest(target, Selector::Attr("data-submit")) {
            if self.submit().is_ok() {
                self.notices.extend(toast_for(&self.tree, button));
            }
            return true;
        }

        let toast = toast_for(&self.tree, target);
        let toasted = toast.is_some();
        self.notices.extend(toast);

        if self.tree.closest_any(target, &OWN_CLICK).is_some() {
            return toasted;
        }
        match self.row_id(target) {
            Some(id) => self.picker.tap_row(&id) || toasted,
            None => toasted,
        }
    }
}

impl Dispatch for ClosetPage {
    fn dispatch(&mut self, event: EventKind, target: NodeId) -> bool {
        match event {
            EventKind::Change => self.on_change(target),
            EventKind::Click => self.on_click(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ClosetPage {
        ClosetPage::new([("c1", "낡은 청바지"), ("c2", "니트 조끼"), ("c3", "린넨 셔츠")])
    }

    #[test]
    fn checkbox_change_is_exclusive_per_row() {
        let mut page = page();
        let discard = page.pick_node("c1", Mark::Discard).unwrap();
        let donate = page.pick_node("c1", Mark::Donate).unwrap();

        assert!(page.dispatch(EventKind::Change, discard));
        assert!(page.dispatch(EventKind::Change, donate));

        let row = page.picker().row("c1").unwrap();
        assert!(row.is_marked(Mark::Donate));
        assert!(!row.is_marked(Mark::Discard));

        assert!(page.dispatch(EventKind::Change, donate));
        assert_eq!(page.picker().row("c1").unwrap().selection(), None);
    }

    #[test]
    fn row_tap_toggles_current_mode() {
        let mut page = page();
        let name = page.name_node("c2").unwrap();

        page.set_mode(Mark::Donate);
        assert!(page.dispatch(EventKind::Click, name));
        assert_eq!(page.picker().row("c2").unwrap().selection(), Some(Mark::Donate));

        page.set_mode(Mark::Discard);
        let row = page.row_node("c2").unwrap();
        assert!(page.dispatch(EventKind::Click, row));
        assert_eq!(page.picker().row("c2").unwrap().selection(), Some(Mark::Discard));
    }

    #[test]
    fn clicks_on_controls_do_not_tap_row() {
        let mut page = page();
        let input = page.pick_node("c3", Mark::Donate).unwrap();

        assert!(!page.dispatch(EventKind::Click, input));
        assert_eq!(page.picker().row("c3").unwrap().selection(), None);
    }

    #[test]
    fn submit_collects_marked_rows_only() {
        let mut page = page();
        let c1 = page.pick_node("c1", Mark::Discard).unwrap();
        page.dispatch(EventKind::Change, c1);
        let c3 = page.row_node("c3").unwrap();
        page.set_mode(Mark::Donate);
        page.dispatch(EventKind::Click, c3);

        let picked = page.submit().unwrap();
        let ids: Vec<_> = picked.iter().map(|s| (s.id.as_str(), s.action)).collect();
        assert_eq!(ids, [("c1", Mark::Discard), ("c3", Mark::Donate)]);
        assert!(page.drain_notices().is_empty());
    }

    #[test]
    fn submit_button_toasts_after_success() {
        let mut page = page();
        let c2 = page.row_node("c2").unwrap();
        page.dispatch(EventKind::Click, c2);

        assert!(page.dispatch(EventKind::Click, page.submit_button()));
        assert_eq!(page.drain_notices(), vec![Notice::Toast(SUBMITTED_TOAST.to_string())]);
    }

    #[test]
    fn submit_button_with_nothing_marked_only_alerts() {
        let mut page = page();

        assert!(page.dispatch(EventKind::Click, page.submit_button()));
        let notices = page.drain_notices();
        assert_eq!(
            notices,
            vec![Notice::Alert(ValidationError::NothingSelected.user_message().to_string())]
        );
        assert_eq!(notices[0].visible_for(), None);
    }

    #[test]
    fn registered_toast_control_fires_without_tapping_rows() {
        let mut page = page();
        let button = page.add_toast_control("도움말");

        assert!(page.dispatch(EventKind::Click, button));
        assert_eq!(page.drain_notices(), vec![Notice::Toast("도움말".into())]);
        assert!(page.picker().rows().iter().all(|r| r.selection().is_none()));
    }

    #[test]
    fn duplicate_row_ids_keep_first_row() {
        let mut page = ClosetPage::new([("c1", "청바지"), ("c2", "조끼"), ("c1", "다른 청바지")]);
        assert_eq!(page.picker().rows().len(), 2);

        let name = page.name_node("c1").unwrap();
        assert_eq!(page.tree().attr(name, "data-name"), Some("청바지"));

        let donate = page.pick_node("c1", Mark::Donate).unwrap();
        page.dispatch(EventKind::Change, donate);
        let picked = page.submit().unwrap();
        assert_eq!(picked, vec![Submission { id: "c1".into(), action: Mark::Donate }]);
    }

    #[test]
    fn empty_submit_is_a_notice_not_an_error_state() {
        let mut page = page();
        assert_eq!(page.submit(), Err(ValidationError::NothingSelected));
        assert_eq!(page.drain_notices().len(), 1);
        assert!(page.picker().rows().iter().all(|r| r.selection().is_none()));
    }
}
