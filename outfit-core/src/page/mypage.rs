use std::collections::BTreeMap;

use crate::{
    Slot, SlotSet, ValidationError,
    preference::{AddOutcome, PillId, PreferenceEditor},
    ui::{Dispatch, EventKind, Node, NodeId, Notice, Selector, UiTree, add_toast_control, toast_for},
};

pub const SAVED_TOAST: &str = "취향을 저장했어요.";

/// Avoided-item pills and style sliders.
#[derive(Debug)]
pub struct MyPage {
    editor: PreferenceEditor,
    tree: UiTree,
    body: NodeId,
    pill_list: NodeId,
    save_button: NodeId,
    pill_nodes: BTreeMap<PillId, NodeId>,
    slots: SlotSet,
    notices: Vec<Notice>,
}

impl Default for MyPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MyPage {
    pub fn new() -> Self {
        let mut tree = UiTree::new();
        let body = tree.insert(None, Node::new("body"));
        let pill_list = tree.insert(Some(body), Node::new("div").attr("id", "avoidPills"));
        let save_button = add_toast_control(&mut tree, body, SAVED_TOAST);

        let editor = PreferenceEditor::new();
        let mut slots = SlotSet::new(&[Slot::SliderHint, Slot::AvoidPills]);
        slots.set_text(Slot::SliderHint, editor.hint());
        slots.set_html(Slot::AvoidPills, editor.pills_html());

        Self {
            editor,
            tree,
            body,
            pill_list,
            save_button,
            pill_nodes: BTreeMap::new(),
            slots,
            notices: Vec::new(),
        }
    }

    /// The "save" button; clicking it shows [`SAVED_TOAST`].
    pub fn save_button(&self) -> NodeId {
        self.save_button
    }

    /// Register another control that shows `message` as a toast.
    pub fn add_toast_control(&mut self, message: &str) -> NodeId {
        add_toast_control(&mut self.tree, self.body, message)
    }

    /// Pills are user text, so they reach the slot only through escaping.
    fn render_pills(&mut self) {
        self.slots.set_html(Slot::AvoidPills, self.editor.pills_html());
    }

    pub fn editor(&self) -> &PreferenceEditor {
        &self.editor
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Form submit with the given input text.
    pub fn submit(&mut self, input: &str) -> Result<AddOutcome, ValidationError> {
        self.editor.set_input(input);
        let outcome = match self.editor.submit() {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notices.push(Notice::Alert(e.user_message().to_string()));
                return Err(e);
            }
        };

        if let AddOutcome::Added(id) = outcome {
            let pill = self.tree.insert(
                Some(self.pill_list),
                Node::new("span").class("pill").attr("data-pill-id", id.as_u64().to_string()),
            );
            self.tree.insert(
                Some(pill),
                Node::new("button").class("pill-x").attr("data-remove-pill", ""),
            );
            self.pill_nodes.insert(id, pill);
            self.render_pills();
        }
        Ok(outcome)
    }

    /// The remove button inside a pill.
    pub fn remove_button(&self, id: PillId) -> Option<NodeId> {
        let pill = *self.pill_nodes.get(&id)?;
        self.tree.find_child(pill, Selector::Attr("data-remove-pill"))
    }

    pub fn pill_node(&self, id: PillId) -> Option<NodeId> {
        self.pill_nodes.get(&id).copied()
    }

    pub fn move_style(&mut self, value: u8) {
        let hint = self.editor.set_style(value);
        self.slots.set_text(Slot::SliderHint, hint);
    }

    pub fn move_mood(&mut self, value: u8) {
        let hint = self.editor.set_mood(value);
        self.slots.set_text(Slot::SliderHint, hint);
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn remove_from(&mut self, target: NodeId) -> bool {
        let Some(button) = self.tree.closest(target, Selector::Attr("data-remove-pill")) else {
            return false;
        };
        let Some(pill) = self.tree.closest(button, Selector::Class("pill")) else {
            return false;
        };
        let id = self.tree.attr(pill, "data-pill-id").and_then(|v| v.parse::<PillId>().ok());

        self.tree.remove(pill);
        if let Some(id) = id {
            self.editor.remove_pill(id);
            self.pill_nodes.remove(&id);
        }
        self.render_pills();
        true
    }
}

impl Dispatch for MyPage {
    fn dispatch(&mut self, event: EventKind, target: NodeId) -> bool {
        if event != EventKind::Click {
            return false;
        }

        let toast = toast_for(&self.tree, target);
        let toasted = toast.is_some();
        self.notices.extend(toast);

        self.remove_from(target) || toasted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(outcome: AddOutcome) -> PillId {
        match outcome {
            AddOutcome::Added(id) => id,
            AddOutcome::Duplicate => panic!("expected a new pill"),
        }
    }

    #[test]
    fn adding_twice_keeps_one_pill() {
        let mut page = MyPage::new();
        page.submit("민소매").unwrap();
        assert_eq!(page.submit("민소매"), Ok(AddOutcome::Duplicate));

        assert_eq!(page.editor().pills().len(), 1);
        assert!(page.drain_notices().is_empty());
    }

    #[test]
    fn empty_submit_raises_alert() {
        let mut page = MyPage::new();
        assert_eq!(page.submit("  "), Err(ValidationError::EmptyPill));
        assert_eq!(
            page.drain_notices(),
            vec![Notice::Alert(ValidationError::EmptyPill.user_message().to_string())]
        );
    }

    #[test]
    fn clicking_remove_button_drops_pill_and_node() {
        let mut page = MyPage::new();
        let keep = added(page.submit("울 코트").unwrap());
        let drop = added(page.submit("민소매").unwrap());

        let button = page.remove_button(drop).unwrap();
        assert!(page.dispatch(EventKind::Click, button));

        let labels: Vec<_> = page.editor().pills().iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["울 코트"]);
        assert!(page.pill_node(drop).is_none());
        assert!(page.tree().get(button).is_none());
        assert!(page.remove_button(keep).is_some());
    }

    #[test]
    fn clicking_pill_body_does_nothing() {
        let mut page = MyPage::new();
        let id = added(page.submit("레깅스").unwrap());
        let pill = page.pill_node(id).unwrap();

        assert!(!page.dispatch(EventKind::Click, pill));
        assert_eq!(page.editor().pills().len(), 1);
    }

    #[test]
    fn pill_labels_reach_slot_escaped() {
        let mut page = MyPage::new();
        assert_eq!(page.slots().text(Slot::AvoidPills), Some(""));

        let id = added(page.submit("<script>").unwrap());
        let html = page.slots().text(Slot::AvoidPills).unwrap();
        assert!(html.contains(r#"<span class="pill">&lt;script&gt; <button"#));
        assert!(!html.contains("<script>"));

        let button = page.remove_button(id).unwrap();
        page.dispatch(EventKind::Click, button);
        assert_eq!(page.slots().text(Slot::AvoidPills), Some(""));
    }

    #[test]
    fn slot_lists_pills_in_insertion_order() {
        let mut page = MyPage::new();
        page.submit("울 코트").unwrap();
        page.submit("민소매").unwrap();
        page.submit("민소매").unwrap();

        let html = page.slots().text(Slot::AvoidPills).unwrap();
        assert_eq!(html.matches(r#"class="pill""#).count(), 2);
        assert!(html.find("울 코트") < html.find("민소매"));
    }

    #[test]
    fn save_button_raises_toast() {
        let mut page = MyPage::new();
        page.submit("민소매").unwrap();

        assert!(page.dispatch(EventKind::Click, page.save_button()));
        let notices = page.drain_notices();
        assert_eq!(notices, vec![Notice::Toast(SAVED_TOAST.to_string())]);
        assert!(notices[0].visible_for().is_some());
        assert_eq!(page.editor().pills().len(), 1);
    }

    #[test]
    fn registered_toast_control_fires() {
        let mut page = MyPage::new();
        let button = page.add_toast_control("초기화했어요.");

        assert!(page.dispatch(EventKind::Click, button));
        assert_eq!(page.drain_notices(), vec![Notice::Toast("초기화했어요.".into())]);
    }

    #[test]
    fn sliders_update_hint_slot() {
        let mut page = MyPage::new();
        assert_eq!(page.slots().text(Slot::SliderHint), Some("중간 · 중간"));

        page.move_style(80);
        page.move_mood(5);
        assert_eq!(page.slots().text(Slot::SliderHint), Some("포멀 · 심플"));
    }
}
