//! A minimal element tree for event dispatch.
//!
//! Pages register their interactive controls as nodes. A click on any node
//! is resolved by walking up through its ancestors until a node matches a
//! [`Selector`], the same lookup a delegated DOM listener performs.

use std::{collections::BTreeMap, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attrs: BTreeMap<&'static str, String>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, classes: Vec::new(), attrs: BTreeMap::new(), parent: None }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Tag(&'static str),
    Class(&'static str),
    Attr(&'static str),
}

impl Selector {
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Tag(tag) => node.tag == *tag,
            Selector::Class(class) => node.classes.contains(class),
            Selector::Attr(name) => node.attrs.contains_key(name),
        }
    }
}

/// Arena of nodes. Removed nodes leave a hole so ids stay stable.
#[derive(Debug, Clone, Default)]
pub struct UiTree {
    nodes: Vec<Option<Node>>,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        node.parent = parent.filter(|p| self.get(*p).is_some());
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.attrs.get(name)).map(String::as_str)
    }

    /// First of `id` and its ancestors that matches `selector`.
    pub fn closest(&self, id: NodeId, selector: Selector) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = self.get(cur)?;
            if selector.matches(node) {
                return Some(cur);
            }
            current = node.parent;
        }
        None
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(move |(i, n)| {
            n.as_ref().filter(|n| n.parent == Some(id)).map(|_| NodeId(i))
        })
    }

    pub fn find_child(&self, id: NodeId, selector: Selector) -> Option<NodeId> {
        self.children(id).find(|c| self.get(*c).is_some_and(|n| selector.matches(n)))
    }

    pub fn closest_any(&self, id: NodeId, selectors: &[Selector]) -> Option<NodeId> {
        selectors.iter().find_map(|s| self.closest(id, *s))
    }

    /// Remove a node and everything below it.
    pub fn remove(&mut self, id: NodeId) {
        let doomed: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|n| self.is_descendant_or_self(*n, id))
            .collect();
        for n in doomed {
            self.nodes[n.0] = None;
        }
    }

    fn is_descendant_or_self(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(cur) = current {
            if cur == ancestor {
                return self.get(cur).is_some();
            }
            current = self.get(cur).and_then(Node::parent);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

/// Something that reacts to UI events on its own tree.
pub trait Dispatch {
    /// Returns `true` when the event was handled.
    fn dispatch(&mut self, event: EventKind, target: NodeId) -> bool;
}

/// How long a toast stays visible.
pub const TOAST_VISIBLE: Duration = Duration::from_millis(1200);

/// A message for the user, drained by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocking; the user must acknowledge it.
    Alert(String),
    /// Shown for [`TOAST_VISIBLE`] and then removed.
    Toast(String),
}

impl Notice {
    /// How long the notice stays up on its own; `None` until acknowledged.
    pub fn visible_for(&self) -> Option<Duration> {
        match self {
            Notice::Alert(_) => None,
            Notice::Toast(_) => Some(TOAST_VISIBLE),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Alert(msg) | Notice::Toast(msg) => msg,
        }
    }
}

/// Full-page navigation requested by a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation(pub String);

/// Add a button under `parent` that raises `message` as a toast when clicked.
pub fn add_toast_control(tree: &mut UiTree, parent: NodeId, message: &str) -> NodeId {
    tree.insert(Some(parent), Node::new("button").attr("data-toast", message))
}

/// `[data-toast]` anywhere above the click target raises its text as a toast.
pub fn toast_for(tree: &UiTree, target: NodeId) -> Option<Notice> {
    let node = tree.closest(target, Selector::Attr("data-toast"))?;
    tree.attr(node, "data-toast").map(|msg| Notice::Toast(msg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (UiTree, NodeId, NodeId, NodeId) {
        let mut tree = UiTree::new();
        let body = tree.insert(None, Node::new("body"));
        let row = tree.insert(Some(body), Node::new("div").class("row").attr("data-toast", "saved"));
        let label = tree.insert(Some(row), Node::new("label"));
        let input = tree.insert(Some(label), Node::new("input").class("pick"));
        (tree, row, label, input)
    }

    #[test]
    fn closest_includes_self_then_walks_up() {
        let (tree, row, label, input) = sample();
        assert_eq!(tree.closest(input, Selector::Tag("input")), Some(input));
        assert_eq!(tree.closest(input, Selector::Tag("label")), Some(label));
        assert_eq!(tree.closest(input, Selector::Class("row")), Some(row));
        assert_eq!(tree.closest(row, Selector::Tag("input")), None);
    }

    #[test]
    fn closest_any_tries_each_selector() {
        let (tree, _, label, input) = sample();
        let hit = tree.closest_any(input, &[Selector::Tag("button"), Selector::Tag("label")]);
        assert_eq!(hit, Some(label));
    }

    #[test]
    fn children_skip_grandchildren() {
        let (tree, row, label, input) = sample();
        assert_eq!(tree.children(row).collect::<Vec<_>>(), vec![label]);
        assert_eq!(tree.find_child(label, Selector::Class("pick")), Some(input));
        assert_eq!(tree.find_child(row, Selector::Class("pick")), None);
    }

    #[test]
    fn remove_drops_subtree() {
        let (mut tree, row, label, input) = sample();
        assert_eq!(tree.len(), 4);
        tree.remove(row);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(label).is_none());
        assert_eq!(tree.closest(input, Selector::Tag("body")), None);
    }

    #[test]
    fn toast_control_is_found_from_itself() {
        let (mut tree, row, _, _) = sample();
        let button = add_toast_control(&mut tree, row, "복사했어요");
        assert_eq!(toast_for(&tree, button), Some(Notice::Toast("복사했어요".into())));
    }

    #[test]
    fn only_toasts_expire_on_their_own() {
        assert_eq!(Notice::Toast("a".into()).visible_for(), Some(TOAST_VISIBLE));
        assert_eq!(Notice::Alert("a".into()).visible_for(), None);
        assert_eq!(Notice::Alert("확인".into()).message(), "확인");
    }

    #[test]
    fn toast_resolves_from_descendant() {
        let (tree, _, _, input) = sample();
        assert_eq!(toast_for(&tree, input), Some(Notice::Toast("saved".into())));
    }
}
