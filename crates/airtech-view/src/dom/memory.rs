//! In-memory document for tests and headless rendering.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{Document, EventKind, Listener, Propagation, Selector};

/// Handle to an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    content: String,
    disabled: bool,
    checked: bool,
    styles: HashMap<String, String>,
    parent: Option<NodeId>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
    root_attributes: HashMap<String, String>,
    listeners: Vec<(EventKind, Rc<dyn Fn(&NodeId) -> Propagation>)>,
}

const BODY: NodeId = NodeId(0);

impl Tree {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == BODY {
                return true;
            }
            current = self.node(node_id).and_then(|n| n.parent);
        }
        false
    }

    fn matches(&self, id: NodeId, selector: &Selector<'_>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        match selector {
            Selector::Id(value) => node.attributes.get("id").map(String::as_str) == Some(*value),
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Attribute(name) => node.attributes.contains_key(*name),
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
        }
    }

    fn connected_matching(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.is_connected(*id) && self.matches(*id, &selector))
            .collect()
    }
}

/// A document kept entirely in memory.
///
/// Clones share the same tree. Markup written with `set_inner_html` is
/// stored verbatim and not parsed; it replaces (detaches) the element's
/// children.
#[derive(Clone)]
pub struct MemoryDocument {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("MemoryDocument")
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .finish()
    }
}

impl MemoryDocument {
    /// Create a document with an empty body.
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            ..Node::default()
        };
        Self {
            tree: Rc::new(RefCell::new(Tree {
                nodes: vec![body],
                ..Tree::default()
            })),
        }
    }

    /// The body element.
    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Append a new element under `parent`.
    ///
    /// A `class` attribute is split into the class list.
    pub fn append(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut node = Node {
            tag: tag.to_string(),
            parent: Some(parent),
            ..Node::default()
        };
        for (name, value) in attributes {
            if *name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }

        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(node);
        NodeId(tree.nodes.len() - 1)
    }

    /// Append a new element directly under the body.
    pub fn append_to_root(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        self.append(BODY, tag, attributes)
    }

    /// Dispatch an event at `target` to every document listener.
    ///
    /// Returns `true` if a listener asked to stop the event.
    pub fn dispatch(&self, kind: EventKind, target: NodeId) -> bool {
        let listeners: Vec<_> = self
            .tree
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| l.clone())
            .collect();

        let mut stopped = false;
        for listener in listeners {
            if listener(&target) == Propagation::Stop {
                stopped = true;
            }
        }
        stopped
    }

    /// Dispatch a click at `target`.
    pub fn click(&self, target: NodeId) -> bool {
        self.dispatch(EventKind::Click, target)
    }

    /// Toggle a checkbox and dispatch `change`.
    pub fn set_checked(&self, target: NodeId, checked: bool) {
        if let Some(node) = self.tree.borrow_mut().node_mut(target) {
            node.checked = checked;
        }
        self.dispatch(EventKind::Change, target);
    }

    /// Text or markup content of an element.
    pub fn content(&self, element: NodeId) -> String {
        self.inner_html(&element)
    }

    /// Class list of an element.
    pub fn classes(&self, element: NodeId) -> Vec<String> {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    /// Inline style property of an element.
    pub fn style(&self, element: NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(element)
            .and_then(|n| n.styles.get(property).cloned())
    }

    /// Disabled state of an element.
    pub fn is_disabled(&self, element: NodeId) -> bool {
        self.tree
            .borrow()
            .node(element)
            .map(|n| n.disabled)
            .unwrap_or(false)
    }

    /// Number of registered listeners for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{}", id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.tree.borrow().connected_matching(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.tree.borrow().connected_matching(selector)
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector)?;
        let tree = self.tree.borrow();
        let mut current = Some(*element);
        while let Some(id) = current {
            if tree.matches(id, &parsed) {
                return Some(id);
            }
            current = tree.node(id).and_then(|n| n.parent);
        }
        None
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        Some(NodeId(tree.nodes.len() - 1))
    }

    fn append_to_body(&self, element: &NodeId) {
        if *element == BODY {
            return;
        }
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.parent = Some(BODY);
        }
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.tree.borrow().root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.tree
            .borrow_mut()
            .root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.set_inner_html(element, text);
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.tree
            .borrow()
            .node(*element)
            .map(|n| n.content.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        let mut tree = self.tree.borrow_mut();
        for node in tree.nodes.iter_mut() {
            if node.parent == Some(*element) {
                node.parent = None;
            }
        }
        if let Some(node) = tree.node_mut(*element) {
            node.content = html.to_string();
        }
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let node = tree.node(*element)?;
        if name == "class" {
            return Some(node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(element, value);
            return;
        }
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.attributes.remove(name);
        }
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .node(*element)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.disabled = disabled;
        }
    }

    fn is_checked(&self, element: &NodeId) -> bool {
        self.tree
            .borrow()
            .node(*element)
            .map(|n| n.checked)
            .unwrap_or(false)
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        if let Some(node) = self.tree.borrow_mut().node_mut(*element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn add_listener(&self, kind: EventKind, listener: Listener<NodeId>) {
        self.tree
            .borrow_mut()
            .listeners
            .push((kind, Rc::from(listener)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_lookup_by_id_and_class() {
        let doc = MemoryDocument::new();
        let badge = doc.append_to_root("span", &[("id", "cart-count"), ("class", "badge hidden")]);

        assert_eq!(doc.element_by_id("cart-count"), Some(badge));
        assert_eq!(doc.query_selector(".badge"), Some(badge));
        assert!(doc.has_class(&badge, "hidden"));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_inner_html_detaches_children() {
        let doc = MemoryDocument::new();
        let list = doc.append_to_root("div", &[("id", "cart-items")]);
        doc.append(list, "div", &[("id", "row")]);
        assert!(doc.element_by_id("row").is_some());

        doc.set_inner_html(&list, "");
        assert!(doc.element_by_id("row").is_none());
    }

    #[test]
    fn test_closest_walks_ancestors() {
        let doc = MemoryDocument::new();
        let button = doc.append_to_root("button", &[("class", "add-to-cart-btn")]);
        let icon = doc.append(button, "i", &[("class", "fas fa-cart-plus")]);

        assert_eq!(doc.closest(&icon, ".add-to-cart-btn"), Some(button));
        assert_eq!(doc.closest(&icon, "[data-cart-action]"), None);
    }

    #[test]
    fn test_created_elements_connect_on_append() {
        let doc = MemoryDocument::new();
        let toast = doc.create_element("div").unwrap();
        doc.set_class_name(&toast, "cart-notification fixed");
        assert!(doc.query_selector(".cart-notification").is_none());

        doc.append_to_body(&toast);
        assert_eq!(doc.query_selector(".cart-notification"), Some(toast));
    }

    #[test]
    fn test_dispatch_reaches_listeners() {
        let doc = MemoryDocument::new();
        let target = doc.append_to_root("button", &[]);
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        doc.add_listener(
            EventKind::Click,
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                Propagation::Stop
            }),
        );

        assert!(doc.click(target));
        assert!(!doc.dispatch(EventKind::Change, target));
        assert_eq!(hits.get(), 1);
        assert_eq!(doc.listener_count(EventKind::Click), 1);
    }
}
