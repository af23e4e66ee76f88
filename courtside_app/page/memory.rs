use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{
    ClickEvent, DomEvent, EventKind, EventSink, EventTarget, KeyPress, ListenerId, NodeRef, Page,
};
use crate::search::{SEARCH_FORM_ID, SEARCH_INPUT_ID, SEARCH_RESULTS_ID};

#[derive(Debug)]
struct Element {
    parent: Option<String>,
    value: String,
    html: String,
    visible: bool,
}

#[derive(Debug, Default)]
struct Node {
    classes: Vec<String>,
    attributes: HashMap<String, String>,
}

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    sink: EventSink,
}

#[derive(Debug, Default)]
struct Document {
    path: String,
    elements: HashMap<String, Element>,
    nodes: Vec<Node>,
    focused: Option<String>,
    selected: Option<String>,
    navigations: Vec<String>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Document {
    /// Ids of `id` and its ancestors, innermost first.
    fn ancestry(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id.to_string());
        while let Some(node) = current {
            current = self
                .elements
                .get(&node)
                .and_then(|element| element.parent.clone());
            path.push(node);
        }
        path
    }

    fn sinks_for(&self, path: &[String], kind: EventKind, bubbles: bool) -> Vec<EventSink> {
        let scope = if bubbles { path } else { &path[..path.len().min(1)] };
        let mut sinks = Vec::new();

        for id in scope {
            sinks.extend(
                self.listeners
                    .iter()
                    .filter(|l| l.kind == kind)
                    .filter(|l| matches!(&l.target, EventTarget::Element(target) if target == id))
                    .map(|l| l.sink.clone()),
            );
        }

        if bubbles {
            sinks.extend(
                self.listeners
                    .iter()
                    .filter(|l| l.kind == kind && l.target == EventTarget::Document)
                    .map(|l| l.sink.clone()),
            );
        }

        sinks
    }
}

/// A document kept entirely in memory.
///
/// Backs the terminal driver and the tests. Events dispatched through the
/// helper methods reach listeners in DOM order: the target, its ancestors,
/// then the document. Focus events do not bubble.
#[derive(Debug, Default)]
pub struct MemoryPage {
    doc: Mutex<Document>,
}

impl MemoryPage {
    pub fn new(path: &str) -> Self {
        let doc = Document {
            path: path.to_string(),
            ..Default::default()
        };
        Self {
            doc: Mutex::new(doc),
        }
    }

    pub fn with_element(self, id: &str, parent: Option<&str>) -> Self {
        self.doc().elements.insert(
            id.to_string(),
            Element {
                parent: parent.map(str::to_string),
                value: String::new(),
                html: String::new(),
                visible: true,
            },
        );
        self
    }

    pub fn with_node(self, classes: &[&str], attributes: &[(&str, &str)]) -> Self {
        self.doc().nodes.push(Node {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
        self
    }

    pub fn with_nav_link(self, href: &str) -> Self {
        self.with_node(&["nav-link"], &[("href", href)])
    }

    /// Adds the search form, its text input and the (hidden) results container.
    pub fn with_search_form(self) -> Self {
        let page = self
            .with_element(SEARCH_FORM_ID, None)
            .with_element(SEARCH_INPUT_ID, Some(SEARCH_FORM_ID))
            .with_element(SEARCH_RESULTS_ID, Some(SEARCH_FORM_ID));
        page.set_visible(SEARCH_RESULTS_ID, false);
        page
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn inner_html(&self, id: &str) -> String {
        self.doc()
            .elements
            .get(id)
            .map(|element| element.html.clone())
            .unwrap_or_default()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.doc()
            .elements
            .get(id)
            .is_some_and(|element| element.visible)
    }

    pub fn focused(&self) -> Option<String> {
        self.doc().focused.clone()
    }

    pub fn selected(&self) -> Option<String> {
        self.doc().selected.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.doc().navigations.clone()
    }

    pub fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.doc()
            .nodes
            .get(node.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn listener_count(&self) -> usize {
        self.doc().listeners.len()
    }

    /// Focuses `id`, replaces its value and fires an input event.
    pub fn type_text(&self, id: &str, text: &str) {
        self.focus(id);
        let path = {
            let mut doc = self.doc();
            match doc.elements.get_mut(id) {
                Some(element) => element.value = text.to_string(),
                None => return,
            }
            doc.ancestry(id)
        };
        self.dispatch(
            &path,
            DomEvent::Input {
                value: text.to_string(),
            },
            true,
        );
    }

    pub fn submit(&self, form_id: &str) {
        let path = self.doc().ancestry(form_id);
        self.dispatch(&path, DomEvent::Submit, true);
    }

    /// Clicks `id`, moving focus to it first like a pointer press would.
    pub fn click(&self, id: &str) {
        self.focus(id);
        let path = self.doc().ancestry(id);
        self.dispatch(
            &path,
            DomEvent::Click(ClickEvent {
                path: path.clone(),
                player_id: None,
            }),
            true,
        );
    }

    /// Clicks the result row carrying `data-player-id` inside `container_id`.
    pub fn click_result(&self, container_id: &str, player_id: &str) {
        let path = self.doc().ancestry(container_id);
        self.dispatch(
            &path,
            DomEvent::Click(ClickEvent {
                path: path.clone(),
                player_id: Some(player_id.to_string()),
            }),
            true,
        );
    }

    /// Fires a keydown on the focused element, or on the document when nothing has focus.
    pub fn press_key(&self, press: KeyPress) {
        let path = {
            let doc = self.doc();
            doc.focused
                .as_deref()
                .map(|id| doc.ancestry(id))
                .unwrap_or_default()
        };
        self.dispatch(&path, DomEvent::KeyDown(press), true);
    }

    fn dispatch(&self, path: &[String], event: DomEvent, bubbles: bool) {
        let sinks = self.doc().sinks_for(path, event.kind(), bubbles);
        for sink in sinks {
            sink.emit(event.clone());
        }
    }
}

impl Page for MemoryPage {
    fn current_path(&self) -> String {
        self.doc().path.clone()
    }

    fn has_element(&self, id: &str) -> bool {
        self.doc().elements.contains_key(id)
    }

    fn value(&self, id: &str) -> String {
        self.doc()
            .elements
            .get(id)
            .map(|element| element.value.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&self, id: &str, html: String) {
        if let Some(element) = self.doc().elements.get_mut(id) {
            element.html = html;
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(element) = self.doc().elements.get_mut(id) {
            element.visible = visible;
        }
    }

    fn focus(&self, id: &str) {
        let changed = {
            let mut doc = self.doc();
            if !doc.elements.contains_key(id) || doc.focused.as_deref() == Some(id) {
                false
            } else {
                doc.focused = Some(id.to_string());
                doc.selected = None;
                true
            }
        };
        if changed {
            self.dispatch(&[id.to_string()], DomEvent::Focus, false);
        }
    }

    fn select(&self, id: &str) {
        let mut doc = self.doc();
        if doc.elements.contains_key(id) {
            doc.selected = Some(id.to_string());
        }
    }

    fn blur(&self, id: &str) {
        let mut doc = self.doc();
        if doc.focused.as_deref() == Some(id) {
            doc.focused = None;
            doc.selected = None;
        }
    }

    fn navigate(&self, href: &str) {
        self.doc().navigations.push(href.to_string());
    }

    fn query_class(&self, class: &str) -> Vec<NodeRef> {
        self.doc()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.classes.iter().any(|c| c == class))
            .map(|(index, _)| NodeRef(index))
            .collect()
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String> {
        self.doc()
            .nodes
            .get(node.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn add_class(&self, node: NodeRef, class: &str) {
        if let Some(n) = self.doc().nodes.get_mut(node.0) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn listen(&self, target: EventTarget, kind: EventKind, sink: EventSink) -> ListenerId {
        let mut doc = self.doc();
        doc.next_listener += 1;
        let id = ListenerId(doc.next_listener);
        doc.listeners.push(Listener {
            id,
            target,
            kind,
            sink,
        });
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.doc().listeners.retain(|listener| listener.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder(page: &MemoryPage, target: EventTarget, kind: EventKind) -> Arc<Mutex<Vec<DomEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        page.listen(
            target,
            kind,
            EventSink::new(move |event| sink_seen.lock().unwrap().push(event)),
        );
        seen
    }

    #[test]
    fn test_click_bubbles_to_ancestors_and_document() {
        let page = MemoryPage::new("/").with_search_form();
        let on_form = recorder(&page, EventTarget::element(SEARCH_FORM_ID), EventKind::Click);
        let on_doc = recorder(&page, EventTarget::Document, EventKind::Click);

        page.click(SEARCH_INPUT_ID);

        assert_eq!(on_form.lock().unwrap().len(), 1);
        let doc_events = on_doc.lock().unwrap();
        match &doc_events[0] {
            DomEvent::Click(click) => {
                assert_eq!(click.path, vec![SEARCH_INPUT_ID, SEARCH_FORM_ID]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_focus_fires_only_on_change() {
        let page = MemoryPage::new("/").with_search_form();
        let on_input = recorder(&page, EventTarget::element(SEARCH_INPUT_ID), EventKind::Focus);

        page.focus(SEARCH_INPUT_ID);
        page.focus(SEARCH_INPUT_ID);
        page.blur(SEARCH_INPUT_ID);
        page.focus(SEARCH_INPUT_ID);

        assert_eq!(on_input.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_focus_does_not_bubble() {
        let page = MemoryPage::new("/").with_search_form();
        let on_form = recorder(&page, EventTarget::element(SEARCH_FORM_ID), EventKind::Focus);

        page.focus(SEARCH_INPUT_ID);

        assert!(on_form.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unlisten_stops_delivery() {
        let page = MemoryPage::new("/").with_search_form();
        let seen = Arc::new(Mutex::new(0));
        let counter = seen.clone();
        let id = page.listen(
            EventTarget::Document,
            EventKind::KeyDown,
            EventSink::new(move |_| *counter.lock().unwrap() += 1),
        );

        page.press_key(KeyPress::new("a"));
        page.unlisten(id);
        page.press_key(KeyPress::new("b"));

        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_type_text_sets_value_and_focus() {
        let page = MemoryPage::new("/").with_search_form();

        page.type_text(SEARCH_INPUT_ID, "ann");

        assert_eq!(page.value(SEARCH_INPUT_ID), "ann");
        assert_eq!(page.focused().as_deref(), Some(SEARCH_INPUT_ID));
    }

    #[test]
    fn test_class_queries_and_attributes() {
        let page = MemoryPage::new("/")
            .with_nav_link("/")
            .with_node(&["brand"], &[])
            .with_nav_link("/players");

        let links = page.query_class("nav-link");
        assert_eq!(links.len(), 2);
        assert_eq!(page.attribute(links[1], "href").as_deref(), Some("/players"));

        page.add_class(links[1], "active");
        page.add_class(links[1], "active");
        assert!(page.has_class(links[1], "active"));
        assert!(!page.has_class(links[0], "active"));
    }

    #[test]
    fn test_search_form_starts_hidden() {
        let page = MemoryPage::new("/").with_search_form();

        assert!(!page.is_visible(SEARCH_RESULTS_ID));
        assert!(page.is_visible(SEARCH_INPUT_ID));
    }
}
