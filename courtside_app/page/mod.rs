//! The seam between widget logic and a document.
//!
//! Widgets never hold references into a concrete DOM. They address the
//! elements they need by id, query class-bearing nodes for bulk updates, and
//! receive events through listeners they register and later unregister.

use std::fmt;
use std::sync::Arc;

mod memory;

pub use memory::MemoryPage;

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Element(String),
}

impl EventTarget {
    pub fn element(id: &str) -> Self {
        EventTarget::Element(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Focus,
    Submit,
    Click,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }

    /// Ctrl+letter, or Cmd+letter on macOS.
    pub fn is_shortcut(&self, letter: &str) -> bool {
        (self.ctrl || self.meta) && self.key == letter
    }
}

/// A click, described by the ids of the clicked element and its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickEvent {
    /// Innermost first.
    pub path: Vec<String>,
    /// `data-player-id` of the clicked result row, if the click landed on one.
    pub player_id: Option<String>,
}

impl ClickEvent {
    pub fn is_within(&self, id: &str) -> bool {
        self.path.iter().any(|node| node == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Input { value: String },
    Focus,
    Submit,
    Click(ClickEvent),
    KeyDown(KeyPress),
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Input { .. } => EventKind::Input,
            DomEvent::Focus => EventKind::Focus,
            DomEvent::Submit => EventKind::Submit,
            DomEvent::Click(_) => EventKind::Click,
            DomEvent::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Handle to a node returned by class queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub usize);

/// Callback invoked by the page for every matching event.
#[derive(Clone)]
pub struct EventSink(Arc<dyn Fn(DomEvent) + Send + Sync>);

impl EventSink {
    pub fn new(callback: impl Fn(DomEvent) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn emit(&self, event: DomEvent) {
        (self.0)(event)
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventSink")
    }
}

pub trait Page: Send + Sync {
    fn current_path(&self) -> String;

    fn has_element(&self, id: &str) -> bool;

    /// Current value of a form control, empty when the element has none.
    fn value(&self, id: &str) -> String;

    fn set_inner_html(&self, id: &str, html: String);

    fn set_visible(&self, id: &str, visible: bool);

    fn focus(&self, id: &str);

    /// Selects the whole content of a text control.
    fn select(&self, id: &str);

    fn blur(&self, id: &str);

    /// Full-page navigation.
    fn navigate(&self, href: &str);

    fn query_class(&self, class: &str) -> Vec<NodeRef>;

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String>;

    fn add_class(&self, node: NodeRef, class: &str);

    fn listen(&self, target: EventTarget, kind: EventKind, sink: EventSink) -> ListenerId;

    fn unlisten(&self, id: ListenerId);
}
