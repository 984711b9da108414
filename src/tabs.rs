//! Video tab switching, scoped to one tab container.

use tracing::{debug, warn};

use crate::dom::{Document, NodeId};
use crate::events::Listener;

pub const CONTAINER_CLASS: &str = "video-tab-container";
pub const BUTTON_CLASS: &str = "tab-btn";
pub const PANE_CLASS: &str = "video-tab-pane";
const ACTIVE: &str = "active";

/// Bind every tab button under `root` to its own container. Returns the
/// number of containers found.
pub fn attach(doc: &mut Document, root: NodeId) -> usize {
    let containers = doc.query_class(root, CONTAINER_CLASS);
    for container in &containers {
        for button in doc.query_class(*container, BUTTON_CLASS) {
            doc.add_listener(button, Listener::TabSwitch { container: *container });
        }
    }
    debug!(count = containers.len(), "tab containers bound");
    containers.len()
}

/// Make `button` and its pane the only active ones in `container`.
/// Returns the pane, if one matches the button's `data-tab`.
pub fn activate(doc: &mut Document, container: NodeId, button: NodeId) -> Option<NodeId> {
    for b in doc.query_class(container, BUTTON_CLASS) {
        doc.remove_class(b, ACTIVE);
    }
    let panes = doc.query_class(container, PANE_CLASS);
    for p in &panes {
        doc.remove_class(*p, ACTIVE);
    }
    doc.add_class(button, ACTIVE);

    let target = doc.attr(button, "data-tab").map(str::to_string);
    let pane = target.as_deref().and_then(|id| panes.iter().copied().find(|p| doc.attr(*p, "id") == Some(id)));
    match pane {
        Some(p) => doc.add_class(p, ACTIVE),
        None => warn!(tab = ?target, "no pane matches tab button"),
    }
    pane
}

/// Index of the active button in `container`.
pub fn active_index(doc: &Document, container: NodeId) -> Option<usize> {
    doc.query_class(container, BUTTON_CLASS).iter().position(|b| doc.has_class(*b, ACTIVE))
}
