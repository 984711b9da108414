//! Expand/collapse behaviour of accordion items.

use tracing::{debug, warn};

use crate::dom::{Document, NodeId};
use crate::events::Listener;
use crate::layout::Layout;

pub const HEADER_CLASS: &str = "accordion-header";
pub const ACTIVE_CLASS: &str = "active";

/// Bind the toggle listener to every header under `root`. Returns the number bound.
pub fn attach(doc: &mut Document, root: NodeId) -> usize {
    let headers = doc.query_class(root, HEADER_CLASS);
    for header in &headers {
        doc.add_listener(*header, Listener::AccordionToggle);
    }
    debug!(count = headers.len(), "accordion headers bound");
    headers.len()
}

/// Flip one item between collapsed and expanded. Returns true when expanded.
///
/// The panel following the header gets `max-height` set to its natural
/// height when expanding and `0px` when collapsing, so a CSS transition on
/// `max-height` animates the change.
pub fn toggle(doc: &mut Document, header: NodeId, layout: &dyn Layout) -> bool {
    let expanded = doc.toggle_class(header, ACTIVE_CLASS);
    doc.set_attr(header, "aria-expanded", if expanded { "true" } else { "false" });
    match doc.next_element_sibling(header) {
        Some(content) => {
            let height = if expanded { layout.scroll_height(doc, content) } else { 0 };
            doc.set_style(content, "max-height", &format!("{}px", height));
        }
        None => warn!(?header, "accordion header has no content panel"),
    }
    expanded
}

pub fn is_expanded(doc: &Document, header: NodeId) -> bool {
    doc.attr(header, "aria-expanded") == Some("true")
}
