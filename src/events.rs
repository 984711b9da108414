//! Click dispatch with bubbling.

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::layout::Layout;
use crate::{accordion, tabs};

/// Behaviour bound to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Expand/collapse the item whose header carries this listener.
    AccordionToggle,
    /// Switch to the tab carrying this listener, within `container`.
    TabSwitch { container: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Listeners that ran, with the node they were bound to.
    pub handled: Vec<(NodeId, Listener)>,
    pub propagation_stopped: bool,
}

/// Deliver a click to `target` and bubble it up through its ancestors.
/// All listeners on one node run; bubbling ends after the node where a
/// listener stopped propagation.
pub fn dispatch_click(doc: &mut Document, target: NodeId, layout: &dyn Layout) -> ClickOutcome {
    let mut outcome = ClickOutcome::default();
    let path: Vec<NodeId> = std::iter::once(target).chain(doc.ancestors(target)).collect();
    for node in path {
        let mut stop = false;
        for listener in doc.listeners(node).to_vec() {
            trace!(?node, ?listener, "click listener");
            if run(doc, node, listener, layout) == Propagation::Stop { stop = true; }
            outcome.handled.push((node, listener));
        }
        if stop {
            outcome.propagation_stopped = true;
            break;
        }
    }
    outcome
}

fn run(doc: &mut Document, node: NodeId, listener: Listener, layout: &dyn Layout) -> Propagation {
    match listener {
        Listener::AccordionToggle => {
            accordion::toggle(doc, node, layout);
            Propagation::Continue
        }
        Listener::TabSwitch { container } => {
            tabs::activate(doc, container, node);
            Propagation::Stop
        }
    }
}
