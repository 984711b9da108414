use tracing::{debug, warn};

use crate::dom::{Document, NodeId};
use crate::markup::Element;

/// Icon pass run after the markup is inserted. Turns placeholders into
/// visible glyphs.
pub trait IconRenderer: Send + Sync {
    /// Materialize every placeholder under `root`; returns how many were replaced.
    fn create_icons(&self, doc: &mut Document, root: NodeId) -> usize;
}

/// Renders `<i data-lucide="name">` placeholders as Lucide-style `<svg>` elements.
#[derive(Debug, Clone, Default)]
pub struct LucideIcons;

const SVG_ATTRS: &[(&str, &str)] = &[
    ("xmlns", "http://www.w3.org/2000/svg"),
    ("width", "24"),
    ("height", "24"),
    ("viewBox", "0 0 24 24"),
    ("fill", "none"),
    ("stroke", "currentColor"),
    ("stroke-width", "2"),
    ("stroke-linecap", "round"),
    ("stroke-linejoin", "round"),
];

/// Path data for the glyphs the widget places, from the Lucide icon set.
const ICON_PATHS: &[(&str, &[&str])] = &[
    ("chevron-down", &["m6 9 6 6 6-6"]),
    (
        "file-text",
        &[
            "M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z",
            "M14 2v4a2 2 0 0 0 2 2h4",
            "M10 9H8",
            "M16 13H8",
            "M16 17H8",
        ],
    ),
];

fn icon_paths(name: &str) -> Option<&'static [&'static str]> {
    ICON_PATHS.iter().find(|(n, _)| *n == name).map(|(_, paths)| *paths)
}

impl IconRenderer for LucideIcons {
    fn create_icons(&self, doc: &mut Document, root: NodeId) -> usize {
        let placeholders: Vec<(NodeId, String)> = doc
            .descendants(root)
            .into_iter()
            .filter(|n| doc.tag(*n) == Some("i"))
            .filter_map(|n| doc.attr(n, "data-lucide").map(|name| (n, name.to_string())))
            .collect();
        let mut rendered = 0;
        for (node, name) in &placeholders {
            let Some(paths) = icon_paths(name) else {
                warn!(icon = %name, "unknown icon, placeholder left as is");
                continue;
            };
            doc.set_tag(*node, "svg");
            doc.prepend_class(*node, &format!("lucide-{}", name));
            doc.prepend_class(*node, "lucide");
            for (k, v) in SVG_ATTRS {
                doc.set_attr(*node, k, v);
            }
            doc.clear_children(*node);
            for d in paths.iter() {
                doc.append_markup(*node, &Element::new("path").attr("d", *d).into());
            }
            rendered += 1;
        }
        debug!(count = rendered, "icons rendered");
        rendered
    }
}

/// Leaves placeholders untouched.
#[derive(Debug, Clone, Default)]
pub struct NoIcons;

impl IconRenderer for NoIcons {
    fn create_icons(&self, _doc: &mut Document, _root: NodeId) -> usize { 0 }
}
