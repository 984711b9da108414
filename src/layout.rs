use crate::dom::{Document, NodeData, NodeId};

/// Source of element measurements. A browser would report real layout;
/// [`BlockLayout`] estimates it from the content tree.
pub trait Layout {
    /// Natural height of the element's content in pixels, ignoring its own
    /// `max-height`.
    fn scroll_height(&self, doc: &Document, node: NodeId) -> u32;
}

/// Stacks every element vertically. Text wraps at `chars_per_line`.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub line_height: u32,
    pub chars_per_line: usize,
    pub frame_height: u32,
    /// Elements with one of these classes take no space unless also `active`.
    pub hidden_unless_active: Vec<String>,
}

impl Default for BlockLayout {
    fn default() -> Self {
        Self {
            line_height: 24,
            chars_per_line: 80,
            frame_height: 315,
            hidden_unless_active: vec!["video-tab-pane".to_string()],
        }
    }
}

impl BlockLayout {
    /// Height the element occupies inside its parent.
    fn rendered_height(&self, doc: &Document, node: NodeId) -> u32 {
        if self.is_hidden(doc, node) { return 0; }
        let natural = self.scroll_height(doc, node);
        match doc.style(node, "max-height").and_then(parse_px) {
            Some(limit) => natural.min(limit),
            None => natural,
        }
    }

    fn is_hidden(&self, doc: &Document, node: NodeId) -> bool {
        self.hidden_unless_active.iter().any(|c| doc.has_class(node, c)) && !doc.has_class(node, "active")
    }

    fn text_height(&self, text: &str) -> u32 {
        let chars = text.trim().chars().count();
        if chars == 0 { return 0; }
        let lines = chars.div_ceil(self.chars_per_line.max(1));
        lines as u32 * self.line_height
    }
}

impl Layout for BlockLayout {
    fn scroll_height(&self, doc: &Document, node: NodeId) -> u32 {
        match doc.data(node) {
            NodeData::Text(t) => self.text_height(t),
            NodeData::Element(el) => match el.tag.as_str() {
                "iframe" => self.frame_height,
                "i" | "svg" => 0,
                _ => {
                    let children = doc.children(node);
                    if children.iter().all(|c| doc.element(*c).is_none()) {
                        self.text_height(&doc.text_content(node))
                    } else {
                        children.iter().map(|c| self.rendered_height(doc, *c)).sum()
                    }
                }
            },
        }
    }
}

fn parse_px(value: &str) -> Option<u32> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}
