//! Headless document the widget is mounted into.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Replacing an
//! element's content detaches the old children; detached nodes stay in the
//! arena but are unreachable from the root.

use crate::events::Listener;
use crate::markup::{escape_html, is_void_tag, write_open_tag, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub classes: Vec<String>,
    /// `None` marks a boolean attribute.
    pub attrs: Vec<(String, Option<String>)>,
    /// Inline style properties, written as the `style` attribute.
    pub style: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl Document {
    /// Empty document with a `body` root.
    pub fn new() -> Self {
        let mut doc = Self { nodes: Vec::new(), root: NodeId(0) };
        doc.root = doc.create_element("body");
        doc
    }

    pub fn root(&self) -> NodeId { self.root }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: Vec::new(),
            style: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { data, parent: None, children: Vec::new(), listeners: Vec::new() });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Materialize a markup tree under `parent`, returning its top node.
    pub fn append_markup(&mut self, parent: NodeId, markup: &Markup) -> NodeId {
        let id = match markup {
            Markup::Text(t) => self.create_text(t),
            Markup::Element(el) => {
                let id = self.push(NodeData::Element(ElementData {
                    tag: el.tag.clone(),
                    classes: el.classes.clone(),
                    attrs: el.attrs.clone(),
                    style: Vec::new(),
                }));
                for child in &el.children {
                    self.append_markup(id, child);
                }
                id
            }
        };
        self.append_child(parent, id);
        id
    }

    /// Replace all children of `parent` with the given markup.
    pub fn set_content<I, M>(&mut self, parent: NodeId, content: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.clear_children(parent);
        content.into_iter().map(|m| self.append_markup(parent, &m.into())).collect()
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        for child in std::mem::take(&mut self.nodes[parent.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn data(&self, id: NodeId) -> &NodeData { &self.nodes[id.0].data }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> { self.element(id).map(|e| e.tag.as_str()) }

    pub fn set_tag(&mut self, id: NodeId, tag: &str) {
        if let Some(el) = self.element_mut(id) { el.tag = tag.to_string(); }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].parent }

    pub fn children(&self, id: NodeId) -> &[NodeId] { &self.nodes[id.0].children }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|s| *s == id)?;
        siblings[pos + 1..].iter().copied().find(|s| self.element(*s).is_some())
    }

    /// Element ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Elements under `root` carrying `class`, in document order.
    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root).into_iter().filter(|n| self.has_class(*n, class)).collect()
    }

    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(root).into_iter().find(|n| self.attr(*n, "id") == Some(id))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if self.attr(self.root, "id") == Some(id) { return Some(self.root); }
        self.find_by_id(self.root, id)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).map_or(false, |e| e.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            if !el.classes.iter().any(|c| c == class) { el.classes.push(class.to_string()); }
        }
    }

    pub fn prepend_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            if !el.classes.iter().any(|c| c == class) { el.classes.insert(0, class.to_string()); }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) { el.classes.retain(|c| c != class); }
    }

    /// Toggle `class`; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    /// Attribute value; a boolean attribute reads as `""`, like `getAttribute`.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            match el.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = Some(value.to_string()),
                None => el.attrs.push((name.to_string(), Some(value.to_string()))),
            }
        }
    }

    pub fn style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.element(id)?.style.iter().find(|(k, _)| k == prop).map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, id: NodeId, prop: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            match el.style.iter_mut().find(|(k, _)| k == prop) {
                Some((_, v)) => *v = value.to_string(),
                None => el.style.push((prop.to_string(), value.to_string())),
            }
        }
    }

    pub fn add_listener(&mut self, id: NodeId, listener: Listener) {
        self.nodes[id.0].listeners.push(listener);
    }

    pub fn listeners(&self, id: NodeId) -> &[Listener] { &self.nodes[id.0].listeners }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeData::Text(t) = self.data(id) { out.push_str(t); }
        for n in self.descendants(id) {
            if let NodeData::Text(t) = self.data(n) { out.push_str(t); }
        }
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(t) => out.push_str(&escape_html(t)),
            NodeData::Element(el) => {
                if el.style.is_empty() {
                    write_open_tag(out, &el.tag, &el.classes, &el.attrs);
                } else {
                    let style = el.style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect::<Vec<_>>().join("; ");
                    let mut attrs = el.attrs.clone();
                    attrs.push(("style".to_string(), Some(style)));
                    write_open_tag(out, &el.tag, &el.classes, &attrs);
                }
                if is_void_tag(&el.tag) { return; }
                for child in self.children(id) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}
