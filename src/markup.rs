//! Declarative element builder used to describe the widget's markup.
//!
//! Markup is built as an owned tree and either serialized straight to HTML or
//! materialized into a [`crate::dom::Document`]. Text and attribute values are
//! escaped on serialization, so field values from the data file can never
//! open new tags.

use maud::html;

const VOID_TAGS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    /// Attributes in insertion order. `None` is a boolean attribute written
    /// bare; `Some("")` is written as `name=""`.
    pub attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), classes: Vec::new(), attrs: Vec::new(), children: Vec::new() }
    }

    /// Add one or more whitespace-separated classes.
    pub fn class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            if !self.classes.iter().any(|existing| existing == c) {
                self.classes.push(c.to_string());
            }
        }
        self
    }

    pub fn class_if(self, cond: bool, class: &str) -> Self {
        if cond { self.class(class) } else { self }
    }

    pub fn attr(self, name: &str, value: impl Into<String>) -> Self { self.set(name, Some(value.into())) }

    pub fn flag(self, name: &str) -> Self { self.set(name, None) }

    fn set(mut self, name: &str, value: Option<String>) -> Self {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self { self.child(Markup::Text(text.into())) }

    pub fn is_void(&self) -> bool { is_void_tag(&self.tag) }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        write_open_tag(out, &self.tag, &self.classes, &self.attrs);
        if self.is_void() { return; }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self { Markup::Text(text.into()) }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Markup::Element(el) => el.write_html(out),
            Markup::Text(t) => out.push_str(&escape_html(t)),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self { Markup::Element(el) }
}

pub(crate) fn is_void_tag(tag: &str) -> bool { VOID_TAGS.contains(&tag) }

/// Serialize an opening tag. Shared with the document serializer.
pub(crate) fn write_open_tag(out: &mut String, tag: &str, classes: &[String], attrs: &[(String, Option<String>)]) {
    out.push('<');
    out.push_str(tag);
    if !classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_html(&classes.join(" ")));
        out.push('"');
    }
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
    }
    out.push('>');
}

/// Escape text or an attribute value the same way `maud` splices do, so the
/// tree serializer and the `html!` templates agree byte for byte.
pub fn escape_html(input: &str) -> String { html! { (input) }.into_string() }
