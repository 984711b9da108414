use anyhow::{anyhow, Result};
use std::path::Path;
use url::Url;

use crate::dom::{Document, NodeId};
use crate::events::{dispatch_click, ClickOutcome};
use crate::layout::{BlockLayout, Layout};
use crate::markup::Element;

/// A loaded page: its location, its document and the layout that measures it.
pub struct Page {
    pub location: Url,
    pub document: Document,
    layout: Box<dyn Layout + Send + Sync>,
}

impl Page {
    pub fn new(location: Url) -> Self {
        Self { location, document: Document::new(), layout: Box::new(BlockLayout::default()) }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let abs = if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };
        let location = Url::from_file_path(&abs).map_err(|_| anyhow!("cannot turn {} into a file URL", abs.display()))?;
        Ok(Self::new(location))
    }

    /// Page whose body holds one container element with the given id and
    /// attributes, showing a loading message until the widget is mounted.
    pub fn with_container(location: Url, container_id: &str, attrs: &[(&str, &str)]) -> Self {
        let mut page = Self::new(location);
        let container = attrs
            .iter()
            .fold(Element::new("div").attr("id", container_id), |el, (k, v)| el.attr(k, *v))
            .child(Element::new("p").text("Carregando..."));
        let root = page.document.root();
        page.document.append_markup(root, &container.into());
        page
    }

    pub fn with_layout(mut self, layout: impl Layout + Send + Sync + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn layout(&self) -> &dyn Layout { self.layout.as_ref() }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> { self.document.element_by_id(id) }

    /// Deliver a user click to `target`.
    pub fn click(&mut self, target: NodeId) -> ClickOutcome {
        dispatch_click(&mut self.document, target, self.layout.as_ref())
    }
}
