use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::dom::{Document, NodeId};
use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::types::{parse_lessons, Lesson};

/// Reads the data-file name from a container and loads the lesson list.
pub struct DataLoader<'a> {
    cfg: &'a Config,
    fetcher: &'a dyn Fetcher,
}

impl<'a> DataLoader<'a> {
    pub fn new(cfg: &'a Config, fetcher: &'a dyn Fetcher) -> Self {
        Self { cfg, fetcher }
    }

    /// Name of the data file configured on `container`. Empty counts as missing.
    pub fn source_name(&self, doc: &Document, container: NodeId) -> Result<String, LoadError> {
        doc.attr(container, &self.cfg.source_attribute)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| LoadError::MissingSource {
                container: self.cfg.container_id.clone(),
                attribute: self.cfg.source_attribute.clone(),
            })
    }

    /// Fetch and parse `file_name` from the data directory next to `page`.
    /// Nothing is returned unless the whole list parses.
    pub async fn load(&self, page: &Url, file_name: &str) -> Result<Vec<Lesson>, LoadError> {
        let path = self.cfg.data_path(file_name);
        let url = page.join(&path).map_err(|source| LoadError::InvalidPath { path: path.clone(), source })?;
        debug!(%url, "fetching lessons");
        let resp = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| LoadError::Transport { path: path.clone(), message: format!("{:#}", e) })?;
        if !resp.ok() {
            return Err(LoadError::Status { path, status: resp.status });
        }
        let lessons = parse_lessons(&resp.body)?;
        info!(count = lessons.len(), file = file_name, "lessons loaded");
        Ok(lessons)
    }
}
