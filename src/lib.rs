pub mod accordion;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod fetch;
pub mod icons;
pub mod layout;
pub mod loader;
pub mod markup;
pub mod page;
pub mod render;
pub mod tabs;
pub mod types;
pub mod widget;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::{Config, Labels};
    pub use crate::error::LoadError;
    pub use crate::fetch::{Fetcher, FileFetcher, HttpFetcher, MemoryFetcher, SchemeFetcher};
    pub use crate::icons::{IconRenderer, LucideIcons, NoIcons};
    pub use crate::page::Page;
    pub use crate::types::{Lesson, LessonId, MaterialFile, Slides, SubVideo};
    pub use crate::widget::{LessonAccordion, MountOutcome};
}

pub use config::Config;
pub use error::LoadError;
pub use render::{render_html, render_lessons};
pub use types::{parse_lessons, Lesson};
pub use widget::{LessonAccordion, MountOutcome};
