use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::LoadError;
use crate::fetch::Fetcher;
use crate::icons::{IconRenderer, LucideIcons};
use crate::loader::DataLoader;
use crate::markup::Element;
use crate::page::Page;
use crate::render::render_lessons;
use crate::{accordion, tabs};

/// Result of one mount attempt.
#[derive(Debug)]
pub enum MountOutcome {
    /// The page has no container; nothing was touched.
    NoContainer,
    Rendered { lessons: usize, icons: usize, tab_groups: usize },
    /// The container now shows an error message.
    Failed(LoadError),
}

impl MountOutcome {
    pub fn is_rendered(&self) -> bool { matches!(self, MountOutcome::Rendered { .. }) }
}

/// The lesson accordion widget.
pub struct LessonAccordion {
    cfg: Config,
    fetcher: Arc<dyn Fetcher>,
    icons: Box<dyn IconRenderer>,
}

impl LessonAccordion {
    pub fn new(cfg: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { cfg, fetcher, icons: Box::new(LucideIcons) }
    }

    pub fn with_icons(mut self, icons: impl IconRenderer + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }

    pub fn config(&self) -> &Config { &self.cfg }

    /// Initialization entry point, run once the page structure exists.
    ///
    /// Order: fetch, parse, build markup, insert, icons, accordion listeners,
    /// tab listeners. Any load failure replaces the container content with a
    /// message and stops there.
    pub async fn mount(&self, page: &mut Page) -> MountOutcome {
        let Some(container) = page.element_by_id(&self.cfg.container_id) else {
            debug!(id = %self.cfg.container_id, "no container on page");
            return MountOutcome::NoContainer;
        };
        let labels = &self.cfg.labels;
        let loader = DataLoader::new(&self.cfg, self.fetcher.as_ref());

        let file_name = match loader.source_name(&page.document, container) {
            Ok(name) => name,
            Err(e) => {
                error!(error = %e, "data source not configured");
                page.document.set_content(container, [Element::new("p").text(labels.missing_source.as_str())]);
                return MountOutcome::Failed(e);
            }
        };

        let lessons = match loader.load(&page.location, &file_name).await {
            Ok(lessons) => lessons,
            Err(e) => {
                error!(error = %e, file = %file_name, "failed to load lessons");
                let message = labels.load_failed(&file_name, &e.to_string());
                page.document.set_content(container, [Element::new("p").text(message)]);
                return MountOutcome::Failed(e);
            }
        };

        page.document.set_content(container, render_lessons(&lessons, &self.cfg));
        let icons = self.icons.create_icons(&mut page.document, container);
        accordion::attach(&mut page.document, container);
        let tab_groups = tabs::attach(&mut page.document, container);
        info!(lessons = lessons.len(), icons, tab_groups, "lesson accordion mounted");
        MountOutcome::Rendered { lessons: lessons.len(), icons, tab_groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accordion::{is_expanded, HEADER_CLASS};
    use crate::dom::{Document, NodeId};
    use crate::fetch::MemoryFetcher;
    use crate::tabs::{active_index, BUTTON_CLASS, CONTAINER_CLASS};
    use std::sync::Mutex;
    use url::Url;

    const PAGE: &str = "https://site.test/pages/aulas.html";
    const DATA: &str = "https://site.test/assets/data/aulas.json";
    const LESSONS: &str = r#"[
        {"id": 1, "title": "Introdução", "description": "Visão geral", "youtubeId": "intro1", "slidesUrl": "intro.pdf"},
        {"id": 2, "title": "Laços", "subVideos": [{"title": "for", "youtubeId": "f1"}, {"title": "while", "youtubeId": "w1"}],
         "slidesUrl": [{"url": "a.pdf", "title": "Lista A"}, {"url": "b.pdf", "title": "Lista B"}]},
        {"id": 3, "title": "Revisão"}
    ]"#;

    fn page(attrs: &[(&str, &str)]) -> Page {
        Page::with_container(Url::parse(PAGE).unwrap(), "accordion-wrapper", attrs)
    }

    fn widget(fetcher: Arc<MemoryFetcher>) -> LessonAccordion {
        LessonAccordion::new(Config::default(), fetcher)
    }

    fn container(page: &Page) -> NodeId {
        page.element_by_id("accordion-wrapper").unwrap()
    }

    #[tokio::test]
    async fn renders_items_in_source_order() {
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = page(&[("data-json-source", "aulas.json")]);
        let outcome = widget(fetcher).mount(&mut page).await;
        assert!(matches!(outcome, MountOutcome::Rendered { lessons: 3, tab_groups: 1, .. }));

        let c = container(&page);
        let items = page.document.query_class(c, "accordion-item");
        assert_eq!(items.len(), 3);
        let titles: Vec<String> = page
            .document
            .query_class(c, HEADER_CLASS)
            .into_iter()
            .map(|h| page.document.text_content(h))
            .collect();
        assert_eq!(titles, vec!["Introdução", "Laços", "Revisão"]);
        assert!(!page.document.inner_html(c).contains("Carregando"));
    }

    #[tokio::test]
    async fn icons_are_materialized() {
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = page(&[("data-json-source", "aulas.json")]);
        let outcome = widget(fetcher).mount(&mut page).await;
        // three chevrons, one single-link icon, two list-link icons
        assert!(matches!(outcome, MountOutcome::Rendered { icons: 6, .. }));
        let html = page.document.inner_html(container(&page));
        assert!(!html.contains("<i "));
        assert!(html.contains("lucide-chevron-down accordion-arrow"));
    }

    #[tokio::test]
    async fn clicks_drive_accordion_and_tabs() {
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = page(&[("data-json-source", "aulas.json")]);
        widget(fetcher).mount(&mut page).await;
        let c = container(&page);
        let headers = page.document.query_class(c, HEADER_CLASS);
        let tab_group = page.document.query_class(c, CONTAINER_CLASS)[0];
        let second_tab = page.document.query_class(tab_group, BUTTON_CLASS)[1];

        // clicking the span inside the header bubbles to the header
        let span = page.document.children(headers[1])[0];
        page.click(span);
        assert!(is_expanded(&page.document, headers[1]));
        let panel = page.document.next_element_sibling(headers[1]).unwrap();
        let open_height = page.document.style(panel, "max-height").unwrap().to_string();
        assert_ne!(open_height, "0px");

        let outcome = page.click(second_tab);
        assert!(outcome.propagation_stopped);
        assert_eq!(active_index(&page.document, tab_group), Some(1));
        assert!(is_expanded(&page.document, headers[1]));

        page.click(headers[1]);
        assert!(!is_expanded(&page.document, headers[1]));
        assert_eq!(page.document.style(panel, "max-height"), Some("0px"));
        assert!(!is_expanded(&page.document, headers[0]));
    }

    #[tokio::test]
    async fn missing_attribute_shows_error_without_fetching() {
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = page(&[]);
        let outcome = widget(fetcher.clone()).mount(&mut page).await;
        assert!(matches!(outcome, MountOutcome::Failed(LoadError::MissingSource { .. })));
        assert!(fetcher.requests().is_empty());
        assert_eq!(
            page.document.inner_html(container(&page)),
            "<p>Erro: Fonte de dados JSON não especificada no HTML (data-json-source).</p>"
        );
    }

    #[tokio::test]
    async fn not_found_shows_path_and_status() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let mut page = page(&[("data-json-source", "outra.json")]);
        let outcome = widget(fetcher).mount(&mut page).await;
        assert!(matches!(outcome, MountOutcome::Failed(LoadError::Status { status: 404, .. })));
        assert_eq!(
            page.document.text_content(container(&page)),
            "Não foi possível carregar as aulas de outra.json. Detalhes: Falha ao carregar ../assets/data/outra.json. Status: 404"
        );
    }

    /// Transport that never reaches a server.
    struct OfflineFetcher;

    #[async_trait::async_trait]
    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, _url: &Url) -> anyhow::Result<crate::fetch::FetchResponse> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn transport_failure_shows_cause() {
        let mut page = page(&[("data-json-source", "aulas.json")]);
        let outcome = LessonAccordion::new(Config::default(), Arc::new(OfflineFetcher)).mount(&mut page).await;
        assert!(matches!(
            &outcome,
            MountOutcome::Failed(LoadError::Transport { path, .. }) if path == "../assets/data/aulas.json"
        ));
        let c = container(&page);
        assert!(page.document.query_class(c, "accordion-item").is_empty());
        assert_eq!(
            page.document.text_content(c),
            "Não foi possível carregar as aulas de aulas.json. Detalhes: connection refused"
        );
    }

    #[tokio::test]
    async fn malformed_list_renders_nothing_partial() {
        let body = r#"[{"id": 1, "title": "ok"}, {"id": 2, "title": "bad", "subVideos": "nope"}]"#;
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, body));
        let mut page = page(&[("data-json-source", "aulas.json")]);
        let outcome = widget(fetcher).mount(&mut page).await;
        assert!(matches!(outcome, MountOutcome::Failed(LoadError::Parse(_))));
        let c = container(&page);
        assert!(page.document.query_class(c, "accordion-item").is_empty());
        assert!(page.document.text_content(c).starts_with("Não foi possível carregar as aulas de aulas.json. Detalhes: "));
    }

    #[tokio::test]
    async fn page_without_container_is_left_alone() {
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = Page::new(Url::parse(PAGE).unwrap());
        let outcome = widget(fetcher.clone()).mount(&mut page).await;
        assert!(matches!(outcome, MountOutcome::NoContainer));
        assert!(fetcher.requests().is_empty());
    }

    /// Records what the document looked like when the icon pass ran.
    struct OrderCheck(Arc<Mutex<Option<(usize, usize)>>>);

    impl IconRenderer for OrderCheck {
        fn create_icons(&self, doc: &mut Document, root: NodeId) -> usize {
            let items = doc.query_class(root, "accordion-item").len();
            let listeners = doc.descendants(root).iter().map(|n| doc.listeners(*n).len()).sum::<usize>();
            *self.0.lock().unwrap() = Some((items, listeners));
            0
        }
    }

    #[tokio::test]
    async fn icons_run_after_insert_and_before_listeners() {
        let seen = Arc::new(Mutex::new(None));
        let fetcher = Arc::new(MemoryFetcher::new().with(DATA, 200, LESSONS));
        let mut page = page(&[("data-json-source", "aulas.json")]);
        widget(fetcher).with_icons(OrderCheck(seen.clone())).mount(&mut page).await;
        assert_eq!(*seen.lock().unwrap(), Some((3, 0)));
    }
}
