//! Lesson to markup transformation.
//!
//! Two renditions of the same item shape: [`render_lessons`] builds an
//! element tree for mounting into a [`crate::dom::Document`], and
//! [`render_html`] writes the string form straight from `maud` templates.

use maud::html;

use crate::config::Config;
use crate::markup::{Element, Markup};
use crate::types::{Lesson, Materials, VideoSource};

const IFRAME_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Build one accordion item per lesson, in source order.
pub fn render_lessons(lessons: &[Lesson], cfg: &Config) -> Vec<Element> {
    lessons.iter().map(|l| lesson_item(l, cfg)).collect()
}

/// HTML for a whole lesson list.
pub fn render_html(lessons: &[Lesson], cfg: &Config) -> String {
    html! {
        @for lesson in lessons {
            (lesson_item_html(lesson, cfg))
        }
    }
    .into_string()
}

fn lesson_item_html(lesson: &Lesson, cfg: &Config) -> maud::Markup {
    let labels = &cfg.labels;
    html! {
        div class="accordion-item" {
            button class="accordion-header" aria-expanded="false" {
                span { (lesson.title) }
                i class="accordion-arrow" data-lucide="chevron-down" {}
            }
            div class="accordion-content" {
                div class="accordion-content-inner" {
                    div class="lesson-details" {
                        h4 { (labels.description_heading) }
                        p { (lesson.description().unwrap_or(labels.no_description.as_str())) }
                        h4 { (labels.topics_heading) }
                        p { (lesson.topics().unwrap_or(labels.no_topics.as_str())) }
                    }
                    (video_area_html(lesson, cfg))
                    div class="material-section" {
                        h4 { (labels.materials_heading) }
                        @match lesson.materials() {
                            Materials::Files(files) => {
                                @for file in files {
                                    (material_link_html(&file.url, &file.title))
                                }
                            }
                            Materials::Link(url) => {
                                (material_link_html(url, &labels.generic_material))
                            }
                            Materials::None => {
                                p { (labels.no_materials) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn material_link_html(url: &str, label: &str) -> maud::Markup {
    html! {
        div class="material-item" {
            a href=(url) target="_blank" download {
                i data-lucide="file-text" {}
                span { (label) }
            }
        }
    }
}

fn video_area_html(lesson: &Lesson, cfg: &Config) -> maud::Markup {
    match lesson.video_source() {
        VideoSource::Tabs(videos) => html! {
            div class="video-tab-container" {
                nav class="tab-navigation" {
                    @for (index, video) in videos.iter().enumerate() {
                        button class=(if index == 0 { "tab-btn active" } else { "tab-btn" }) data-tab=(tab_id(lesson, index)) {
                            (video.title)
                        }
                    }
                }
                div class="tab-content" {
                    @for (index, video) in videos.iter().enumerate() {
                        div class=(if index == 0 { "video-tab-pane active" } else { "video-tab-pane" }) id=(tab_id(lesson, index)) {
                            (video_frame_html(cfg, &video.youtube_id, &video.title))
                        }
                    }
                }
            }
        },
        VideoSource::Single(id) => video_frame_html(cfg, id, &lesson.title),
        VideoSource::Pending => html! { p { (cfg.labels.video_pending) } },
    }
}

fn video_frame_html(cfg: &Config, video_id: &str, title: &str) -> maud::Markup {
    html! {
        div class="video-container" {
            iframe src=(cfg.embed_url(video_id)) title=(title) frameborder="0" allow=(IFRAME_ALLOW) allowfullscreen loading="lazy" {}
        }
    }
}

/// Icon placeholder, materialized later by an [`crate::icons::IconRenderer`].
pub fn icon(name: &str) -> Element {
    Element::new("i").attr("data-lucide", name)
}

pub fn lesson_item(lesson: &Lesson, cfg: &Config) -> Element {
    let labels = &cfg.labels;
    let header = Element::new("button")
        .class("accordion-header")
        .attr("aria-expanded", "false")
        .child(Element::new("span").text(lesson.title.as_str()))
        .child(icon("chevron-down").class("accordion-arrow"));

    let details = Element::new("div")
        .class("lesson-details")
        .child(Element::new("h4").text(labels.description_heading.as_str()))
        .child(Element::new("p").text(lesson.description().unwrap_or(labels.no_description.as_str())))
        .child(Element::new("h4").text(labels.topics_heading.as_str()))
        .child(Element::new("p").text(lesson.topics().unwrap_or(labels.no_topics.as_str())));

    let materials = Element::new("div")
        .class("material-section")
        .child(Element::new("h4").text(labels.materials_heading.as_str()))
        .children(materials_section(lesson, cfg));

    let inner = Element::new("div")
        .class("accordion-content-inner")
        .child(details)
        .child(video_area(lesson, cfg))
        .child(materials);

    Element::new("div")
        .class("accordion-item")
        .child(header)
        .child(Element::new("div").class("accordion-content").child(inner))
}

pub fn materials_section(lesson: &Lesson, cfg: &Config) -> Vec<Markup> {
    match lesson.materials() {
        Materials::Files(files) => files
            .iter()
            .map(|f| material_link(&f.url, &f.title).into())
            .collect(),
        Materials::Link(url) => vec![material_link(url, &cfg.labels.generic_material).into()],
        Materials::None => vec![Element::new("p").text(cfg.labels.no_materials.as_str()).into()],
    }
}

fn material_link(url: &str, label: &str) -> Element {
    let link = Element::new("a")
        .attr("href", url)
        .attr("target", "_blank")
        .flag("download")
        .child(icon("file-text"))
        .child(Element::new("span").text(label));
    Element::new("div").class("material-item").child(link)
}

pub fn video_area(lesson: &Lesson, cfg: &Config) -> Markup {
    match lesson.video_source() {
        VideoSource::Tabs(videos) => {
            let mut nav = Element::new("nav").class("tab-navigation");
            let mut content = Element::new("div").class("tab-content");
            for (index, video) in videos.iter().enumerate() {
                let pane_id = tab_id(lesson, index);
                nav = nav.child(
                    Element::new("button")
                        .class("tab-btn")
                        .class_if(index == 0, "active")
                        .attr("data-tab", pane_id.as_str())
                        .text(video.title.as_str()),
                );
                content = content.child(
                    Element::new("div")
                        .class("video-tab-pane")
                        .class_if(index == 0, "active")
                        .attr("id", pane_id)
                        .child(video_frame(cfg, &video.youtube_id, &video.title)),
                );
            }
            Element::new("div").class("video-tab-container").child(nav).child(content).into()
        }
        VideoSource::Single(id) => video_frame(cfg, id, &lesson.title).into(),
        VideoSource::Pending => Element::new("p").text(cfg.labels.video_pending.as_str()).into(),
    }
}

/// Shared identifier between a tab button's `data-tab` and its pane's `id`.
pub fn tab_id(lesson: &Lesson, index: usize) -> String {
    format!("video-{}-{}", lesson.id, index)
}

fn video_frame(cfg: &Config, video_id: &str, title: &str) -> Element {
    let frame = Element::new("iframe")
        .attr("src", cfg.embed_url(video_id))
        .attr("title", title)
        .attr("frameborder", "0")
        .attr("allow", IFRAME_ALLOW)
        .flag("allowfullscreen")
        .attr("loading", "lazy");
    Element::new("div").class("video-container").child(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_lessons;

    fn lessons(json: &str) -> Vec<Lesson> {
        parse_lessons(json.as_bytes()).unwrap()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn one_item_per_lesson_in_order() {
        let ls = lessons(r#"[{"id": 1, "title": "Primeira"}, {"id": 2, "title": "Segunda"}, {"id": 3, "title": "Terceira"}]"#);
        let html = render_html(&ls, &Config::default());
        assert_eq!(count(&html, r#"<div class="accordion-item">"#), 3);
        let a = html.find("Primeira").unwrap();
        let b = html.find("Segunda").unwrap();
        let c = html.find("Terceira").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn list_slides_produce_one_titled_link_each() {
        let ls = lessons(r#"[{"id": 4, "title": "Aula 04", "slidesUrl": [
            {"url": "a.pdf", "title": "Lista de exercícios"},
            {"url": "b.pdf", "title": "Gabarito"}]}]"#);
        let html = render_html(&ls, &Config::default());
        assert_eq!(count(&html, "<a href="), 2);
        assert!(html.contains(r#"<a href="a.pdf" target="_blank" download><i data-lucide="file-text"></i><span>Lista de exercícios</span></a>"#));
        assert!(html.contains("<span>Gabarito</span>"));
        assert!(!html.contains("Slides da Aula"));
    }

    #[test]
    fn single_slides_link_uses_generic_label() {
        let ls = lessons(r#"[{"id": 1, "title": "t", "slidesUrl": "slides.pdf"}]"#);
        let html = render_html(&ls, &Config::default());
        assert_eq!(count(&html, "<a href="), 1);
        assert!(html.contains("<span>Slides da Aula / Material de Apoio</span>"));
    }

    #[test]
    fn missing_slides_render_placeholder_without_links() {
        let ls = lessons(r#"[{"id": 1, "title": "t", "slidesUrl": ""}, {"id": 2, "title": "u"}]"#);
        let html = render_html(&ls, &Config::default());
        assert_eq!(count(&html, "<a href="), 0);
        assert_eq!(count(&html, "Nenhum material de apoio disponível para esta aula."), 2);
    }

    #[test]
    fn sub_videos_render_tabs_with_first_active() {
        let ls = lessons(r#"[{"id": 7, "title": "t", "youtubeId": "ignored", "subVideos": [
            {"title": "Parte 1", "youtubeId": "aaa"},
            {"title": "Parte 2", "youtubeId": "bbb"},
            {"title": "Parte 3", "youtubeId": "ccc"}]}]"#);
        let html = render_html(&ls, &Config::default());
        assert_eq!(count(&html, "<button class=\"tab-btn"), 3);
        assert_eq!(count(&html, "<div class=\"video-tab-pane"), 3);
        assert_eq!(count(&html, "<iframe"), 3);
        assert!(html.contains(r#"<button class="tab-btn active" data-tab="video-7-0">Parte 1</button>"#));
        assert!(html.contains(r#"<button class="tab-btn" data-tab="video-7-2">Parte 3</button>"#));
        assert!(html.contains(r#"<div class="video-tab-pane active" id="video-7-0">"#));
        assert!(html.contains(r#"<div class="video-tab-pane" id="video-7-1">"#));
        assert!(!html.contains("embed/ignored"));
    }

    #[test]
    fn single_video_and_placeholder() {
        let ls = lessons(r#"[{"id": 1, "title": "Com vídeo", "youtubeId": "xyz"}, {"id": 2, "title": "Sem vídeo"}]"#);
        let cfg = Config::default();
        let single = video_area(&ls[0], &cfg).to_html();
        assert_eq!(count(&single, "<iframe"), 1);
        assert!(single.contains(r#"src="https://www.youtube.com/embed/xyz" title="Com vídeo""#));
        assert!(single.contains("allowfullscreen loading=\"lazy\""));
        let pending = video_area(&ls[1], &cfg).to_html();
        assert_eq!(pending, "<p>O vídeo para esta aula será disponibilizado em breve.</p>");
    }

    #[test]
    fn item_starts_collapsed_with_defaults_for_missing_text() {
        let ls = lessons(r#"[{"id": 1, "title": "t"}]"#);
        let html = lesson_item(&ls[0], &Config::default()).to_html();
        assert!(html.starts_with(r#"<div class="accordion-item"><button class="accordion-header" aria-expanded="false"><span>t</span><i class="accordion-arrow" data-lucide="chevron-down"></i></button>"#));
        assert!(html.contains("<p>Sem descrição.</p>"));
        assert!(html.contains("<p>Sem tópicos definidos.</p>"));
    }

    #[test]
    fn string_and_tree_renditions_agree() {
        let ls = lessons(r#"[
            {"id": 1, "title": "Tom & \"Jerry\"", "description": "a < b", "topics": "x",
             "slidesUrl": [{"url": "a.pdf?x=1&y=2", "title": "Lista"}], "youtubeId": "abc"},
            {"id": "dois", "title": "", "slidesUrl": "s.pdf", "subVideos": [
                {"title": "Parte 1", "youtubeId": "p1"}, {"title": "", "youtubeId": "p2"}]},
            {"id": 3, "title": "Vazia"}]"#);
        let cfg = Config::default();
        let tree: String = render_lessons(&ls, &cfg).iter().map(Element::to_html).collect();
        assert_eq!(render_html(&ls, &cfg), tree);
    }

    #[test]
    fn empty_video_title_keeps_title_attribute() {
        let ls = lessons(r#"[{"id": 9, "title": "", "youtubeId": "abc"}]"#);
        let html = render_html(&ls, &Config::default());
        assert!(html.contains(r#"title="" frameborder="0""#));
        let tree = video_area(&ls[0], &Config::default()).to_html();
        assert!(tree.contains(r#"title="" frameborder="0""#));
    }

    #[test]
    fn user_content_is_escaped() {
        let ls = lessons(r#"[{"id": 1, "title": "<img src=x onerror=alert(1)>", "slidesUrl": "\" onclick=\"x"}]"#);
        let html = render_html(&ls, &Config::default());
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains(r#"href="&quot; onclick=&quot;x""#));
    }
}
