use std::fmt;

use serde::Deserialize;

/// One entry of the lesson data file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<String>,
    #[serde(default)]
    pub slides_url: Option<Slides>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub sub_videos: Option<Vec<SubVideo>>,
}

/// Lesson ids show up as both numbers and strings in data files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LessonId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonId::Number(n) => write!(f, "{}", n),
            LessonId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Slides {
    Files(Vec<MaterialFile>),
    Link(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialFile {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubVideo {
    pub title: String,
    pub youtube_id: String,
}

/// What the video area of a lesson resolves to. Sub-videos win over a single id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VideoSource<'a> {
    Tabs(&'a [SubVideo]),
    Single(&'a str),
    Pending,
}

/// What the materials section of a lesson resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Materials<'a> {
    Files(&'a [MaterialFile]),
    Link(&'a str),
    None,
}

impl Lesson {
    pub fn video_source(&self) -> VideoSource<'_> {
        match (&self.sub_videos, non_empty(&self.youtube_id)) {
            (Some(videos), _) if !videos.is_empty() => VideoSource::Tabs(videos),
            (_, Some(id)) => VideoSource::Single(id),
            _ => VideoSource::Pending,
        }
    }

    pub fn materials(&self) -> Materials<'_> {
        match &self.slides_url {
            Some(Slides::Files(files)) => Materials::Files(files),
            Some(Slides::Link(url)) if !url.trim().is_empty() => Materials::Link(url),
            _ => Materials::None,
        }
    }

    pub fn description(&self) -> Option<&str> { non_empty(&self.description) }
    pub fn topics(&self) -> Option<&str> { non_empty(&self.topics) }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Parse a lesson list. Any malformed entry fails the whole list.
pub fn parse_lessons(bytes: &[u8]) -> serde_json::Result<Vec<Lesson>> {
    serde_json::from_slice(bytes)
}
