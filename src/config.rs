use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

/// Widget configuration. Every field has a default, so a config file only
/// needs the values it wants to change.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Id of the element the lesson list is mounted into.
    pub container_id: String,
    /// Container attribute naming the data file.
    pub source_attribute: String,
    /// Directory holding the data files, relative to the page.
    pub data_dir: String,
    /// Embed URL prefix; the video id is appended.
    pub embed_base: String,
    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_id: "accordion-wrapper".to_string(),
            source_attribute: "data-json-source".to_string(),
            data_dir: "../assets/data".to_string(),
            embed_base: "https://www.youtube.com/embed/".to_string(),
            labels: Labels::default(),
        }
    }
}

/// Visible strings. `{file}` and `{detail}` are substituted in `load_failed`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Labels {
    pub missing_source: String,
    pub load_failed: String,
    pub description_heading: String,
    pub topics_heading: String,
    pub materials_heading: String,
    pub no_description: String,
    pub no_topics: String,
    pub generic_material: String,
    pub no_materials: String,
    pub video_pending: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            missing_source: "Erro: Fonte de dados JSON não especificada no HTML (data-json-source).".to_string(),
            load_failed: "Não foi possível carregar as aulas de {file}. Detalhes: {detail}".to_string(),
            description_heading: "Descrição da Aula".to_string(),
            topics_heading: "Tópicos Abordados".to_string(),
            materials_heading: "Materiais de Apoio".to_string(),
            no_description: "Sem descrição.".to_string(),
            no_topics: "Sem tópicos definidos.".to_string(),
            generic_material: "Slides da Aula / Material de Apoio".to_string(),
            no_materials: "Nenhum material de apoio disponível para esta aula.".to_string(),
            video_pending: "O vídeo para esta aula será disponibilizado em breve.".to_string(),
        }
    }
}

impl Labels {
    pub fn load_failed(&self, file: &str, detail: &str) -> String {
        self.load_failed.replace("{file}", file).replace("{detail}", detail)
    }
}

impl Config {
    /// Load from an explicit path, else the per-user config file if present,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Relative path of a data file, as the page would request it.
    pub fn data_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.data_dir.trim_end_matches('/'), file_name)
    }

    pub fn embed_url(&self, video_id: &str) -> String {
        format!("{}{}", self.embed_base, video_id)
    }
}

fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "lesson-accordion", "lesson-accordion")?;
    Some(proj.config_dir().join("config.toml"))
}
