//! Content loading.
//!
//! Reads the content JSON files named in [`FilesConfig`] from the data
//! directory. Each family has a fixed file and a fixed shape:
//!
//! | Family | File (default) | Shape |
//! |--------|----------------|-------|
//! | Biography | `life.json` | object with `events` list |
//! | Career | `career.json` | object with `content_<lang>` section objects |
//! | Galleries | `galleries.json` | list of gallery objects |
//! | Movies | `movies.json` | list of gallery objects with `link` / `imdb` |
//! | Hollywood | `hollywood.json` | one gallery object |
//! | Subsite | `subsite.json` | one gallery object |
//!
//! The biography is required. Every other file may be missing, in which case
//! its family produces no pages. Loading only parses: whether the localized
//! fields a page needs are present is checked when the page is rendered.

use crate::config::{FilesConfig, SiteConfig};
use crate::types::{BiographyRecord, CareerRecord, ShowcaseRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("required content file {0} not found")]
    Missing(PathBuf),
}

/// All content of one build, read-only after loading.
#[derive(Debug, Clone)]
pub struct Content {
    pub biography: BiographyRecord,
    pub career: Option<CareerRecord>,
    pub galleries: Vec<ShowcaseRecord>,
    pub movies: Vec<ShowcaseRecord>,
    pub hollywood: Option<ShowcaseRecord>,
    pub subsite: Option<ShowcaseRecord>,
}

/// Load every content family from `<source>/<paths.data_dir>`.
pub fn load_content(source: &Path, config: &SiteConfig) -> Result<Content, LoadError> {
    let data_dir = source.join(&config.paths.data_dir);
    load_from_dir(&data_dir, &config.files)
}

pub fn load_from_dir(data_dir: &Path, files: &FilesConfig) -> Result<Content, LoadError> {
    let biography_path = data_dir.join(&files.biography);
    let biography = read_json(&biography_path)?.ok_or(LoadError::Missing(biography_path))?;

    Ok(Content {
        biography,
        career: read_json(&data_dir.join(&files.career))?,
        galleries: read_json(&data_dir.join(&files.galleries))?.unwrap_or_default(),
        movies: read_json(&data_dir.join(&files.movies))?.unwrap_or_default(),
        hollywood: read_json(&data_dir.join(&files.hollywood))?,
        subsite: read_json(&data_dir.join(&files.subsite))?,
    })
}

/// Parse a JSON file, `Ok(None)` if it does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, LoadError> {
    if !path.exists() {
        debug!(path = %path.display(), "content file absent");
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "content file loaded");
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_fixtures;
    use crate::types::Language;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn loads_fixture_site() {
        let tmp = setup_fixtures();
        let content = load_content(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(content.biography.events.len(), 3);
        assert!(content.career.is_some());
        assert_eq!(content.galleries.len(), 3);
        assert_eq!(content.movies.len(), 2);
        assert!(content.hollywood.is_some());
        assert!(content.subsite.is_some());
    }

    #[test]
    fn gallery_order_follows_file() {
        let tmp = setup_fixtures();
        let content = load_content(tmp.path(), &SiteConfig::default()).unwrap();
        let titles: Vec<&str> = content
            .galleries
            .iter()
            .map(|g| g.text.text("title", Language::En).unwrap())
            .collect();
        assert_eq!(titles, vec!["Berlin 1950s", "Portraits", "Café Society"]);
    }

    #[test]
    fn optional_families_may_be_absent() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "life.json",
            r#"{"title_en": "Life", "title_de": "Leben", "events": []}"#,
        );
        let content = load_from_dir(tmp.path(), &FilesConfig::default()).unwrap();
        assert!(content.career.is_none());
        assert!(content.galleries.is_empty());
        assert!(content.movies.is_empty());
        assert!(content.hollywood.is_none());
        assert!(content.subsite.is_none());
    }

    #[test]
    fn biography_is_required() {
        let tmp = TempDir::new().unwrap();
        let err = load_from_dir(tmp.path(), &FilesConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Missing(ref p) if p.ends_with("life.json")));
    }

    #[test]
    fn malformed_json_names_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "life.json", r#"{"title_en": "Life", "events": []}"#);
        write(tmp.path(), "galleries.json", "[{\"title_en\": ");
        let err = load_from_dir(tmp.path(), &FilesConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().contains("galleries.json"), "{err}");
    }

    #[test]
    fn wrong_shape_is_json_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "life.json", r#"{"title_en": "Life", "events": []}"#);
        // A single object where a list is expected
        write(tmp.path(), "movies.json", r#"{"title_en": "Film"}"#);
        let err = load_from_dir(tmp.path(), &FilesConfig::default()).unwrap_err();
        assert!(err.to_string().contains("movies.json"), "{err}");
    }

    #[test]
    fn custom_file_names() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bio.json", r#"{"title_en": "Life", "events": []}"#);
        write(tmp.path(), "films.json", r#"[{"title_en": "Film"}]"#);
        let files = FilesConfig {
            biography: "bio.json".to_string(),
            movies: "films.json".to_string(),
            ..FilesConfig::default()
        };
        let content = load_from_dir(tmp.path(), &files).unwrap();
        assert_eq!(content.movies.len(), 1);
    }
}
