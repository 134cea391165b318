//! Shared test utilities for the berneis-site test suite.
//!
//! Provides fixture setup, record builders, and lookups into rendered sites
//! that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = prepare(tmp.path()).unwrap();
//! let rendered = render_site(&site).unwrap();
//!
//! let page = find_page(&rendered, Language::De, "berlin-1950s");
//! assert_eq!(page.title, "Berlin 1950er");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::generate::{RenderedPage, RenderedSite};
use crate::nav::{NavEntry, NavLists};
use crate::template::Template;
use crate::types::{BiographyRecord, CareerRecord, Language, ShowcaseRecord};

// =========================================================================
// Fixture setup
// =========================================================================

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn fixture_json<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = fixtures_dir().join("data").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("invalid fixture {}: {e}", path.display()))
}

// =========================================================================
// Records
// =========================================================================

/// Build a gallery-shaped record from inline JSON.
pub fn record(value: serde_json::Value) -> ShowcaseRecord {
    serde_json::from_value(value).unwrap()
}

/// Minimal gallery-shaped record with titles and descriptions in both languages.
pub fn showcase(title_en: &str, title_de: &str) -> ShowcaseRecord {
    record(serde_json::json!({
        "title_en": title_en,
        "title_de": title_de,
        "description_en": format!("About {title_en}."),
        "description_de": format!("Über {title_de}."),
        "photos": []
    }))
}

/// The fixture biography: portrait, three events out of date order, one event photo.
pub fn biography() -> BiographyRecord {
    fixture_json("life.json")
}

/// The fixture career record.
pub fn career() -> CareerRecord {
    fixture_json("career.json")
}

/// The fixture page template.
pub fn fixture_template() -> Template {
    Template::load(&fixtures_dir().join("template.html")).unwrap()
}

/// One gallery entry (current) and one movie entry.
pub fn nav_lists() -> NavLists {
    NavLists {
        galleries: vec![NavEntry {
            slug: "berlin".to_string(),
            title: "Berlin".to_string(),
            is_current: true,
        }],
        movies: vec![NavEntry {
            slug: "movie-der-film".to_string(),
            title: "Der Film".to_string(),
            is_current: false,
        }],
    }
}

// =========================================================================
// Rendered site lookups, panicking with a clear message on miss
// =========================================================================

/// Find a rendered page by language and slug. Panics if not found.
pub fn find_page<'a>(rendered: &'a RenderedSite, lang: Language, slug: &str) -> &'a RenderedPage {
    rendered
        .pages
        .iter()
        .find(|p| p.lang == lang && p.slug == slug)
        .unwrap_or_else(|| {
            let slugs = page_slugs(rendered, lang);
            panic!("page '{slug}' not found in {lang}. Available: {slugs:?}")
        })
}

/// Slugs rendered for one language, in render order.
pub fn page_slugs(rendered: &RenderedSite, lang: Language) -> Vec<&str> {
    rendered
        .pages
        .iter()
        .filter(|p| p.lang == lang)
        .map(|p| p.slug.as_str())
        .collect()
}
