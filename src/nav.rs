//! Navigation lists for the gallery and movie menus.
//!
//! Each page carries two menus, one per gallery-shaped family. A menu entry
//! is derived on every render from the record collection: its slug comes
//! from the English title, its label from the title in the page language,
//! and it is flagged current when its slug is the page being rendered.
//!
//! Ordering is per family and configurable:
//!
//! - [`SortMode::Insertion`]: the order of the JSON list
//! - [`SortMode::Sorted`]: by case-folded title in the page language, so the
//!   English and German menus may list the same galleries differently.
//!   Folding maps `ß` to `ss`, so "Straße" sorts as "strasse". Equal keys
//!   keep their list order.

use crate::config::ClassConfig;
use crate::naming::slugify;
use crate::render::RenderError;
use crate::types::{Language, ShowcaseRecord};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep the collection order.
    Insertion,
    /// Case-insensitive by title in the page language, stable.
    #[default]
    Sorted,
}

/// One link of a navigation list.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub slug: String,
    pub title: String,
    pub is_current: bool,
}

/// Both menus of a page.
#[derive(Debug, Clone, Default)]
pub struct NavLists {
    pub galleries: Vec<NavEntry>,
    pub movies: Vec<NavEntry>,
}

/// Slug of a gallery-shaped record: `prefix` + slug of its English title.
pub fn record_slug(record: &ShowcaseRecord, prefix: &str) -> Result<String, RenderError> {
    let title = record
        .text
        .text("title", Language::En)
        .map_err(|e| RenderError::field("slug", e))?;
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(RenderError::EmptySlug(title.to_string()));
    }
    Ok(format!("{prefix}{slug}"))
}

/// Build the menu for one family in one language.
pub fn build_nav(
    lang: Language,
    current_slug: &str,
    records: &[ShowcaseRecord],
    prefix: &str,
    mode: SortMode,
) -> Result<Vec<NavEntry>, RenderError> {
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let slug = record_slug(record, prefix)?;
        let title = record
            .text
            .text("title", lang)
            .map_err(|e| RenderError::field(&slug, e))?;
        entries.push(NavEntry {
            is_current: slug == current_slug,
            title: title.to_string(),
            slug,
        });
    }

    if mode == SortMode::Sorted {
        entries.sort_by_cached_key(|entry| fold_case(&entry.title));
    }
    Ok(entries)
}

/// Case-insensitive sort key. Lowercasing turns `ẞ` into `ß`, which full
/// case folding then expands to `ss`.
fn fold_case(title: &str) -> String {
    title.to_lowercase().replace('ß', "ss")
}

/// Render a menu as `<li>` items linking to sibling pages.
pub fn render_nav(entries: &[NavEntry], classes: &ClassConfig) -> Markup {
    html! {
        @for entry in entries {
            li {
                a href={ (entry.slug) ".html" } class=(link_class(classes, entry.is_current)) {
                    (entry.title)
                }
            }
        }
    }
}

fn link_class(classes: &ClassConfig, is_current: bool) -> String {
    match classes.nav(is_current) {
        "" => "nav-link".to_string(),
        active => format!("nav-link {active}"),
    }
}
