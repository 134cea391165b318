//! Site assembly.
//!
//! Drives loading, navigation and rendering for every language and page,
//! then writes the result. The build runs in three steps so `check` can stop
//! before touching the filesystem:
//!
//! 1. [`prepare`]: load `site.toml`, the content files and the template
//! 2. [`render_site`]: plan the pages, reject slug collisions, render every
//!    `(language, page)` pair, the landing page and the subsite in memory
//! 3. [`write_site`]: write the rendered files and copy asset directories
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── index.html                 # Language-detecting landing page
//! ├── en/
//! │   ├── life.html              # Biography
//! │   ├── career.html
//! │   ├── hollywood.html
//! │   ├── berlin-1950s.html      # Galleries: slug of the English title
//! │   └── movie-der-film.html    # Movies: prefixed slug
//! ├── de/
//! │   └── ...                    # Same file names as en/
//! ├── subsite/
//! │   └── index.html             # Standalone page, no shared template
//! ├── assets/                    # Copied asset directories
//! └── img/
//! ```
//!
//! ## Slug Namespace
//!
//! All pages of a language share one directory, so the fixed page names,
//! gallery slugs and prefixed movie slugs form a single namespace. Two
//! records mapping to the same file name abort the build before anything
//! is written.

use crate::config::{self, ConfigError, LabelsConfig, SiteConfig};
use crate::load::{self, Content, LoadError};
use crate::nav::{NavLists, build_nav, record_slug};
use crate::render::{PageContext, RenderError, render_page, with_breaks};
use crate::template::{Template, TemplateError};
use crate::types::{ContentKind, Language, PageRecord, ShowcaseRecord};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Load(#[from] LoadError),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{second} would overwrite {first}: both map to {slug}.html")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}

/// File stem of the biography page; the landing page redirects here.
pub const BIOGRAPHY_SLUG: &str = "life";
pub const CAREER_SLUG: &str = "career";
pub const HOLLYWOOD_SLUG: &str = "hollywood";

const LANDING_JS: &str = include_str!("../static/landing.js");
const SUBSITE_CSS: &str = include_str!("../static/subsite.css");
const SUBSITE_JS: &str = include_str!("../static/subsite.js");

/// Everything a build reads, loaded once.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub content: Content,
    pub template: Template,
}

/// A page scheduled for every language.
#[derive(Debug, Clone)]
pub struct PlannedPage<'a> {
    pub slug: String,
    pub record: PageRecord<'a>,
}

/// One generated page of the shared template.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub lang: Language,
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub html: String,
}

impl RenderedPage {
    /// Output path relative to the output root.
    pub fn rel_path(&self) -> String {
        format!("{}/{}.html", self.lang.code(), self.slug)
    }
}

/// The whole site, rendered in memory.
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub pages: Vec<RenderedPage>,
    pub landing: String,
    /// Subsite page, if the content has one.
    pub subsite: Option<String>,
}

/// An asset directory copied into the output.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetCopy {
    pub dir: String,
    pub files: usize,
}

/// Load config, content and template from a source directory.
pub fn prepare(source: &Path) -> Result<Site, GenerateError> {
    let config = config::load_config(source)?;
    let content = load::load_content(source, &config)?;
    let template = Template::load(&source.join(&config.paths.template))?;
    Ok(Site {
        config,
        content,
        template,
    })
}

/// Render every page without writing anything.
///
/// Pages come out in plan order within each language, English first.
pub fn render_site(site: &Site) -> Result<RenderedSite, GenerateError> {
    let config = &site.config;
    let plan = plan_pages(&site.content, &config.navigation.movie_prefix)?;

    let mut pages = Vec::with_capacity(plan.len() * Language::ALL.len());
    for lang in Language::ALL {
        for page in &plan {
            pages.push(render_planned(site, lang, page)?);
        }
    }

    let landing = render_landing(config).into_string();
    let subsite = match &site.content.subsite {
        Some(record) => Some(render_subsite(record, &config.labels)?.into_string()),
        None => None,
    };

    Ok(RenderedSite {
        pages,
        landing,
        subsite,
    })
}

fn render_planned(
    site: &Site,
    lang: Language,
    page: &PlannedPage,
) -> Result<RenderedPage, GenerateError> {
    let config = &site.config;
    let nav = NavLists {
        galleries: build_nav(
            lang,
            &page.slug,
            &site.content.galleries,
            "",
            config.navigation.galleries,
        )?,
        movies: build_nav(
            lang,
            &page.slug,
            &site.content.movies,
            &config.navigation.movie_prefix,
            config.navigation.movies,
        )?,
    };
    let ctx = PageContext {
        lang,
        slug: &page.slug,
        labels: config.labels.for_language(lang),
        classes: &config.classes,
        css_path: &config.paths.css_path,
    };
    let html = render_page(&ctx, page.record, &site.template, &nav)?;
    let title = page
        .record
        .fields()
        .text("title", lang)
        .map_err(|e| RenderError::field(&page.slug, e))?;
    debug!(%lang, slug = %page.slug, kind = %page.record.kind(), "rendered page");
    Ok(RenderedPage {
        lang,
        kind: page.record.kind(),
        slug: page.slug.clone(),
        title: title.to_string(),
        html,
    })
}

/// Write a rendered site into `output` and copy the asset directories.
///
/// Existing files are overwritten; nothing else in `output` is removed.
pub fn write_site(
    site: &Site,
    rendered: &RenderedSite,
    source: &Path,
    output: &Path,
) -> Result<Vec<AssetCopy>, GenerateError> {
    for lang in Language::ALL {
        fs::create_dir_all(output.join(lang.code()))?;
    }
    for page in &rendered.pages {
        fs::write(output.join(page.rel_path()), &page.html)?;
    }
    fs::write(output.join("index.html"), &rendered.landing)?;

    if let Some(subsite) = &rendered.subsite {
        let dir = output.join(&site.config.paths.subsite_dir);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), subsite)?;
    }

    let mut copies = Vec::new();
    for dir in &site.config.paths.assets {
        let src = source.join(dir);
        if !src.is_dir() {
            warn!(dir = %src.display(), "asset directory not found, skipping");
            continue;
        }
        let files = copy_dir_recursive(&src, &output.join(dir))?;
        debug!(dir = %dir, files, "copied assets");
        copies.push(AssetCopy {
            dir: dir.clone(),
            files,
        });
    }
    Ok(copies)
}

/// Full build: prepare, render, write.
pub fn generate(
    source: &Path,
    output: &Path,
) -> Result<(RenderedSite, Vec<AssetCopy>), GenerateError> {
    let site = prepare(source)?;
    let rendered = render_site(&site)?;
    let copies = write_site(&site, &rendered, source, output)?;
    Ok((rendered, copies))
}

/// Decide which pages exist and their slugs, rejecting duplicates.
///
/// Order: biography, career, hollywood, then galleries and movies in file
/// order.
pub fn plan_pages<'a>(
    content: &'a Content,
    movie_prefix: &str,
) -> Result<Vec<PlannedPage<'a>>, GenerateError> {
    let mut plan = vec![PlannedPage {
        slug: BIOGRAPHY_SLUG.to_string(),
        record: PageRecord::Biography(&content.biography),
    }];
    if let Some(career) = &content.career {
        plan.push(PlannedPage {
            slug: CAREER_SLUG.to_string(),
            record: PageRecord::Career(career),
        });
    }
    if let Some(hollywood) = &content.hollywood {
        plan.push(PlannedPage {
            slug: HOLLYWOOD_SLUG.to_string(),
            record: PageRecord::Hollywood(hollywood),
        });
    }
    for gallery in &content.galleries {
        plan.push(PlannedPage {
            slug: record_slug(gallery, "")?,
            record: PageRecord::Gallery(gallery),
        });
    }
    for movie in &content.movies {
        plan.push(PlannedPage {
            slug: record_slug(movie, movie_prefix)?,
            record: PageRecord::Movie(movie),
        });
    }

    let mut owners: HashMap<&str, String> = HashMap::new();
    for page in &plan {
        let owner = describe(page);
        if let Some(first) = owners.insert(&page.slug, owner.clone()) {
            return Err(GenerateError::SlugCollision {
                slug: page.slug.clone(),
                first,
                second: owner,
            });
        }
    }
    Ok(plan)
}

fn describe(page: &PlannedPage) -> String {
    let title = page
        .record
        .fields()
        .text("title", Language::En)
        .unwrap_or(page.slug.as_str());
    format!("{} {:?}", page.record.kind(), title)
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut files = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target: PathBuf = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            files += 1;
        }
    }
    Ok(files)
}

// ============================================================================
// Standalone pages
// ============================================================================

/// Landing page: redirects by browser language, links as fallback.
pub fn render_landing(config: &SiteConfig) -> Markup {
    let en = config.labels.for_language(Language::En);
    // css_path is relative to a language directory, the landing page sits one level up
    let css_path = config.paths.css_path.trim_start_matches("../");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.name) " - " (en.photographer) }
                link href={ (css_path) "style.css" } rel="stylesheet";
                script { (PreEscaped(LANDING_JS)) }
            }
            body class="bg-white dark:bg-gray-950 text-gray-900 dark:text-gray-100" {
                div class="min-h-screen flex items-center justify-center p-8" {
                    div class="text-center" {
                        h1 class="text-5xl font-bold mb-4" { (config.site.name) }
                        p class="text-xl text-gray-600 dark:text-gray-400 mb-8" { (config.site.tagline) }
                        p class="text-gray-600 dark:text-gray-400 mb-4" { (config.site.redirecting) }
                        p class="text-gray-600 dark:text-gray-400 mb-6" { (config.site.choose_language) }
                        div class="flex gap-4 justify-center" {
                            a href={ "en/" (BIOGRAPHY_SLUG) ".html" } class="px-6 py-3 rounded" { "English" }
                            a href={ "de/" (BIOGRAPHY_SLUG) ".html" } class="px-6 py-3 rounded" { "Deutsch" }
                        }
                    }
                }
            }
        }
    }
}

/// Standalone subsite page with both languages, theme toggle and lightbox.
///
/// Photo paths are relative to the site root, like everywhere else, and
/// the page lives one directory below it.
pub fn render_subsite(
    record: &ShowcaseRecord,
    labels: &LabelsConfig,
) -> Result<Markup, RenderError> {
    let mut sections = Vec::with_capacity(Language::ALL.len());
    for lang in Language::ALL {
        let title = record
            .text
            .text("title", lang)
            .map_err(|e| RenderError::field("subsite", e))?;
        let description = record
            .text
            .text("description", lang)
            .map_err(|e| RenderError::field("subsite", e))?;
        let mut figures = Vec::with_capacity(record.photos.len());
        for photo in &record.photos {
            let caption = photo
                .text
                .optional_text("description", lang)
                .map_err(|e| RenderError::field(&format!("subsite photo {}", photo.photo), e))?;
            figures.push(html! {
                figure {
                    img.lightbox-trigger src={ "../" (photo.photo) } alt=(caption.unwrap_or(title)) loading="lazy";
                    @if let Some(caption) = caption {
                        figcaption { (with_breaks(caption)) }
                    }
                }
            });
        }
        let link_label = &labels.for_language(lang).external_link;
        sections.push(html! {
            section data-lang=(lang.code()) hidden[lang != Language::En] {
                h1 { (title) }
                p.subsite-description { (with_breaks(description)) }
                @if let Some(link) = &record.link {
                    p { a href=(link) target="_blank" rel="noopener" { (link_label) } }
                }
                div.subsite-grid {
                    @for figure in &figures {
                        (figure)
                    }
                }
            }
        });
    }

    let page_title = record
        .text
        .text("title", Language::En)
        .map_err(|e| RenderError::field("subsite", e))?;
    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                style { (PreEscaped(SUBSITE_CSS)) }
            }
            body {
                header.subsite-header {
                    @for lang in Language::ALL {
                        button type="button" data-set-lang=(lang.code()) aria-pressed="false" {
                            (lang.code().to_uppercase())
                        }
                    }
                    button id="theme-toggle" type="button" aria-label="Toggle theme" { "◐" }
                }
                main {
                    @for section in &sections {
                        (section)
                    }
                }
                div id="lightbox" class="lightbox" hidden {
                    button type="button" aria-label="Close" { "×" }
                    img alt="";
                }
                script { (PreEscaped(SUBSITE_JS)) }
            }
        }
    })
}
