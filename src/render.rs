//! Page rendering.
//!
//! A page is built in two steps:
//!
//! 1. [`render_content`] turns one record into the HTML body fragment for
//!    its family, using [maud](https://maud.lambda.xyz/) so every piece of
//!    record text is escaped.
//! 2. [`render_page`] substitutes that fragment into the shared
//!    [`Template`] together with the page title, both navigation menus, the
//!    active-state classes and the localized labels.
//!
//! ## Fragments per family
//!
//! | Family | Body |
//! |--------|------|
//! | Biography | title, description, optional portrait, then one block per event in list order |
//! | Career | title, then a heading and paragraph per `content_<lang>` section, in document order |
//! | Gallery, Movie, Hollywood | title with optional link icon (and IMDb badge for movies), description, photos |
//!
//! A single photo is centered in a half-width column; two or more are laid
//! out in a two-column grid. Captions, links, portraits and event photos are
//! left out entirely when absent.
//!
//! Free text that may span lines (descriptions, paragraphs, captions) gets
//! `<br>` for each newline. Titles, dates and headings are rendered as is.
//!
//! Any required field missing for the page language aborts rendering with a
//! [`RenderError`] naming the field.

use crate::config::{ClassConfig, Labels};
use crate::naming::humanize_key;
use crate::nav::{NavLists, render_nav};
use crate::template::{SlotValues, Template, TemplateError};
use crate::types::{
    BiographyRecord, CareerRecord, ContentKind, FieldError, Language, LocalizedFields, PageRecord,
    Photo, ShowcaseRecord,
};
use maud::{Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{context}: {source}")]
    Field { context: String, source: FieldError },
    #[error("title {0:?} has no letters or digits to build a slug from")]
    EmptySlug(String),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl RenderError {
    pub fn field(context: &str, source: FieldError) -> Self {
        RenderError::Field {
            context: context.to_string(),
            source,
        }
    }
}

const TITLE_CLASS: &str = "text-5xl font-bold mb-6 text-gray-900 dark:text-gray-100";
const LEAD_CLASS: &str = "text-lg text-gray-700 dark:text-gray-300 mb-12 leading-relaxed";
const EVENT_DATE_CLASS: &str = "text-2xl font-bold mb-3 text-gray-900 dark:text-gray-100";
const EVENT_TEXT_CLASS: &str = "text-gray-700 dark:text-gray-300 mb-4 leading-relaxed";
const SECTION_HEADING_CLASS: &str = "text-3xl font-bold mt-8 mb-4 text-gray-900 dark:text-gray-100";
const SECTION_TEXT_CLASS: &str = "text-gray-700 dark:text-gray-300 leading-relaxed mb-8";
const CAPTION_CLASS: &str = "text-sm text-gray-600 dark:text-gray-400 italic";

/// Wrapper of a lone photo.
pub const SINGLE_LAYOUT_CLASS: &str = "flex justify-center";
/// Column width of a lone photo.
pub const SINGLE_COLUMN_CLASS: &str = "w-full lg:w-1/2";
/// Wrapper of two or more photos.
pub const GRID_LAYOUT_CLASS: &str = "grid grid-cols-1 md:grid-cols-2 gap-8";

const LINK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="w-6 h-6" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M10 6H6a2 2 0 00-2 2v10a2 2 0 002 2h10a2 2 0 002-2v-4M14 4h6m0 0v6m0-6L10 14"/></svg>"#;

/// Everything about a page that is not its record.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub lang: Language,
    /// Output file stem, also the `{page_name}` slot.
    pub slug: &'a str,
    pub labels: &'a Labels,
    pub classes: &'a ClassConfig,
    pub css_path: &'a str,
}

/// Render a complete page: body fragment substituted into the template.
pub fn render_page(
    ctx: &PageContext,
    record: PageRecord,
    template: &Template,
    nav: &NavLists,
) -> Result<String, RenderError> {
    let title = text(record.fields(), "title", ctx.lang, ctx.slug)?;
    let content = render_content(ctx.lang, ctx.labels, record)?;
    let values = page_slots(ctx, record.kind(), title, content, nav);
    Ok(template.render(&values)?)
}

/// Render the body fragment of a record for one language.
pub fn render_content(
    lang: Language,
    labels: &Labels,
    record: PageRecord,
) -> Result<Markup, RenderError> {
    match record {
        PageRecord::Biography(r) => render_biography(lang, labels, r),
        PageRecord::Career(r) => render_career(lang, r),
        PageRecord::Gallery(r) | PageRecord::Hollywood(r) => {
            render_showcase(lang, labels, r, ShowcaseBadges::LinkOnly)
        }
        PageRecord::Movie(r) => render_showcase(lang, labels, r, ShowcaseBadges::LinkAndImdb),
    }
}

/// Values for every slot a page template may use.
fn page_slots(
    ctx: &PageContext,
    kind: ContentKind,
    title: &str,
    content: Markup,
    nav: &NavLists,
) -> SlotValues {
    let gallery_nav = render_nav(&nav.galleries, ctx.classes).into_string();
    let movie_nav = render_nav(&nav.movies, ctx.classes).into_string();

    let mut values = SlotValues::new();
    let mut set = |name: &str, value: String| {
        values.insert(name.to_string(), value);
    };
    set("lang", ctx.lang.code().to_string());
    set("title", html! { (title) }.into_string());
    set("content", content.into_string());
    set("page_name", ctx.slug.to_string());
    set("css_path", ctx.css_path.to_string());
    set("nav_items", gallery_nav.clone());
    set("gallery_nav", gallery_nav);
    set("movie_nav", movie_nav);
    set(
        "life_active",
        ctx.classes.nav(kind == ContentKind::Biography).to_string(),
    );
    set(
        "career_active",
        ctx.classes.nav(kind == ContentKind::Career).to_string(),
    );
    set(
        "hollywood_active",
        ctx.classes.nav(kind == ContentKind::Hollywood).to_string(),
    );
    for lang in Language::ALL {
        set(
            &format!("lang_{}_active", lang.code()),
            ctx.classes.lang(lang == ctx.lang).to_string(),
        );
    }
    for (name, label) in ctx.labels.slots() {
        set(name, html! { (label) }.into_string());
    }
    values
}

// ============================================================================
// Family renderers
// ============================================================================

fn render_biography(
    lang: Language,
    labels: &Labels,
    record: &BiographyRecord,
) -> Result<Markup, RenderError> {
    let title = text(&record.text, "title", lang, "biography")?;
    let description = text(&record.text, "description", lang, "biography")?;

    let mut events = Vec::with_capacity(record.events.len());
    for (idx, event) in record.events.iter().enumerate() {
        let context = format!("biography event {} ({})", idx + 1, event.date);
        let event_text = text(&event.text, "description", lang, &context)?;
        events.push(html! {
            div.timeline-item {
                h2 class=(EVENT_DATE_CLASS) { (event.date) }
                p class=(EVENT_TEXT_CLASS) { (with_breaks(event_text)) }
                @if let Some(photo) = &event.photo {
                    div class="photo-container max-w-md" {
                        img src={ "../" (photo) } alt={ (labels.photo_from) " " (event.date) }
                            class="w-full h-auto";
                    }
                }
            }
        });
    }

    Ok(html! {
        h1 class=(TITLE_CLASS) { (title) }
        p class=(LEAD_CLASS) { (with_breaks(description)) }
        @if let Some(portrait) = &record.portrait {
            div class="portrait photo-container max-w-sm mb-12" {
                img src={ "../" (portrait) } alt=(title) class="w-full h-auto";
            }
        }
        div class="space-y-0" {
            @for event in &events {
                (event)
            }
        }
    })
}

fn render_career(lang: Language, record: &CareerRecord) -> Result<Markup, RenderError> {
    let title = text(&record.text, "title", lang, "career")?;
    let description = optional_text(&record.text, "description", lang, "career")?;
    let sections = record
        .text
        .sections("content", lang)
        .map_err(|e| RenderError::field("career", e))?;

    Ok(html! {
        h1 class=(TITLE_CLASS) { (title) }
        @if let Some(description) = description {
            p class=(LEAD_CLASS) { (with_breaks(description)) }
        }
        div class="prose prose-lg dark:prose-invert max-w-none" {
            @for (key, paragraph) in &sections {
                h2 class=(SECTION_HEADING_CLASS) { (humanize_key(key)) }
                p class=(SECTION_TEXT_CLASS) { (with_breaks(paragraph)) }
            }
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ShowcaseBadges {
    LinkOnly,
    LinkAndImdb,
}

fn render_showcase(
    lang: Language,
    labels: &Labels,
    record: &ShowcaseRecord,
    badges: ShowcaseBadges,
) -> Result<Markup, RenderError> {
    let title = text(&record.text, "title", lang, "page")?;
    let description = text(&record.text, "description", lang, title)?;
    let imdb = match badges {
        ShowcaseBadges::LinkAndImdb => record.imdb.as_deref(),
        ShowcaseBadges::LinkOnly => None,
    };

    let mut photos = Vec::with_capacity(record.photos.len());
    for (idx, photo) in record.photos.iter().enumerate() {
        let context = format!("{title}, photo {}", idx + 1);
        photos.push(render_photo(lang, photo, title, &context)?);
    }

    Ok(html! {
        div class="flex flex-wrap items-center gap-4 mb-6" {
            h1 class=(TITLE_CLASS) { (title) }
            @if let Some(link) = &record.link {
                a.external-link href=(link) target="_blank" rel="noopener"
                    title=(labels.external_link) aria-label=(labels.external_link) {
                    (PreEscaped(LINK_ICON))
                }
            }
            @if let Some(imdb) = imdb {
                a href=(imdb) target="_blank" rel="noopener"
                    class="imdb-badge px-2 py-1 rounded bg-yellow-400 text-black text-sm font-bold" {
                    (labels.imdb)
                }
            }
        }
        p class=(LEAD_CLASS) { (with_breaks(description)) }
        @match photos.as_slice() {
            [] => {}
            [single] => {
                div class=(SINGLE_LAYOUT_CLASS) data-layout="single" {
                    div class=(SINGLE_COLUMN_CLASS) { (single) }
                }
            }
            many => {
                div class=(GRID_LAYOUT_CLASS) data-layout="grid" {
                    @for photo in many {
                        (photo)
                    }
                }
            }
        }
    })
}

fn render_photo(
    lang: Language,
    photo: &Photo,
    alt: &str,
    context: &str,
) -> Result<Markup, RenderError> {
    let caption = optional_text(&photo.text, "description", lang, context)?;
    Ok(html! {
        div class="space-y-4" {
            div.photo-container {
                img src={ "../" (photo.photo) } alt=(alt) class="w-full h-auto";
            }
            @if let Some(caption) = caption {
                p class=(CAPTION_CLASS) { (with_breaks(caption)) }
            }
        }
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Escaped text with a `<br>` in place of every newline.
pub fn with_breaks(text: &str) -> Markup {
    html! {
        @for (idx, line) in text.split('\n').enumerate() {
            @if idx > 0 {
                br;
            }
            (line.strip_suffix('\r').unwrap_or(line))
        }
    }
}

fn text<'a>(
    fields: &'a LocalizedFields,
    base: &str,
    lang: Language,
    context: &str,
) -> Result<&'a str, RenderError> {
    fields
        .text(base, lang)
        .map_err(|e| RenderError::field(context, e))
}

fn optional_text<'a>(
    fields: &'a LocalizedFields,
    base: &str,
    lang: Language,
    context: &str,
) -> Result<Option<&'a str>, RenderError> {
    fields
        .optional_text(base, lang)
        .map_err(|e| RenderError::field(context, e))
}
