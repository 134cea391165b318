//! # Berneis Site
//!
//! Static site generator for a bilingual (English/German) photographer
//! portfolio. Content lives in a handful of JSON files; every page is
//! produced in both languages from one shared HTML template.
//!
//! # Pipeline
//!
//! ```text
//! site.toml ─┐
//! data/*.json ─┼─→ load ─→ plan slugs ─→ render (lang × page) ─→ public/
//! template.html ─┘
//! ```
//!
//! Loading only parses. Localized fields are resolved per page and
//! language while rendering, so a missing German title is reported against
//! the page that needs it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, stock defaults, sparse overrides, validation |
//! | [`load`] | Reads the content JSON files into typed records |
//! | [`types`] | Languages, localized field lookup and the content record shapes |
//! | [`naming`] | Title → URL slug, `snake_case` key → heading |
//! | [`nav`] | Gallery and movie menus with active-page marking |
//! | [`template`] | The `{slot}` page template: parse once, substitute per page |
//! | [`render`] | Body fragments per content family, page slot values |
//! | [`generate`] | Page planning, slug collision checks, landing page, subsite, output tree |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud for Fragments, a Template for the Frame
//!
//! Body fragments are generated with [Maud](https://maud.lambda.xyz/), so
//! all record text is escaped and malformed markup is a compile error. The
//! page frame (header, menus, footer) is a plain HTML file owned by the
//! site, with named slots filled in at build time. Designers can change the
//! frame without touching Rust.
//!
//! ## One Directory per Language
//!
//! `en/` and `de/` hold the same file names. The language switch in the
//! template only swaps the directory, and the slug of a page is always
//! derived from its English title so both versions line up.
//!
//! ## Fail Early, Write Late
//!
//! Everything is rendered in memory before the first file is written. A
//! missing translation or a slug collision aborts the build without leaving
//! a half-updated output directory.

pub mod config;
pub mod generate;
pub mod load;
pub mod naming;
pub mod nav;
pub mod output;
pub mod render;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
