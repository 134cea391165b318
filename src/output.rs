//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every page leads
//! with its positional index and title in its own language; the output file
//! follows as secondary context. The listing reads as a content inventory
//! per language while still showing where each page landed.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Landing → index.html
//!
//! English
//! 001 Life → en/life.html
//! 002 Career → en/career.html
//! 003 Berlin 1950s → en/berlin-1950s.html
//!
//! Deutsch
//! 001 Leben → de/life.html
//! 002 Karriere → de/career.html
//! 003 Berlin 1950er → de/berlin-1950s.html
//!
//! Subsite → subsite/index.html
//!
//! Assets
//!     assets/ (3 files)
//!     img/ (41 files)
//!
//! Generated 6 pages in 2 languages, 1 subsite
//! ```
//!
//! ## Check
//!
//! Same page listing without the output paths of the standalone pages, and
//! a closing summary instead of the asset list.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{AssetCopy, RenderedPage, RenderedSite};
use crate::types::Language;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn language_heading(lang: Language) -> &'static str {
    match lang {
        Language::En => "English",
        Language::De => "Deutsch",
    }
}

/// Page line: index, title in the page language, output path.
///
/// Multi-line titles are folded onto one line.
fn page_line(index: usize, page: &RenderedPage) -> String {
    let title = page.title.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} {} → {}", format_index(index), title, page.rel_path())
}

/// One block per language, blank line between blocks.
fn format_pages(rendered: &RenderedSite) -> Vec<String> {
    let mut lines = Vec::new();
    for lang in Language::ALL {
        let pages: Vec<&RenderedPage> = rendered.pages.iter().filter(|p| p.lang == lang).collect();
        if pages.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(language_heading(lang).to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(page_line(i + 1, page));
        }
    }
    lines
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Pages per language; every language renders the same set.
fn pages_per_language(rendered: &RenderedSite) -> usize {
    rendered
        .pages
        .iter()
        .filter(|p| p.lang == Language::En)
        .count()
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of a full build.
pub fn format_build_output(
    rendered: &RenderedSite,
    copies: &[AssetCopy],
    subsite_dir: &str,
) -> Vec<String> {
    let mut lines = vec!["Landing → index.html".to_string(), String::new()];
    lines.extend(format_pages(rendered));

    if rendered.subsite.is_some() {
        lines.push(String::new());
        lines.push(format!("Subsite → {subsite_dir}/index.html"));
    }

    if !copies.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for copy in copies {
            lines.push(format!(
                "{}{}/ ({})",
                indent(1),
                copy.dir,
                plural(copy.files, "file", "files")
            ));
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated {} in {}",
        plural(pages_per_language(rendered), "page", "pages"),
        plural(Language::ALL.len(), "language", "languages"),
    );
    if rendered.subsite.is_some() {
        summary.push_str(", 1 subsite");
    }
    lines.push(summary);
    lines
}

pub fn print_build_output(rendered: &RenderedSite, copies: &[AssetCopy], subsite_dir: &str) {
    for line in format_build_output(rendered, copies, subsite_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the result of a check: everything rendered, nothing written.
pub fn format_check_output(rendered: &RenderedSite) -> Vec<String> {
    let mut lines = format_pages(rendered);
    if rendered.subsite.is_some() {
        lines.push(String::new());
        lines.push("Subsite".to_string());
    }
    lines.push(String::new());
    lines.push(format!(
        "Checked {} in {}: OK",
        plural(pages_per_language(rendered), "page", "pages"),
        plural(Language::ALL.len(), "language", "languages"),
    ));
    lines
}

pub fn print_check_output(rendered: &RenderedSite) {
    for line in format_check_output(rendered) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentKind;

    fn page(lang: Language, kind: ContentKind, slug: &str, title: &str) -> RenderedPage {
        RenderedPage {
            lang,
            kind,
            slug: slug.to_string(),
            title: title.to_string(),
            html: String::new(),
        }
    }

    fn site(subsite: bool) -> RenderedSite {
        RenderedSite {
            pages: vec![
                page(Language::En, ContentKind::Biography, "life", "Life"),
                page(Language::En, ContentKind::Gallery, "berlin-1950s", "Berlin 1950s"),
                page(Language::De, ContentKind::Biography, "life", "Leben"),
                page(Language::De, ContentKind::Gallery, "berlin-1950s", "Berlin 1950er"),
            ],
            landing: String::new(),
            subsite: subsite.then(String::new),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn page_line_shows_title_and_path() {
        let line = page_line(3, &page(Language::De, ContentKind::Movie, "movie-der-film", "Der Film"));
        assert_eq!(line, "003 Der Film → de/movie-der-film.html");
    }

    #[test]
    fn page_line_folds_multiline_title() {
        let line = page_line(1, &page(Language::En, ContentKind::Gallery, "x", "Two\nLines"));
        assert_eq!(line, "001 Two Lines → en/x.html");
    }

    #[test]
    fn pages_grouped_by_language_with_own_numbering() {
        let lines = format_pages(&site(false));
        assert_eq!(
            lines,
            vec![
                "English",
                "001 Life → en/life.html",
                "002 Berlin 1950s → en/berlin-1950s.html",
                "",
                "Deutsch",
                "001 Leben → de/life.html",
                "002 Berlin 1950er → de/berlin-1950s.html",
            ]
        );
    }

    #[test]
    fn build_output_lists_everything() {
        let copies = vec![
            AssetCopy {
                dir: "assets".to_string(),
                files: 1,
            },
            AssetCopy {
                dir: "img".to_string(),
                files: 12,
            },
        ];
        let lines = format_build_output(&site(true), &copies, "subsite");
        assert_eq!(lines[0], "Landing → index.html");
        assert!(lines.contains(&"Subsite → subsite/index.html".to_string()));
        assert!(lines.contains(&"    assets/ (1 file)".to_string()));
        assert!(lines.contains(&"    img/ (12 files)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages in 2 languages, 1 subsite"
        );
    }

    #[test]
    fn build_output_without_subsite_or_assets() {
        let lines = format_build_output(&site(false), &[], "subsite");
        assert!(!lines.iter().any(|l| l.starts_with("Subsite")));
        assert!(!lines.iter().any(|l| l == "Assets"));
        assert_eq!(lines.last().unwrap(), "Generated 2 pages in 2 languages");
    }

    #[test]
    fn check_output_summary() {
        let lines = format_check_output(&site(true));
        assert_eq!(lines[0], "English");
        assert!(lines.contains(&"Subsite".to_string()));
        assert_eq!(lines.last().unwrap(), "Checked 2 pages in 2 languages: OK");
    }
}
