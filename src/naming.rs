//! Derived names: URL slugs and section headings.
//!
//! Pages are addressed by a slug computed from the English title of their
//! record, never stored in the content files. Career sections are keyed by
//! snake_case identifiers that double as their heading text.
//!
//! ## Slugs
//!
//! Titles are folded to ASCII through Unicode compatibility decomposition,
//! so accented letters keep their base letter and lose the mark:
//!
//! - `"Berlin 1950s"` → `"berlin-1950s"`
//! - `"Café Zürich"` → `"cafe-zurich"`
//! - `"Rock'n'Roll -- Live"` → `"rocknroll-live"`
//!
//! Punctuation is dropped in place, whitespace, underscores and hyphens
//! separate words, and separator runs collapse into one hyphen. The result
//! only contains `[a-z0-9-]`, never starts or ends with a hyphen, and
//! slugifying a slug returns it unchanged.

use unicode_normalization::UnicodeNormalization;

/// Convert a display title into a URL-safe identifier.
///
/// Returns an empty string when the title has no ASCII letters or digits
/// left after folding. Callers that need an address must reject that case.
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_separator = false;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_ascii_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }
    slug
}

/// Turn a section key into heading text.
///
/// Underscores become spaces and every word starts with a capital letter,
/// the rest lowercased. A "word" is a run of letters, so a letter directly
/// after a digit also starts a new word:
///
/// - `"early_life"` → `"Early Life"`
/// - `"AWARDS_and_honors"` → `"Awards And Honors"`
/// - `"the_1950s"` → `"The 1950S"`
pub fn humanize_key(key: &str) -> String {
    let mut heading = String::with_capacity(key.len());
    let mut in_word = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if in_word {
                heading.extend(ch.to_lowercase());
            } else {
                heading.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            heading.push(ch);
            in_word = false;
        }
    }
    heading
}
