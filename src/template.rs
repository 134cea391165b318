//! The shared page template.
//!
//! Pages are produced by substituting named slots into one HTML file:
//!
//! ```html
//! <html lang="{lang}">
//!   <title>{title} | {site_name_label}</title>
//!   <style>body {{ margin: 0 }}</style>
//!   <main>{content}</main>
//! </html>
//! ```
//!
//! `{name}` is a slot (ASCII letters, digits and `_`). Literal braces are
//! written doubled, `{{` and `}}`, so inline CSS and scripts stay usable.
//! Anything else between braces is a syntax error reported with its byte
//! offset.
//!
//! The template is parsed once per build. Rendering fails if the template
//! references a slot without a value; values the template never uses are
//! ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Slots every page template has to contain.
pub const REQUIRED_SLOTS: &[&str] = &["lang", "title", "content"];

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("cannot read template {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unclosed slot starting at byte {0}")]
    Unclosed(usize),
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),
    #[error("invalid slot name {name:?} at byte {offset}")]
    InvalidSlot { name: String, offset: usize },
    #[error("template has no {{{0}}} slot")]
    MissingRequiredSlot(&'static str),
    #[error("no value for template slot {{{0}}}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// Values for the slots of one page.
pub type SlotValues = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text and check the required slots are present.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(offset));
                    }
                    if !is_slot_name(&name) {
                        return Err(TemplateError::InvalidSlot { name, offset });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(name));
                }
                '}' => return Err(TemplateError::UnmatchedBrace(offset)),
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let template = Self { segments };
        for required in REQUIRED_SLOTS {
            if !template.has_slot(required) {
                return Err(TemplateError::MissingRequiredSlot(*required));
            }
        }
        Ok(template)
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Slot names in order of appearance, repeats included.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots().any(|slot| slot == name)
    }

    /// Substitute `values` into the template.
    pub fn render(&self, values: &SlotValues) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let value = values
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingValue(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_slot_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
