//! Content records shared by loading, navigation and rendering.
//!
//! Every user-facing text field exists once per language, stored under the
//! field's base name with a two-letter suffix:
//!
//! ```json
//! { "title_en": "Berlin 1950s", "title_de": "Berlin 1950er" }
//! ```
//!
//! Records keep these suffixed fields in a [`LocalizedFields`] bag and only
//! resolve them when a page is rendered for a specific [`Language`]. A field
//! missing for the requested language is a [`FieldError`] at that point.
//! Structural fields (photo paths, dates, links) are typed struct members.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The languages every page is generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
}

impl Language {
    /// Generation order: one output directory per entry.
    pub const ALL: [Language; 2] = [Language::En, Language::De];

    /// Two-letter code, used as field suffix, `lang` attribute and directory name.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Key of the `base` field for this language, e.g. `title_de`.
    pub fn field(self, base: &str) -> String {
        format!("{}_{}", base, self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("missing field `{0}`")]
    Missing(String),
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// Language-suffixed fields of a record, in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LocalizedFields(Map<String, Value>);

impl LocalizedFields {
    /// Text of a required field.
    pub fn text(&self, base: &str, lang: Language) -> Result<&str, FieldError> {
        let key = lang.field(base);
        match self.0.get(&key) {
            Some(value) => as_text(&key, value),
            None => Err(FieldError::Missing(key)),
        }
    }

    /// Text of an optional field. A present field of the wrong type is still an error.
    pub fn optional_text(&self, base: &str, lang: Language) -> Result<Option<&str>, FieldError> {
        let key = lang.field(base);
        match self.0.get(&key) {
            Some(Value::Null) | None => Ok(None),
            Some(value) => as_text(&key, value).map(Some),
        }
    }

    /// Ordered `key → paragraph` sections of a required object field.
    pub fn sections(&self, base: &str, lang: Language) -> Result<Vec<(&str, &str)>, FieldError> {
        let key = lang.field(base);
        let object = match self.0.get(&key) {
            Some(Value::Object(object)) => object,
            Some(_) => {
                return Err(FieldError::WrongType {
                    field: key,
                    expected: "an object of text sections",
                });
            }
            None => return Err(FieldError::Missing(key)),
        };
        let mut sections = Vec::with_capacity(object.len());
        for (name, value) in object {
            let text = as_text(&format!("{key}.{name}"), value)?;
            sections.push((name.as_str(), text));
        }
        Ok(sections)
    }
}

fn as_text<'a>(key: &str, value: &'a Value) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| FieldError::WrongType {
        field: key.to_string(),
        expected: "a string",
    })
}

/// A photo inside a gallery-shaped record, with an optional per-language caption
/// (`description_<lang>`).
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    /// Path relative to the site root, e.g. `img/berlin/01.jpg`.
    pub photo: String,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// One dated entry of the biography timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub date: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// The biography ("life") page: header, portrait and a timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct BiographyRecord {
    #[serde(default)]
    pub portrait: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// The career page: a title plus `content_<lang>` section objects.
#[derive(Debug, Clone, Deserialize)]
pub struct CareerRecord {
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// Shape shared by galleries, movies, the hollywood page and the subsite:
/// title, description and photos, optionally linking out.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowcaseRecord {
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// External page about the work.
    #[serde(default)]
    pub link: Option<String>,
    /// IMDB entry, shown as a badge on movie pages.
    #[serde(default)]
    pub imdb: Option<String>,
    #[serde(flatten)]
    pub text: LocalizedFields,
}

/// The page families rendered through the shared template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Biography,
    Career,
    Gallery,
    Movie,
    Hollywood,
}

impl ContentKind {
    pub fn name(self) -> &'static str {
        match self {
            ContentKind::Biography => "biography",
            ContentKind::Career => "career",
            ContentKind::Gallery => "gallery",
            ContentKind::Movie => "movie",
            ContentKind::Hollywood => "hollywood",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record paired with the family it is rendered as.
#[derive(Debug, Clone, Copy)]
pub enum PageRecord<'a> {
    Biography(&'a BiographyRecord),
    Career(&'a CareerRecord),
    Gallery(&'a ShowcaseRecord),
    Movie(&'a ShowcaseRecord),
    Hollywood(&'a ShowcaseRecord),
}

impl<'a> PageRecord<'a> {
    pub fn kind(&self) -> ContentKind {
        match self {
            PageRecord::Biography(_) => ContentKind::Biography,
            PageRecord::Career(_) => ContentKind::Career,
            PageRecord::Gallery(_) => ContentKind::Gallery,
            PageRecord::Movie(_) => ContentKind::Movie,
            PageRecord::Hollywood(_) => ContentKind::Hollywood,
        }
    }

    pub fn fields(&self) -> &'a LocalizedFields {
        match self {
            PageRecord::Biography(r) => &r.text,
            PageRecord::Career(r) => &r.text,
            PageRecord::Gallery(r) | PageRecord::Movie(r) | PageRecord::Hollywood(r) => &r.text,
        }
    }
}
