//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! compiled in; a `site.toml` in the source directory overrides any subset of
//! them.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml            # Optional, overrides stock defaults
//! ├── template.html        # Shared page template
//! ├── data/                # Content JSON, one file per family
//! │   ├── life.json
//! │   ├── career.json
//! │   ├── galleries.json
//! │   ├── movies.json
//! │   ├── hollywood.json
//! │   └── subsite.json
//! ├── assets/              # Copied verbatim to the output root
//! └── img/
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [navigation]
//! galleries = "insertion"
//!
//! [labels.de]
//! photographer = "Fotograf"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::nav::SortMode;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Landing page identity.
    pub site: SiteInfo,
    /// Content file names inside the data directory.
    pub files: FilesConfig,
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Ordering and slug prefixes of navigation lists.
    pub navigation: NavigationConfig,
    /// CSS classes marking the active page and language.
    pub classes: ClassConfig,
    /// Localized label strings, one record per language.
    pub labels: LabelsConfig,
}

impl SiteConfig {
    /// Validate config values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.data_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.data_dir must not be empty".into(),
            ));
        }
        if self.paths.template.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.template must not be empty".into(),
            ));
        }
        // Both end up as directories directly below the output root
        plain_dir_name("paths.subsite_dir", &self.paths.subsite_dir)?;
        for dir in &self.paths.assets {
            plain_dir_name("paths.assets", dir)?;
        }
        let prefix_ok = self
            .navigation
            .movie_prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !prefix_ok {
            return Err(ConfigError::Validation(format!(
                "navigation.movie_prefix may only contain a-z, 0-9 and '-', got {:?}",
                self.navigation.movie_prefix
            )));
        }
        Ok(())
    }
}

/// Reject anything but a single normal path component: no separators,
/// no `.` or `..`, not absolute.
fn plain_dir_name(field: &str, value: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains(['/', '\\']) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a single directory name inside the output, got {value:?}"
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    /// Shown on the landing page while the redirect script runs.
    pub redirecting: String,
    /// Shown above the language links for visitors who stay on the landing page.
    pub choose_language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Ina Berneis".to_string(),
            tagline: "Photographer (1927-2003)".to_string(),
            redirecting: "Redirecting...".to_string(),
            choose_language: "If you are not redirected, please choose your language:"
                .to_string(),
        }
    }
}

/// Content family file names, relative to `paths.data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    pub biography: String,
    pub career: String,
    pub galleries: String,
    pub movies: String,
    pub hollywood: String,
    pub subsite: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            biography: "life.json".to_string(),
            career: "career.json".to_string(),
            galleries: "galleries.json".to_string(),
            movies: "movies.json".to_string(),
            hollywood: "hollywood.json".to_string(),
            subsite: "subsite.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the content JSON files, relative to the source.
    pub data_dir: String,
    /// Shared page template, relative to the source.
    pub template: String,
    /// Stylesheet location as seen from a language directory.
    pub css_path: String,
    /// Directories copied unchanged into the output root.
    pub assets: Vec<String>,
    /// Output directory of the standalone subsite.
    pub subsite_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            template: "template.html".to_string(),
            css_path: "../assets/css/".to_string(),
            assets: vec!["assets".to_string(), "img".to_string()],
            subsite_dir: "subsite".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Ordering of the gallery menu.
    pub galleries: SortMode,
    /// Ordering of the movie menu.
    pub movies: SortMode,
    /// Prepended to movie slugs so they never clash with gallery slugs.
    pub movie_prefix: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            galleries: SortMode::Sorted,
            movies: SortMode::Sorted,
            movie_prefix: "movie-".to_string(),
        }
    }
}

/// Class strings substituted into the template's `*_active` slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassConfig {
    /// Current menu entry (page links and section links).
    pub nav_active: String,
    /// Language switch button of the current language.
    pub lang_active: String,
    /// Language switch button of the other language.
    pub lang_inactive: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            nav_active: "font-semibold bg-gray-200 dark:bg-gray-800".to_string(),
            lang_active: "bg-gray-900 dark:bg-gray-100 text-white dark:text-gray-900".to_string(),
            lang_inactive:
                "text-gray-600 dark:text-gray-400 hover:bg-gray-200 dark:hover:bg-gray-800"
                    .to_string(),
        }
    }
}

impl ClassConfig {
    /// Class for a navigation link, empty unless it points at the current page.
    pub fn nav(&self, is_current: bool) -> &str {
        if is_current { self.nav_active.as_str() } else { "" }
    }

    /// Class for a language switch button.
    pub fn lang(&self, is_current: bool) -> &str {
        if is_current {
            self.lang_active.as_str()
        } else {
            self.lang_inactive.as_str()
        }
    }
}

/// Localized strings used by the template and the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Labels {
    pub site_name: String,
    pub life: String,
    pub career: String,
    pub photography: String,
    pub movies: String,
    pub hollywood: String,
    pub photographer: String,
    pub imdb: String,
    pub external_link: String,
    /// Prefix of biography event photo alt text, e.g. "Photo from 1950".
    pub photo_from: String,
}

impl Labels {
    pub fn english() -> Self {
        Self {
            site_name: "Ina Berneis".to_string(),
            life: "Life".to_string(),
            career: "Career".to_string(),
            photography: "Photography".to_string(),
            movies: "Movies".to_string(),
            hollywood: "Hollywood".to_string(),
            photographer: "Photographer".to_string(),
            imdb: "IMDb".to_string(),
            external_link: "More information".to_string(),
            photo_from: "Photo from".to_string(),
        }
    }

    pub fn german() -> Self {
        Self {
            site_name: "Ina Berneis".to_string(),
            life: "Leben".to_string(),
            career: "Karriere".to_string(),
            photography: "Fotografie".to_string(),
            movies: "Filme".to_string(),
            hollywood: "Hollywood".to_string(),
            photographer: "Fotografin".to_string(),
            imdb: "IMDb".to_string(),
            external_link: "Weitere Informationen".to_string(),
            photo_from: "Foto von".to_string(),
        }
    }

    /// `(slot name, value)` pairs for the template, e.g. `("life_label", "Life")`.
    pub fn slots(&self) -> [(&'static str, &str); 10] {
        [
            ("site_name_label", self.site_name.as_str()),
            ("life_label", self.life.as_str()),
            ("career_label", self.career.as_str()),
            ("photography_label", self.photography.as_str()),
            ("movies_label", self.movies.as_str()),
            ("hollywood_label", self.hollywood.as_str()),
            ("photographer_label", self.photographer.as_str()),
            ("imdb_label", self.imdb.as_str()),
            ("external_link_label", self.external_link.as_str()),
            ("photo_from_label", self.photo_from.as_str()),
        ]
    }
}

/// Label records keyed by language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub en: Labels,
    pub de: Labels,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            en: Labels::english(),
            de: Labels::german(),
        }
    }
}

impl LabelsConfig {
    pub fn for_language(&self, lang: Language) -> &Labels {
        match lang {
            Language::En => &self.en,
            Language::De => &self.de,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto, so a sparse
/// `[labels.de]` table only replaces the labels it names.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given source directory.
pub fn load_config(source: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(source)?)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Landing page
# ---------------------------------------------------------------------------
[site]
name = "Ina Berneis"
tagline = "Photographer (1927-2003)"
redirecting = "Redirecting..."
choose_language = "If you are not redirected, please choose your language:"

# ---------------------------------------------------------------------------
# Content files, relative to paths.data_dir. Missing files produce no pages,
# except the biography, which the landing page redirects to.
# ---------------------------------------------------------------------------
[files]
biography = "life.json"
career = "career.json"
galleries = "galleries.json"
movies = "movies.json"
hollywood = "hollywood.json"
subsite = "subsite.json"

# ---------------------------------------------------------------------------
# Locations, relative to the source directory
# ---------------------------------------------------------------------------
[paths]
data_dir = "data"
template = "template.html"
# Stylesheet directory as referenced from en/ and de/ pages.
css_path = "../assets/css/"
# Directories copied unchanged into the output root.
assets = ["assets", "img"]
# Output directory of the standalone subsite page. Asset directories and
# the subsite directory must be plain names directly below the output root.
subsite_dir = "subsite"

# ---------------------------------------------------------------------------
# Navigation menus: "sorted" (by title, case-insensitive) or "insertion"
# (order of the JSON list).
# ---------------------------------------------------------------------------
[navigation]
galleries = "sorted"
movies = "sorted"
# Prepended to movie slugs: "Der Film" -> movie-der-film.html
movie_prefix = "movie-"

# ---------------------------------------------------------------------------
# CSS classes for active states
# ---------------------------------------------------------------------------
[classes]
nav_active = "font-semibold bg-gray-200 dark:bg-gray-800"
lang_active = "bg-gray-900 dark:bg-gray-100 text-white dark:text-gray-900"
lang_inactive = "text-gray-600 dark:text-gray-400 hover:bg-gray-200 dark:hover:bg-gray-800"

# ---------------------------------------------------------------------------
# Labels, available in the template as {<name>_label}
# ---------------------------------------------------------------------------
[labels.en]
site_name = "Ina Berneis"
life = "Life"
career = "Career"
photography = "Photography"
movies = "Movies"
hollywood = "Hollywood"
photographer = "Photographer"
imdb = "IMDb"
external_link = "More information"
photo_from = "Photo from"

[labels.de]
site_name = "Ina Berneis"
life = "Leben"
career = "Karriere"
photography = "Fotografie"
movies = "Filme"
hollywood = "Hollywood"
photographer = "Fotografin"
imdb = "IMDb"
external_link = "Weitere Informationen"
photo_from = "Foto von"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.paths.data_dir, "data");
        assert_eq!(config.paths.template, "template.html");
        assert_eq!(config.paths.css_path, "../assets/css/");
        assert_eq!(config.files.biography, "life.json");
    }

    #[test]
    fn default_navigation_is_sorted() {
        let config = SiteConfig::default();
        assert_eq!(config.navigation.galleries, SortMode::Sorted);
        assert_eq!(config.navigation.movies, SortMode::Sorted);
        assert_eq!(config.navigation.movie_prefix, "movie-");
    }

    #[test]
    fn labels_per_language() {
        let labels = LabelsConfig::default();
        assert_eq!(labels.for_language(Language::En).life, "Life");
        assert_eq!(labels.for_language(Language::De).life, "Leben");
        assert_eq!(labels.for_language(Language::De).photographer, "Fotografin");
    }

    #[test]
    fn label_slot_names() {
        let labels = Labels::english();
        let slots = labels.slots();
        assert!(slots.contains(&("life_label", "Life")));
        assert!(slots.contains(&("photography_label", "Photography")));
        assert!(slots.contains(&("photo_from_label", "Photo from")));
        assert!(slots.iter().all(|(name, _)| name.ends_with("_label")));
    }

    #[test]
    fn class_selection() {
        let classes = ClassConfig::default();
        assert_eq!(classes.nav(false), "");
        assert_eq!(classes.nav(true), classes.nav_active);
        assert_eq!(classes.lang(true), classes.lang_active);
        assert_eq!(classes.lang(false), classes.lang_inactive);
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.labels.en, defaults.labels.en);
        assert_eq!(parsed.labels.de, defaults.labels.de);
        assert_eq!(parsed.paths.assets, defaults.paths.assets);
        assert_eq!(parsed.classes.nav_active, defaults.classes.nav_active);
        assert_eq!(parsed.navigation.movie_prefix, defaults.navigation.movie_prefix);
        assert_eq!(parsed.site.choose_language, defaults.site.choose_language);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.paths.data_dir, "data");
        assert_eq!(config.labels.en.life, "Life");
    }

    #[test]
    fn load_config_merges_sparse_labels() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[labels.de]
photographer = "Fotograf"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.labels.de.photographer, "Fotograf");
        // Untouched labels keep their stock values
        assert_eq!(config.labels.de.life, "Leben");
        assert_eq!(config.labels.en.photographer, "Photographer");
    }

    #[test]
    fn load_config_reads_sort_modes() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[navigation]
galleries = "insertion"
"#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.navigation.galleries, SortMode::Insertion);
        assert_eq!(config.navigation.movies, SortMode::Sorted);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[paths]
templat = "typo.html"
"#,
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_sort_mode_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[navigation]
movies = "random"
"#,
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn invalid_movie_prefix_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
[navigation]
movie_prefix = "Movie/"
"#,
        )
        .unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_movie_prefix_allowed() {
        let overlay: toml::Value = toml::from_str(
            r#"
[navigation]
movie_prefix = ""
"#,
        )
        .unwrap();
        assert_eq!(resolve_config(Some(overlay)).unwrap().navigation.movie_prefix, "");
    }

    #[test]
    fn empty_data_dir_rejected() {
        let mut config = SiteConfig::default();
        config.paths.data_dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn nested_subsite_dir_rejected() {
        let mut config = SiteConfig::default();
        config.paths.subsite_dir = "extra/subsite".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paths.subsite_dir"), "{err}");
    }

    #[test]
    fn subsite_dir_outside_output_rejected() {
        for value in ["../escaped", "..", ".", "/tmp/subsite"] {
            let mut config = SiteConfig::default();
            config.paths.subsite_dir = value.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{value:?} accepted"
            );
        }
    }

    #[test]
    fn asset_dir_outside_output_rejected() {
        for value in ["../shared", "assets/css", "/var/www", ""] {
            let mut config = SiteConfig::default();
            config.paths.assets = vec!["img".to_string(), value.to_string()];
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("paths.assets"), "{value:?}: {err}");
        }
    }

    #[test]
    fn plain_dir_names_accepted() {
        let mut config = SiteConfig::default();
        config.paths.subsite_dir = "abschied".to_string();
        config.paths.assets = vec!["static".to_string(), "photos-2024".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn subsite_dir_from_toml_validated() {
        let overlay: toml::Value = toml::from_str(
            r#"
[paths]
subsite_dir = "../escaped"
"#,
        )
        .unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"assets = ["assets", "img"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"assets = ["static"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        let assets = merged.get("assets").unwrap().as_array().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].as_str(), Some("static"));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[labels.en]
life = "Life"
career = "Career"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[labels.en]
life = "Biography"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let en = merged.get("labels").unwrap().get("en").unwrap();
        assert_eq!(en.get("life").unwrap().as_str(), Some("Biography"));
        assert_eq!(en.get("career").unwrap().as_str(), Some("Career"));
    }
}
