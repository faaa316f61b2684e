use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::error::Error;

pub const CONFIG_EXTENSION: &str = "json";

pub const DEFAULT_SIZE: u32 = 44;
pub const DEFAULT_STYLE: Style = Style::Regular;

const OPTION_RENDERER: &str = "renderer";
const OPTION_SOURCE_PATH: &str = "source_path";
/// Older configs name the checkout option after the Phosphor core repo.
const OPTION_SOURCE_PATH_LEGACY: &str = "phosphor_core_path";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Style {
    Bold,
    Duotone,
    Fill,
    Light,
    Regular,
    Thin,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Bold,
        Style::Duotone,
        Style::Fill,
        Style::Light,
        Style::Regular,
        Style::Thin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::Duotone => "duotone",
            Style::Fill => "fill",
            Style::Light => "light",
            Style::Regular => "regular",
            Style::Thin => "thin",
        }
    }

    /// Returns the style named by `word`, or `None` if it is not a style keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.as_str() == word)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Renderer {
    #[default]
    Rsvg,
    Inkscape,
}

impl Renderer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Renderer::Rsvg => "rsvg",
            Renderer::Inkscape => "inkscape",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "rsvg" => Some(Renderer::Rsvg),
            "inkscape" => Some(Renderer::Inkscape),
            _ => None,
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub renderer: Renderer,

    /// Local checkout of the Phosphor core repository, consulted before the cache.
    pub source_path: Option<PathBuf>,
}

/// One required output: an icon at a point size in a style.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variant {
    pub name: String,
    pub size: u32,
    pub style: Style,
}

impl Variant {
    pub fn new(name: impl Into<String>, size: u32, style: Style) -> Self {
        Self {
            name: name.into(),
            size,
            style,
        }
    }

    /// `{name}.{size}.{style}`, shared by the imageset directory and its PNGs.
    pub fn base_name(&self) -> String {
        format!("{}.{}.{}", self.name, self.size, self.style)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.name, self.size, self.style)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("top-level JSON element must be an array")]
    NotAnArray,

    #[error("unknown option name '{0}'")]
    UnknownOption(String),

    #[error("unknown renderer {0} (expected \"rsvg\" or \"inkscape\")")]
    UnknownRenderer(String),

    #[error("option '{key}' must be a string, got {value}")]
    InvalidOptionValue { key: String, value: String },

    #[error("unexpected value {0}")]
    UnexpectedToken(String),

    #[error("invalid size {0} (sizes must be positive integers)")]
    InvalidSize(String),
}

#[derive(Debug)]
pub struct Config {
    pub options: Options,
    pub variants: BTreeSet<Variant>,
    pub warnings: Vec<String>,
}

impl Config {
    /// Reads and interprets a `.json` config file.
    ///
    /// A relative `source_path` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, Error> {
        check_extension(path)?;

        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = interpret(&raw).map_err(|error| match error {
            ConfigError::NotAnArray => Error::ConfigFormat {
                path: path.to_path_buf(),
                reason: error.to_string(),
            },
            error => Error::ConfigSemantic {
                path: path.to_path_buf(),
                error,
            },
        })?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        if let Some(source_path) = config.options.source_path.as_mut() {
            if source_path.is_relative() {
                *source_path = config_dir.join(&*source_path);
            }
        }

        Ok(config)
    }
}

/// Config files must end in `.json`; the catalog is named after the file.
pub fn check_extension(path: &Path) -> Result<(), Error> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(CONFIG_EXTENSION) {
        return Err(Error::Usage(format!(
            "config file does not have suffix '.{}': {}",
            CONFIG_EXTENSION,
            path.display()
        )));
    }
    Ok(())
}

/// Interprets a parsed config document into options and the full variant set.
///
/// Objects anywhere in the top-level array contribute options (last write wins);
/// arrays are groups. Within a group, integers are sizes, style keywords are
/// styles and every other string is an icon name. Each group expands to the
/// cross product of its names, sizes and styles, and all groups are unioned.
pub fn interpret(raw: &Value) -> Result<Config, ConfigError> {
    let entries = raw.as_array().ok_or(ConfigError::NotAnArray)?;

    let mut raw_options: BTreeMap<&'static str, &Value> = BTreeMap::new();
    let mut variants = BTreeSet::new();
    let mut warnings = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match entry {
            Value::Object(record) => {
                for (key, value) in record {
                    let key = option_key(key)
                        .ok_or_else(|| ConfigError::UnknownOption(key.clone()))?;
                    raw_options.insert(key, value);
                }
            }
            Value::Array(tokens) => expand_group(tokens, &mut variants)?,
            other => warnings.push(format!(
                "Ignoring top-level entry #{} ({}): expected an options object or a group array",
                index + 1,
                other
            )),
        }
    }

    let options = build_options(&raw_options)?;

    Ok(Config {
        options,
        variants,
        warnings,
    })
}

fn option_key(key: &str) -> Option<&'static str> {
    match key {
        OPTION_RENDERER => Some(OPTION_RENDERER),
        OPTION_SOURCE_PATH | OPTION_SOURCE_PATH_LEGACY => Some(OPTION_SOURCE_PATH),
        _ => None,
    }
}

fn build_options(raw: &BTreeMap<&'static str, &Value>) -> Result<Options, ConfigError> {
    let mut options = Options::default();

    if let Some(value) = raw.get(OPTION_RENDERER) {
        options.renderer = value
            .as_str()
            .and_then(Renderer::from_name)
            .ok_or_else(|| ConfigError::UnknownRenderer(value.to_string()))?;
    }

    if let Some(value) = raw.get(OPTION_SOURCE_PATH) {
        let path = value
            .as_str()
            .ok_or_else(|| ConfigError::InvalidOptionValue {
                key: OPTION_SOURCE_PATH.to_string(),
                value: value.to_string(),
            })?;
        options.source_path = Some(PathBuf::from(path));
    }

    Ok(options)
}

fn expand_group(tokens: &[Value], variants: &mut BTreeSet<Variant>) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    let mut sizes = BTreeSet::new();
    let mut styles = BTreeSet::new();

    for token in tokens {
        match token {
            Value::Number(number) if number.is_i64() || number.is_u64() => {
                let size = number
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ConfigError::InvalidSize(number.to_string()))?;
                sizes.insert(size);
            }
            Value::String(word) => match Style::from_keyword(word) {
                Some(style) => {
                    styles.insert(style);
                }
                None => {
                    names.insert(word.as_str());
                }
            },
            other => return Err(ConfigError::UnexpectedToken(other.to_string())),
        }
    }

    if sizes.is_empty() {
        sizes.insert(DEFAULT_SIZE);
    }
    if styles.is_empty() {
        styles.insert(DEFAULT_STYLE);
    }

    for name in &names {
        for size in &sizes {
            for style in &styles {
                variants.insert(Variant::new(*name, *size, *style));
            }
        }
    }

    Ok(())
}
