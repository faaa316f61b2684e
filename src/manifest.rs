use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const MANIFEST_NAME: &str = "Contents.json";

const AUTHOR: &str = "xcode";
const VERSION: u32 = 1;
const IDIOM: &str = "universal";

// Field order is alphabetical so the output matches Xcode's sorted keys.

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Info {
    pub author: String,
    pub version: u32,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            author: AUTHOR.to_string(),
            version: VERSION,
        }
    }
}

/// `Contents.json` at the root of an `.xcassets` catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogManifest {
    pub info: Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageEntry {
    pub filename: String,
    pub idiom: String,
    pub scale: String,
}

/// `Contents.json` inside an `.imageset`, listing its 1x/2x/3x files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageSetManifest {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

impl ImageSetManifest {
    pub fn new(files: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            images: files
                .into_iter()
                .map(|(filename, scale)| ImageEntry {
                    filename,
                    idiom: IDIOM.to_string(),
                    scale: format!("{}x", scale),
                })
                .collect(),
            info: Info::default(),
        }
    }
}

/// Serializes with four-space indentation and a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut json = String::from_utf8(buf)?;
    json.push('\n');
    Ok(json)
}

pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = to_json(value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
