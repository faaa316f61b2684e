use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Variant;
use crate::diff::diff;
use crate::error::Error;
use crate::manifest::{self, CatalogManifest, ImageSetManifest, MANIFEST_NAME};
use crate::render::Rasterizer;
use crate::source::SourceProvider;

pub const CATALOG_EXTENSION: &str = "xcassets";
pub const IMAGESET_EXTENSION: &str = "imageset";
pub const RASTER_EXTENSION: &str = "png";

/// Every imageset carries these scale factors.
pub const SCALES: [u32; 3] = [1, 2, 3];

/// `icons.json` becomes `icons.xcassets` next to it.
pub fn catalog_path(config_path: &Path) -> PathBuf {
    config_path.with_extension(CATALOG_EXTENSION)
}

pub fn imageset_name(variant: &Variant) -> String {
    format!("{}.{}", variant.base_name(), IMAGESET_EXTENSION)
}

pub fn raster_name(variant: &Variant, scale: u32) -> String {
    match scale {
        1 => format!("{}.{}", variant.base_name(), RASTER_EXTENSION),
        scale => format!("{}@{}x.{}", variant.base_name(), scale, RASTER_EXTENSION),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Plan and log everything, touch nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    CreateCatalog(PathBuf),
    WriteManifest(PathBuf),
    DeleteImageSet(String),
    CreateImageSet(String),
    DeleteRaster {
        imageset: String,
        file: String,
    },
    Render {
        imageset: String,
        file: String,
        pixels: u64,
    },
}

impl CatalogAction {
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            CatalogAction::DeleteImageSet(_) | CatalogAction::DeleteRaster { .. }
        )
    }
}

impl fmt::Display for CatalogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogAction::CreateCatalog(path) => write!(f, "create catalog {}", path.display()),
            CatalogAction::WriteManifest(path) => write!(f, "write {}", path.display()),
            CatalogAction::DeleteImageSet(name) => write!(f, "delete imageset {}", name),
            CatalogAction::CreateImageSet(name) => write!(f, "create imageset {}", name),
            CatalogAction::DeleteRaster { imageset, file } => {
                write!(f, "delete {}/{}", imageset, file)
            }
            CatalogAction::Render {
                imageset,
                file,
                pixels,
            } => write!(f, "render {}/{} ({}px)", imageset, file, pixels),
        }
    }
}

fn print_action(action: &CatalogAction) {
    if action.is_delete() {
        println!("  {} {}", "-".red(), action.to_string().red());
    } else {
        println!("  {} {}", "+".green(), action);
    }
}

pub fn summarize(actions: &[CatalogAction]) -> String {
    let mut imagesets_created = 0;
    let mut imagesets_deleted = 0;
    let mut rendered = 0;
    let mut rasters_deleted = 0;

    for action in actions {
        match action {
            CatalogAction::CreateImageSet(_) => imagesets_created += 1,
            CatalogAction::DeleteImageSet(_) => imagesets_deleted += 1,
            CatalogAction::Render { .. } => rendered += 1,
            CatalogAction::DeleteRaster { .. } => rasters_deleted += 1,
            CatalogAction::CreateCatalog(_) | CatalogAction::WriteManifest(_) => {}
        }
    }

    format!(
        "{} imagesets created, {} deleted; {} images rendered, {} deleted",
        imagesets_created, imagesets_deleted, rendered, rasters_deleted
    )
}

/// Records and logs each action; the caller performs it unless in dry run.
struct Journal {
    actions: Vec<CatalogAction>,
}

impl Journal {
    fn record(&mut self, action: CatalogAction) {
        print_action(&action);
        self.actions.push(action);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Directory,
    File,
}

/// Names of the immediate children of `dir` with the given kind and extension.
/// A missing directory has no children.
fn list_entries(dir: &Path, kind: EntryKind, extension: &str) -> Result<BTreeSet<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e).with_context(|| format!("Failed to list {}", dir.display())),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let file_type = entry.file_type()?;
        let matches_kind = match kind {
            EntryKind::Directory => file_type.is_dir(),
            EntryKind::File => file_type.is_file(),
        };
        if !matches_kind {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if Path::new(&name).extension().and_then(|ext| ext.to_str()) == Some(extension) {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Icon names become file names directly under the catalog root, so they must
/// not be empty, contain a path separator, or be a `.`/`..` component.
pub fn check_icon_name(name: &str) -> Result<(), Error> {
    let is_separator = |c: char| c == '/' || c == '\\' || std::path::is_separator(c);
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(is_separator)
        || name.contains('\0')
    {
        return Err(Error::InvalidIconName(name.to_string()));
    }
    Ok(())
}

/// Brings the catalog at `root` in line with `variants`.
///
/// Imagesets are diffed against the directories present under `root`, then the
/// PNGs inside every expected imageset are diffed against the files present.
/// Stale entries are deleted, missing ones created; manifests are only ever
/// written when absent. Returns the actions in the order they were logged.
///
/// Every icon name is checked before anything is logged or touched.
pub async fn reconcile<S, R>(
    root: &Path,
    variants: &BTreeSet<Variant>,
    options: &ReconcileOptions,
    sources: &mut S,
    rasterizer: &R,
) -> Result<Vec<CatalogAction>>
where
    S: SourceProvider,
    R: Rasterizer,
{
    for variant in variants {
        check_icon_name(&variant.name)?;
    }

    let dry_run = options.dry_run;
    let mut journal = Journal {
        actions: Vec::new(),
    };

    if !root.is_dir() {
        journal.record(CatalogAction::CreateCatalog(root.to_path_buf()));
        if !dry_run {
            std::fs::create_dir_all(root)
                .with_context(|| format!("Failed to create {}", root.display()))?;
        }
    }

    let root_manifest = root.join(MANIFEST_NAME);
    if !root_manifest.exists() {
        journal.record(CatalogAction::WriteManifest(root_manifest.clone()));
        if !dry_run {
            manifest::save(&CatalogManifest::default(), &root_manifest)?;
        }
    }

    let by_imageset: BTreeMap<String, &Variant> = variants
        .iter()
        .map(|variant| (imageset_name(variant), variant))
        .collect();
    let expected: BTreeSet<String> = by_imageset.keys().cloned().collect();
    let existing = list_entries(root, EntryKind::Directory, IMAGESET_EXTENSION)?;
    let imagesets = diff(&expected, &existing);
    if imagesets.has_changes() {
        println!("  {} {}", "imagesets:".dimmed(), imagesets.summary().dimmed());
    }

    for name in &imagesets.to_delete {
        journal.record(CatalogAction::DeleteImageSet(name.clone()));
        if !dry_run {
            let dir = root.join(name);
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to delete {}", dir.display()))?;
        }
    }

    for name in &imagesets.to_create {
        journal.record(CatalogAction::CreateImageSet(name.clone()));
        if !dry_run {
            let dir = root.join(name);
            std::fs::create_dir(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    for (name, variant) in &by_imageset {
        let dir = root.join(name);
        let scales: BTreeMap<String, u32> = SCALES
            .iter()
            .map(|&scale| (raster_name(variant, scale), scale))
            .collect();

        let expected_files: BTreeSet<String> = scales.keys().cloned().collect();
        let existing_files = list_entries(&dir, EntryKind::File, RASTER_EXTENSION)?;
        let rasters = diff(&expected_files, &existing_files);

        for file in &rasters.to_delete {
            journal.record(CatalogAction::DeleteRaster {
                imageset: name.clone(),
                file: file.clone(),
            });
            if !dry_run {
                let path = dir.join(file);
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to delete {}", path.display()))?;
            }
        }

        for file in &rasters.to_create {
            let scale = scales[file];
            let pixels = u64::from(variant.size) * u64::from(scale);

            journal.record(CatalogAction::Render {
                imageset: name.clone(),
                file: file.clone(),
                pixels,
            });
            if !dry_run {
                let source = sources.resolve(&variant.name, variant.style).await?;
                rasterizer.rasterize(&source, pixels, &dir.join(file)).await?;
            }
        }

        let imageset_manifest = dir.join(MANIFEST_NAME);
        if !imageset_manifest.exists() {
            journal.record(CatalogAction::WriteManifest(imageset_manifest.clone()));
            if !dry_run {
                let contents = ImageSetManifest::new(
                    SCALES.iter().map(|&scale| (raster_name(variant, scale), scale)),
                );
                manifest::save(&contents, &imageset_manifest)?;
            }
        }
    }

    Ok(journal.actions)
}
