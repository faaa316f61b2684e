use std::path::PathBuf;

use clap::Parser;

use crate::catalog::ReconcileOptions;

#[derive(Debug, Parser)]
#[command(
    name = "phosphor-uikit",
    version,
    about = "Rasterize Phosphor SVG icons as PNG-based asset catalogs for UIKit projects",
    long_about = "\
Rasterize Phosphor SVG icons as PNG-based asset catalogs for UIKit projects.

Each CONFIG is a JSON array of groups and option objects, for example:

  [
    {\"renderer\": \"inkscape\"},
    [\"person\", \"user\", 44, \"bold\"],
    [\"person\", 20]
  ]

Integers are point sizes (default 44), style keywords (bold, duotone, fill,
light, regular, thin) are styles (default regular) and any other string is an
icon name. `icons.json` produces `icons.xcassets` next to it.

See https://phosphoricons.com"
)]
pub struct Cli {
    /// JSON config files to process, in order
    #[arg(required = true, value_name = "CONFIG")]
    pub configs: Vec<PathBuf>,

    /// Show what would change without touching the filesystem
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            dry_run: self.dry_run,
        }
    }
}
