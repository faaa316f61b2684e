use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::catalog::{self, catalog_path, ReconcileOptions};
use crate::cli::Cli;
use crate::config::{self, Config};
use crate::render::CommandRasterizer;
use crate::source::PhosphorSources;

pub async fn run(cli: &Cli) -> Result<()> {
    // Reject bad paths before touching any catalog.
    for path in &cli.configs {
        config::check_extension(path)?;
    }

    let options = cli.reconcile_options();
    for path in &cli.configs {
        process(path, &options).await?;
    }

    if options.dry_run {
        println!("\n{} Dry run — no changes applied.", "ℹ".blue());
    }

    Ok(())
}

/// Interprets one config file and reconciles its catalog.
pub async fn process(config_path: &Path, options: &ReconcileOptions) -> Result<()> {
    let config = Config::load(config_path)?;

    for warning in &config.warnings {
        println!("{} {}: {}", "!".yellow(), config_path.display(), warning);
    }

    let root = catalog_path(config_path);
    println!(
        "{} {} ({} variants, renderer: {})",
        "Catalog".bold(),
        root.display(),
        config.variants.len(),
        config.options.renderer
    );

    let mut sources = PhosphorSources::new(config.options.source_path.clone())?;
    let rasterizer = CommandRasterizer::new(config.options.renderer);

    let actions =
        catalog::reconcile(&root, &config.variants, options, &mut sources, &rasterizer).await?;

    if actions.is_empty() {
        println!("{} Everything is up to date.", "✓".green());
    } else {
        println!("{}", catalog::summarize(&actions));
        if !options.dry_run {
            println!("{} Updated {}", "✓".green(), root.display());
        }
    }

    Ok(())
}
