use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::manifest::{self, Manifest, ShapeWarning};

/// Run the check command.
pub fn run(file: &Path, quiet: bool) -> Result<()> {
    let manifest = manifest::load(file)?;
    let warnings = manifest::validate(&manifest);

    if !quiet {
        println!("{}", summary(&manifest));
    }

    if warnings.is_empty() {
        println!("{}", "No problems found.".green().bold());
        return Ok(());
    }

    for warning in &warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
    println!(
        "{}",
        format!(
            "{} problem(s) found. The exhibit will still run with these parts skipped.",
            warnings.len()
        )
        .yellow()
    );
    if warnings.iter().any(is_blocking) {
        anyhow::bail!("{} has no slides to present", file.display());
    }
    Ok(())
}

fn summary(manifest: &Manifest) -> String {
    let title = manifest.title.as_deref().unwrap_or("(untitled)");
    let slides = manifest.slides.as_ref().map_or(0, Vec::len);
    let simulations: usize = manifest
        .slides
        .iter()
        .flatten()
        .map(|s| s.simulations.len())
        .sum();
    format!("{title}: {slides} slide(s), {simulations} simulation(s)")
}

/// Warnings that leave the exhibit with nothing to show.
pub fn is_blocking(warning: &ShapeWarning) -> bool {
    matches!(warning, ShapeWarning::MissingSlides | ShapeWarning::EmptySlides)
}
