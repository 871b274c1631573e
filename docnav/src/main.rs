//! docnav - sidebar navigation for generated API documentation
//!
//! A CLI tool for browsing, inspecting and checking the keyboard navigation
//! of generated documentation pages.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SourceFormat};
use docnav::check;
use docnav::outline::Outline;
use docnav::{Document, Key, NavigationController, NavigationSnapshot};

/// Main entry point for the docnav CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Browse {
            source,
            format,
            keys,
            verbose,
        } => {
            handle_browse_command(source, format, keys, verbose)?;
        }

        Commands::Inspect { source, format } => {
            handle_inspect_command(source, format)?;
        }

        Commands::Check { path, verbose } => {
            let clean = handle_check_command(path, verbose)?;
            if !clean {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the browse command
fn handle_browse_command(
    source: PathBuf,
    format: Option<SourceFormat>,
    keys: Vec<String>,
    verbose: bool,
) -> Result<()> {
    init_logging(verbose);

    let keys = keys
        .iter()
        .map(|k| k.parse::<Key>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --keys value")?;

    let document = load_document(&source, format)?;
    let mut controller = NavigationController::new(document);
    controller.on_load();

    println!("Browsing {}", source.display());
    println!("  start      -> {}", controller.member_selection());
    for key in keys {
        let handled = controller.on_key_down(key);
        if handled {
            println!("  {:<10} -> {}", key.to_string(), controller.member_selection());
        } else {
            println!("  {:<10} (ignored)", key.to_string());
        }
    }

    print_snapshot(&controller.snapshot());

    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(source: PathBuf, format: Option<SourceFormat>) -> Result<()> {
    let document = load_document(&source, format)?;
    let mut controller = NavigationController::new(document);
    controller.on_load();

    let members = controller.document().members_by_class();
    let classes = controller.document().class_ids();
    println!("{}: {} classes", source.display(), classes.len());
    for class in &classes {
        let label = controller
            .document()
            .get(&docnav::NodeId::Class(*class).nav_dom_id())
            .and_then(|e| e.label.clone())
            .unwrap_or_default();
        let count = members.get(class).map_or(0, |m| m.len());
        let last = controller
            .last_index_table()
            .get(class)
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!("  {:>3} {:<30} {} members (last index {})", class, label, count, last);
    }

    let order = controller
        .navigation_order()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    println!("\nNavigation order: {}", order.join(" "));

    Ok(())
}

/// Handle the check command
///
/// Returns whether every page passed.
fn handle_check_command(path: PathBuf, verbose: bool) -> Result<bool> {
    init_logging(verbose);

    let pages = check::discover_pages(&path);
    if pages.is_empty() {
        anyhow::bail!("No HTML pages found under {}", path.display());
    }

    println!("Checking {} pages...", pages.len());

    let mut clean = true;
    for (page, report) in pages.iter().zip(check::check_pages(&pages)) {
        match report {
            Ok(report) if report.is_clean() => {
                println!(
                    "✓ {} ({} classes, {} members)",
                    page.display(),
                    report.classes,
                    report.members
                );
            }
            Ok(report) => {
                clean = false;
                println!("✗ {} ({} issues)", page.display(), report.issues.len());
                if verbose {
                    for issue in &report.issues {
                        println!("    - {}", issue);
                    }
                }
            }
            Err(e) => {
                clean = false;
                println!("✗ {}: {}", page.display(), e);
            }
        }
    }

    Ok(clean)
}

/// Load a page or outline, detecting the format from the extension
fn load_document(source: &Path, format: Option<SourceFormat>) -> Result<Document> {
    let format = match format {
        Some(fmt) => fmt,
        None => match source.extension().and_then(|s| s.to_str()) {
            Some("html") | Some("htm") => SourceFormat::Html,
            Some("toml") => SourceFormat::Outline,
            Some(ext) => {
                anyhow::bail!(
                    "Unknown source format for extension '.{}'. Supported: .html, .htm, .toml\nUse --format to specify explicitly.",
                    ext
                );
            }
            None => SourceFormat::Html,
        },
    };

    let document = match format {
        SourceFormat::Html => docnav::page::load_page(source)
            .with_context(|| format!("Failed to read page {}", source.display()))?,
        SourceFormat::Outline => Outline::load(source)
            .with_context(|| format!("Failed to load outline {}", source.display()))?
            .to_document(),
    };

    Ok(document)
}

/// Print what the page currently shows
fn print_snapshot(snapshot: &NavigationSnapshot) {
    println!("\nSelected class:  {}", snapshot.class_selection);
    println!("Selected member: {}", snapshot.member_selection);
    let active = [
        snapshot.active_classes.as_slice(),
        snapshot.active_members.as_slice(),
    ];
    let visible = [
        snapshot.visible_member_lists.as_slice(),
        snapshot.visible_class_descriptions.as_slice(),
        snapshot.visible_member_descriptions.as_slice(),
    ];
    println!("Active entries:  {}", join_or_dash(&active));
    println!("Visible panels:  {}", join_or_dash(&visible));
}

fn join_or_dash(groups: &[&[String]]) -> String {
    let joined = groups.concat().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
