//! CLI entry point for shortcut-engine
//!
//! Provides a command-line interface for inspecting canonical combo forms
//! and checking combo spellings for collisions.

use clap::{Parser, Subcommand};
use colored::*;
use shortcut_engine::core::parser::normalize_combo;
use shortcut_engine::core::{Combo, Platform};
use std::collections::HashMap;

#[derive(Parser)]
#[command(name = "shortcut-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Resolve the `mod` token as on Apple platforms (meta instead of ctrl)
    #[arg(long, global = true)]
    apple: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of each combo spelling
    Normalize {
        /// Combo spellings, e.g. "Ctrl+Shift+K" "cmd+s"
        #[arg(required = true)]
        combos: Vec<String>,
    },

    /// Check combo spellings for collisions on one canonical form
    Check {
        /// Combo spellings to compare
        #[arg(required = true)]
        combos: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let platform = if cli.apple {
        Platform::AppleLike
    } else {
        Platform::current()
    };

    match cli.command {
        Commands::Normalize { combos } => normalize_spellings(&combos, platform),
        Commands::Check { combos } => check_collisions(&combos, platform),
    }

    Ok(())
}

/// Print each spelling with its canonical form
fn normalize_spellings(spellings: &[String], platform: Platform) {
    for spelling in spellings {
        let combo = normalize_combo(spelling, platform);

        if combo.is_empty() {
            println!(
                "{} {} → {}",
                "✗".red(),
                spelling,
                "(no recognised combination)".dimmed()
            );
        } else {
            println!("{} {} → {}", "✓".green(), spelling, combo.canonical().cyan().bold());
        }
    }
}

/// Group spellings by canonical form and report collisions
fn check_collisions(spellings: &[String], platform: Platform) {
    let mut groups: HashMap<Combo, Vec<String>> = HashMap::new();

    for spelling in spellings {
        let combo = normalize_combo(spelling, platform);
        if combo.is_empty() {
            println!("{} Skipping unrecognised spelling: {}", "→".cyan(), spelling);
            continue;
        }
        groups.entry(combo).or_default().push(spelling.clone());
    }

    let mut collisions: Vec<(&Combo, &Vec<String>)> = groups
        .iter()
        .filter(|(_, spellings)| spellings.len() > 1)
        .collect();
    collisions.sort_by_key(|(combo, _)| combo.canonical());

    if collisions.is_empty() {
        println!("{} {}", "✓".green().bold(), "No collisions detected!".bold());
        return;
    }

    println!(
        "{} Found {} collision{}:\n",
        "✗".red().bold(),
        collisions.len(),
        if collisions.len() == 1 { "" } else { "s" }
    );

    for (i, (combo, spellings)) in collisions.iter().enumerate() {
        println!(
            "{} {}",
            format!("Collision {}", i + 1).yellow().bold(),
            combo.canonical().cyan()
        );

        for (idx, spelling) in spellings.iter().enumerate() {
            println!("  {} {}", format!("{}.", idx + 1).dimmed(), spelling);
        }
        println!();
    }

    println!(
        "{}",
        "⚠ These spellings resolve to the same shortcut!".yellow()
    );
    std::process::exit(1);
}
