//! linkscan CLI
//!
//! Extracts anchor and image links from an HTML document and reports whether
//! its tags are well balanced.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use linkscan_common::warning::set_quiet;
use linkscan_html::{HtmlScraper, ScanResult, tokenize};
use owo_colors::OwoColorize;

/// Extract links from an HTML document and check its tag balance.
#[derive(Debug, Parser)]
#[command(name = "linkscan", version, about)]
struct Args {
    /// HTML file to scan.
    #[arg(required_unless_present = "html", conflicts_with = "html")]
    file: Option<PathBuf>,

    /// Scan this HTML string instead of a file.
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Print the lexer's token stream instead of scanning.
    #[arg(long, conflicts_with = "json")]
    tokens: bool,

    /// Do not print warnings about the markup.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    set_quiet(args.quiet);

    let scraper = match (&args.html, &args.file) {
        (Some(html), _) if args.tokens => return print_tokens(html),
        (None, Some(path)) if args.tokens => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            return print_tokens(&html);
        }
        (Some(html), _) => HtmlScraper::from_html(html)?,
        (None, Some(path)) => HtmlScraper::from_path(path)?,
        (None, None) => anyhow::bail!("either a FILE or --html is required"),
    };

    let result = scraper.into_result();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }
    Ok(())
}

fn print_tokens(html: &str) -> Result<()> {
    for token in tokenize(html)? {
        println!("{token}");
    }
    Ok(())
}

fn print_report(result: &ScanResult) {
    println!("{}", "=== Anchor links ===".bold());
    for link in result.anchor_links() {
        println!("  {link}");
    }
    println!("{} links", result.anchor_links().len());

    println!("\n{}", "=== Image links ===".bold());
    for link in result.image_links() {
        println!("  {link}");
    }
    println!("{} images", result.image_links().len());

    println!("\n{}", "=== Tag balance ===".bold());
    if result.is_balanced() {
        println!("{}", "balanced".green());
    } else {
        println!("{}", "unbalanced".red());
        for issue in result.issues() {
            println!("  token {}: {}", issue.token_index, issue.message);
        }
    }
}
