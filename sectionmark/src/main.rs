//! sectionmark - markdown content to typed sections
//!
//! CLI for parsing course pages, essays and project write-ups into the
//! section JSON stored by the content admin and read by the site renderer.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use sectionmark::cli::{Cli, Commands};
use sectionmark::content_config::{ContentConfig, CONFIG_FILE_NAME};
use sectionmark::content_model::{extract_navigation, MarkdownParser, ParsedContent};
use sectionmark::{json_exporter, pipeline};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Main entry point for the sectionmark CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            input,
            compact,
            flush_unterminated_code,
        } => {
            let config = load_config(cli.config.as_deref(), &input)?;
            handle_parse_command(&input, &config, compact, flush_unterminated_code)?;
        }

        Commands::Nav { input, compact } => {
            let config = load_config(cli.config.as_deref(), &input)?;
            handle_nav_command(&input, &config, compact)?;
        }

        Commands::Stats { input } => {
            let config = load_config(cli.config.as_deref(), &input)?;
            handle_stats_command(&input, &config)?;
        }

        Commands::Build { input, output } => {
            let config = load_config(cli.config.as_deref(), &input)?;
            handle_build_command(&input, &output, &config)?;
        }

        Commands::Init { path, force } => {
            handle_init_command(path, force)?;
        }
    }

    Ok(())
}

/// Install the logger; `--verbose` raises the default level to info
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Load the explicit config file, or sectionmark.toml next to the input
fn load_config(explicit: Option<&Path>, input: &Path) -> Result<ContentConfig> {
    if let Some(path) = explicit {
        return ContentConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()));
    }

    let dir = if is_stdin(input) {
        PathBuf::from(".")
    } else if input.is_dir() {
        input.to_path_buf()
    } else {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    };

    ContentConfig::load_or_default(&dir)
        .with_context(|| format!("Failed to load configuration from {}", dir.display()))
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

/// Read markdown from a file, or from standard input for `-`
fn read_markdown(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut markdown = String::new();
        std::io::stdin()
            .read_to_string(&mut markdown)
            .context("Failed to read markdown from standard input")?;
        return Ok(markdown);
    }

    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Read and parse one input with the configured options
fn parse_input(input: &Path, config: &ContentConfig) -> Result<ParsedContent> {
    let markdown = read_markdown(input)?;
    Ok(MarkdownParser::new(config.parse_options()).parse(&markdown))
}

/// Handle the parse command
fn handle_parse_command(
    input: &Path,
    config: &ContentConfig,
    compact: bool,
    flush_unterminated_code: bool,
) -> Result<()> {
    let mut config = config.clone();
    if flush_unterminated_code {
        config.parser.flush_unterminated_code = true;
    }

    let parsed = parse_input(input, &config)?;
    let json = json_exporter::to_json(&parsed, config.output.pretty && !compact)
        .context("Failed to serialize sections")?;
    println!("{}", json);

    Ok(())
}

/// Handle the nav command
fn handle_nav_command(input: &Path, config: &ContentConfig, compact: bool) -> Result<()> {
    let parsed = parse_input(input, config)?;
    let navigation = extract_navigation(&parsed);

    let json = json_exporter::navigation_to_json(&navigation, config.output.pretty && !compact)
        .context("Failed to serialize navigation")?;
    println!("{}", json);

    Ok(())
}

/// Handle the stats command
fn handle_stats_command(input: &Path, config: &ContentConfig) -> Result<()> {
    let parsed = parse_input(input, config)?;

    println!("Sections: {}", parsed.sections.len());
    for (section_type, count) in parsed.section_type_counts() {
        println!("  {:<11} {}", section_type, count);
    }
    println!("Words: {}", parsed.metadata.word_count);
    println!("Has images: {}", parsed.metadata.has_images);
    println!("Headings:");
    for heading in &parsed.metadata.headings {
        println!("  - {}", heading);
    }

    Ok(())
}

/// Handle the build command
fn handle_build_command(input: &Path, output: &Path, config: &ContentConfig) -> Result<()> {
    println!("Building sections...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    println!("\n[Stage 1/2] Parsing source files...");
    let sources = pipeline::parse_sources(input, config)
        .with_context(|| format!("Failed to parse sources from {}", input.display()))?;

    let summary = pipeline::summarize(&sources);
    println!(
        "✓ Parsed {} files ({} sections, {} words, {} with images)",
        summary.files, summary.sections, summary.words, summary.files_with_images
    );

    println!("\n[Stage 2/2] Writing JSON...");
    let written = pipeline::export_sources(&sources, output, config)
        .with_context(|| format!("Failed to write results to {}", output.display()))?;
    println!("✓ Wrote {} files", written);

    println!("\n✓ Build completed successfully!");

    Ok(())
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    let config_path = target_path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            config_path.display()
        );
    }

    ContentConfig::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✓ Created {}", config_path.display());

    Ok(())
}
