// Entry point: program main
// Runs the inspector over the given files, or one of the one-shot subcommands.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use richline::config::BarConfig;
use richline::encoding::detect_encoding;
use richline::layout::Part;
use richline::ui::model::{DEFAULT_BAR_COLOR, FileEntry, read_prefix};
use richline::ui::{initial_model, render_statusline, run};
use std::path::{Path, PathBuf};
use std::process;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "richline")]
#[command(version)]
#[command(about = "Status line layout and text encoding inspector")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Status bar definition (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Files to inspect interactively
    files: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the detected encoding of each file
    Sniff {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Lay out one status line and print it
    Render {
        /// Line width in cells
        #[arg(short, long, default_value_t = 80)]
        width: i32,

        /// Also print the tooltip under this column
        #[arg(long, value_name = "X")]
        tooltip_at: Option<i32>,

        /// One part per argument; overrides the parts from --config
        texts: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<BarConfig> {
    match path {
        Some(p) => BarConfig::load(p),
        None => Ok(BarConfig::default()),
    }
}

fn sniff(files: &[PathBuf]) -> Result<()> {
    let mut failed = 0;
    for path in files {
        match read_prefix(path) {
            Ok((bytes, _)) => {
                let verdict = detect_encoding(&bytes);
                println!(
                    "{}: {verdict} (codepage {})",
                    path.display(),
                    verdict.codepage()
                );
            }
            Err(e) => {
                warn!(path = %path.display(), "sniff failed");
                eprintln!("{e:#}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} files could not be read", files.len());
    }
    Ok(())
}

fn render(config: &BarConfig, width: i32, tooltip_at: Option<i32>, texts: &[String]) -> Result<()> {
    if width < 0 {
        bail!("width must not be negative");
    }
    let mut bar = config.status_bar();
    if !texts.is_empty() {
        bar.clear();
        for text in texts {
            bar.push(Part::new(text.as_str()));
        }
    }
    bar.relayout(width);

    let color = config.background.unwrap_or(DEFAULT_BAR_COLOR);
    println!("{}", render_statusline(&bar, color, width as usize));
    if let Some(x) = tooltip_at {
        println!("{}", bar.tooltip_at(x).unwrap_or(""));
    }
    Ok(())
}

async fn inspect(config: &BarConfig, files: &[PathBuf]) -> Result<()> {
    let entries = files.iter().map(|p| FileEntry::sniff(p)).collect();
    run(initial_model(entries, config))
        .await
        .context("inspector failed")
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match load_config(cli.config.as_deref()) {
        Err(e) => Err(e),
        Ok(config) => match &cli.command {
            Some(Commands::Sniff { files }) => sniff(files),
            Some(Commands::Render {
                width,
                tooltip_at,
                texts,
            }) => render(&config, *width, *tooltip_at, texts),
            None => inspect(&config, &cli.files).await,
        },
    };

    if let Err(e) = result {
        eprintln!("richline: {e:#}");
        process::exit(2);
    }
}
