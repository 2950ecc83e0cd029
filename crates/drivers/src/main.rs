mod config;
mod logging;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::AppConfig;
use log::error;
use sift_adapters::{present_image_row, WalkdirFileScanner};
use sift_application::FileScanner;

/// Browse a folder of images and export the keepers.
#[derive(Debug, Parser)]
#[command(name = "sift", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    ui: UiArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the viewer window (the default)
    Ui(UiArgs),
    /// Print the images a folder would load, in browsing order
    List { folder: PathBuf },
}

#[derive(Debug, Clone, Default, Args)]
struct UiArgs {
    /// Folder to browse on startup
    #[arg(long)]
    origin: Option<PathBuf>,
    /// Folder receiving exported images
    #[arg(long)]
    destination: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");
            eprintln!("{error:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::default();
    match cli.command {
        None => ui::launch_window(config, cli.ui.origin, cli.ui.destination),
        Some(Command::Ui(args)) => ui::launch_window(config, args.origin, args.destination),
        Some(Command::List { folder }) => list_folder(&folder),
    }
}

fn list_folder(folder: &Path) -> Result<()> {
    let mut files = WalkdirFileScanner
        .scan_images(folder)
        .with_context(|| format!("list failed for {}", folder.display()))?
        .files;
    if files.is_empty() {
        println!("no images in {}", folder.display());
        return Ok(());
    }

    files.sort();
    let total = files.len();
    for (index, path) in files.iter().enumerate() {
        println!("{}", present_image_row(index, total, path));
    }
    Ok(())
}
