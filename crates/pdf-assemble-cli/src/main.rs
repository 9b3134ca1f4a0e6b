mod logger;
mod paths;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use pdf_assemble::{ImagesOptions, LayoutConfig, MergeOptions, RotateOptions, Rotation};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfa", about = "Build PDFs from images, merge and rotate PDFs", version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one PDF with a page per PNG/JPG image in a folder
    Images {
        /// Folder holding the images
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output PDF file (defaults to the folder name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text for a title page
        #[arg(short, long)]
        title: Option<String>,

        /// Clockwise rotation applied to every image (0, 90, 180, 270)
        #[arg(short, long, default_value = "0")]
        rotate: i64,

        /// JSON file with page layout settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Replace an existing output file without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Merge all PDFs in a folder into one
    Merge {
        /// Folder holding the PDFs
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output PDF file (defaults to the folder name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text for a title page
        #[arg(short, long)]
        title: Option<String>,

        /// JSON file with page layout settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Replace an existing output file without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Set the page rotation of all PDFs in a folder
    Rotate {
        /// Folder holding the PDFs
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Page rotation in degrees (0, 90, 180, 270)
        #[arg(short, long, default_value = "180")]
        degrees: i64,

        /// Replace the source files instead of writing <name>-rotated.pdf
        #[arg(short = 'w', long)]
        overwrite: bool,
    },
}

async fn load_layout(config: Option<&Path>) -> Result<LayoutConfig> {
    match config {
        Some(path) => {
            log::debug!("Loading layout from {}", path.display());
            Ok(LayoutConfig::load(path).await?)
        }
        None => Ok(LayoutConfig::default()),
    }
}

fn resolve_output(input: &Path, output: Option<&Path>, yes: bool) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let path = paths::output_path(input, output, &cwd)?;
    if !yes {
        paths::confirm_overwrite(&path, std::io::stdin().lock(), std::io::stdout())?;
    }
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::ConsoleLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Images {
            input,
            output,
            title,
            rotate,
            config,
            yes,
        } => {
            let rotation = Rotation::try_from(rotate)?;
            let layout = load_layout(config.as_deref()).await?;

            let images = paths::discover(&input, &paths::IMAGE_EXTENSIONS)?;
            if images.is_empty() {
                bail!("Found no images");
            }
            log::debug!("Found {} images in {}", images.len(), input.display());

            let output = resolve_output(&input, output.as_deref(), yes)?;
            let options = ImagesOptions {
                title,
                rotation,
                layout,
            };
            let summary = pdf_assemble::images_to_pdf(&images, &output, &options).await?;
            println!("Created PDF with {} images", summary.pages);
        }

        Commands::Merge {
            input,
            output,
            title,
            config,
            yes,
        } => {
            let layout = load_layout(config.as_deref()).await?;

            let pdfs = paths::discover(&input, &paths::PDF_EXTENSIONS)?;
            if pdfs.is_empty() {
                bail!("Found no PDFs");
            }

            let output = resolve_output(&input, output.as_deref(), yes)?;
            let pdfs = paths::exclude_output(pdfs, &output);
            if pdfs.is_empty() {
                bail!("Found no PDFs");
            }

            let options = MergeOptions { title, layout };
            pdf_assemble::merge_pdfs(&pdfs, &output, &options).await?;
            println!("Created single PDF from {} PDFs", pdfs.len());
        }

        Commands::Rotate {
            input,
            degrees,
            overwrite,
        } => {
            let rotation = Rotation::try_from(degrees)?;

            let pdfs = paths::discover(&input, &paths::PDF_EXTENSIONS)?;
            if pdfs.is_empty() {
                bail!("Found no PDFs");
            }

            let options = RotateOptions {
                rotation,
                overwrite,
            };
            let written = pdf_assemble::rotate_pdfs(&pdfs, &options).await?;
            println!("Rotated {} PDF(s)", written.len());
        }
    }

    Ok(())
}
