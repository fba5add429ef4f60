use clap::{Parser, Subcommand};
use cli::{RunConfig, oracle::{CommandDetector, CommandInpainter}};
use color_eyre::eyre::Result;
use cutout::{CutoutPipeline, MaskCleaner};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extraction + inpainting pipeline from a configuration file
    Process {
        /// Path to the TOML or JSON configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// Print the run summary as JSON on stdout
        #[arg(long)]
        summary: bool,
    },
    /// Clean a single mask PNG (close + smooth + rebinarize)
    CleanMask {
        /// Path to the input mask image
        #[arg(short, long)]
        input: PathBuf,
        /// Path for the cleaned mask
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Process { config, summary } => {
            process_image(config, *summary)?;
        }
        Commands::CleanMask { input, output } => {
            clean_mask(input, output)?;
        }
    }

    Ok(())
}

fn process_image(config_path: &Path, print_summary: bool) -> Result<()> {
    let config = RunConfig::from_file(config_path)?;
    info!(image = %config.image, output_dir = %config.output_dir, "starting run");

    let detector =
        CommandDetector::new(config.detector.command.clone(), config.detector.args.clone());
    let inpainter =
        CommandInpainter::new(config.inpainter.command.clone(), config.inpainter.args.clone());

    let mut builder = CutoutPipeline::builder().detector(detector).inpainter(inpainter);
    if let Some(classes) = &config.allowed_classes {
        builder = builder.allowed_classes(classes.iter().cloned());
    }
    let pipeline = builder.build()?;

    let summary = pipeline.run(Path::new(&config.image), Path::new(&config.output_dir))?;
    info!(
        base_dir = %summary.base_dir.display(),
        seen = summary.instances_seen,
        extracted = summary.extracted.len(),
        inpainted = summary.inpainted.len(),
        "run completed"
    );

    if print_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn clean_mask(input: &Path, output: &Path) -> Result<()> {
    let mask = image::open(input)?.to_luma8();
    let cleaned = MaskCleaner::new().clean(&mask);
    cleaned.save(output)?;
    info!(input = %input.display(), output = %output.display(), "mask cleaned");
    Ok(())
}
