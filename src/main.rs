use clap::Parser;
use exifstamp::batch::{Engine, RunOptions};
use exifstamp::resolve::ConsolePrompt;
use exifstamp::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exifstamp")]
#[command(about = "Add an EXIF watermark frame to photos")]
#[command(long_about = "\
Add an EXIF watermark frame to photos

Each output is the original image on a white bordered canvas with an info
band below it: camera brand and model on the left, exposure triad and lens
on the right, and a brand logo for Nikon/Canon cameras.

Single image:

  exifstamp photo.jpg framed.png

Batch mode (files and/or directories, processed in parallel):

  exifstamp --batch shoot1/ extra.jpg --output-dir out

Images narrower than the configured width threshold are skipped unless
--force is given. When the lens model is missing from EXIF, pass --lens or
answer the interactive prompt.

Configuration is read from exifstamp.toml (see --gen-config); missing file
means built-in defaults.")]
#[command(version)]
struct Cli {
    /// Input image path (single mode)
    input: Option<PathBuf>,

    /// Output image path (single mode)
    output: Option<PathBuf>,

    /// Process a batch of files and/or directories into --output-dir
    #[arg(long, value_name = "PATH", num_args = 1..)]
    batch: Vec<PathBuf>,

    /// Output directory for batch mode
    #[arg(long, default_value = "out")]
    output_dir: PathBuf,

    /// Watermark images below the width threshold anyway
    #[arg(long)]
    force: bool,

    /// Dump all EXIF tags before processing each image
    #[arg(long)]
    debug: bool,

    /// Manual lens model, used when EXIF carries none
    #[arg(long, value_name = "MODEL")]
    lens: Option<String>,

    /// Accepted for compatibility; rendering is always on the CPU
    #[arg(long)]
    gpu: bool,

    /// Config file path
    #[arg(long, default_value = "exifstamp.toml")]
    config: PathBuf,

    /// Print a documented stock exifstamp.toml and exit
    #[arg(long)]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    if !cli.config.exists() {
        println!(
            "INFO: config file {} not found, using built-in defaults",
            cli.config.display()
        );
    }
    let config = config::load_config(&cli.config)?;

    init_thread_pool(&config.processing);

    if cli.gpu {
        println!("INFO: --gpu accepted, but composition always runs on the CPU");
    }

    let opts = RunOptions {
        force: cli.force,
        debug: cli.debug,
        lens_override: cli.lens.clone(),
        gpu: cli.gpu,
    };

    let prompt = ConsolePrompt::new();
    let engine = Engine::new(&config, &prompt)?;

    if !cli.batch.is_empty() {
        let outcomes = engine.run(&cli.batch, &cli.output_dir, &opts)?;
        output::print_outcomes(&outcomes);
        output::print_summary(&outcomes);
        return Ok(());
    }

    match (&cli.input, &cli.output) {
        (Some(input), Some(out)) => {
            let outcome = engine.process(input, out, &opts);
            output::print_outcomes(std::slice::from_ref(&outcome));
        }
        _ => {
            eprintln!("ERROR: provide an input and an output path, or use --batch");
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let jobs = config::effective_jobs(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .ok();
}
