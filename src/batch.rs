//! Batch pipeline execution.
//!
//! Runs the per-image pipeline — decode → EXIF → resolve → plan → compose →
//! encode → write — over one or many inputs. Images are processed in
//! parallel with [rayon](https://docs.rs/rayon); every image owns its own
//! buffers, plan, and output file, so the only shared state is the
//! read-only config, the loaded assets, and the lens prompt (which
//! serializes itself).
//!
//! One image's failure never aborts its siblings: each input resolves to an
//! [`ImageOutcome`] and the batch always runs to completion.

use crate::assets::{AssetError, FontSet, LogoSet};
use crate::compose::{self, ComposeError};
use crate::config::WatermarkConfig;
use crate::layout::{self, LayoutOutcome};
use crate::metadata::ExifBag;
use crate::output;
use crate::resolve::{self, LensPrompt};
use crate::text;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions accepted when expanding a directory input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-run flags, owned by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Watermark images below the width threshold anyway.
    pub force: bool,
    /// Dump the full EXIF bag before resolving fields.
    pub debug: bool,
    /// Manual lens name used when EXIF carries none.
    pub lens_override: Option<String>,
    /// Accepted for CLI compatibility; composition never branches on it —
    /// rendering is always on the CPU.
    pub gpu: bool,
}

/// Result of processing one input image.
#[derive(Debug)]
pub enum ImageOutcome {
    /// Output file written.
    Written { input: PathBuf, output: PathBuf },
    /// Below the width threshold and not forced; nothing written.
    Skipped {
        input: PathBuf,
        width: u32,
        threshold: u32,
    },
    /// This image failed; siblings are unaffected.
    Failed {
        input: PathBuf,
        error: ProcessError,
    },
}

impl ImageOutcome {
    pub fn input(&self) -> &Path {
        match self {
            ImageOutcome::Written { input, .. }
            | ImageOutcome::Skipped { input, .. }
            | ImageOutcome::Failed { input, .. } => input,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, ImageOutcome::Written { .. })
    }
}

/// Shared per-run state: config, fonts, logos, and the lens prompt.
///
/// Everything here is read-only after construction, so one engine is safely
/// shared across the rayon workers.
pub struct Engine<'a> {
    config: &'a WatermarkConfig,
    fonts: FontSet,
    logos: LogoSet,
    prompt: &'a dyn LensPrompt,
}

impl<'a> Engine<'a> {
    /// Load fonts and logos from the config and build an engine.
    pub fn new(
        config: &'a WatermarkConfig,
        prompt: &'a dyn LensPrompt,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            config,
            fonts: FontSet::load(&config.font)?,
            logos: LogoSet::load(&config.image),
            prompt,
        })
    }

    /// Build an engine around already-loaded assets.
    pub fn with_assets(
        config: &'a WatermarkConfig,
        fonts: FontSet,
        logos: LogoSet,
        prompt: &'a dyn LensPrompt,
    ) -> Self {
        Self {
            config,
            fonts,
            logos,
            prompt,
        }
    }

    /// Process a single image into an explicit output path.
    pub fn process(&self, input: &Path, output: &Path, opts: &RunOptions) -> ImageOutcome {
        match self.process_inner(input, output, opts) {
            Ok(outcome) => outcome,
            Err(error) => ImageOutcome::Failed {
                input: input.to_path_buf(),
                error,
            },
        }
    }

    fn process_inner(
        &self,
        input: &Path,
        output: &Path,
        opts: &RunOptions,
    ) -> Result<ImageOutcome, ProcessError> {
        let source = compose::load_source(input)?;

        let bag = ExifBag::from_file(input);
        if opts.debug {
            output::print_exif_dump(input, &bag);
        }

        let fields = resolve::resolve(&bag, opts.lens_override.as_deref(), self.prompt)?;

        let (_, model_height) =
            text::measure(&self.fonts.model, self.config.font.normal_size, &fields.model);

        match layout::plan(
            source.width(),
            source.height(),
            &fields.make,
            model_height,
            opts.force,
            self.config,
        ) {
            LayoutOutcome::Skip { width, threshold } => Ok(ImageOutcome::Skipped {
                input: input.to_path_buf(),
                width,
                threshold,
            }),
            LayoutOutcome::Plan(plan) => {
                let logo = self.logos.for_brand(plan.brand);
                let canvas =
                    compose::compose(&source, &plan, &fields, &self.fonts, logo, &self.config.font)?;
                // Encode fully in memory, then write once — a failure along
                // the way leaves no truncated file at the destination.
                let png = compose::encode_png(&canvas)?;
                fs::write(output, png)?;
                Ok(ImageOutcome::Written {
                    input: input.to_path_buf(),
                    output: output.to_path_buf(),
                })
            }
        }
    }

    /// Process a batch of inputs into `output_dir`, in parallel.
    ///
    /// Directory inputs expand to the image files directly inside them.
    /// Each output lands at `output_dir/basename(input)`.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        opts: &RunOptions,
    ) -> Result<Vec<ImageOutcome>, ProcessError> {
        fs::create_dir_all(output_dir)?;
        let files = expand_inputs(inputs);

        Ok(files
            .par_iter()
            .map(|input| {
                let name = input
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("output.png"));
                let output = output_dir.join(name);
                self.process(input, &output, opts)
            })
            .collect())
    }
}

/// Expand directory inputs to the image files directly inside them.
///
/// Plain file paths pass through untouched — even nonexistent ones, which
/// surface later as per-image decode failures. Expanded directory listings
/// are sorted for a deterministic processing order.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .max_depth(1)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| has_supported_extension(path))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
