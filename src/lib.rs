//! # exifstamp
//!
//! Adds an EXIF watermark frame to photographs: the original image is placed
//! on a white bordered canvas with an information band below it carrying the
//! camera brand, model, lens, exposure triad, and a brand logo.
//!
//! # Architecture: Per-Image Pipeline
//!
//! Every image flows through the same stages, each a pure function of the
//! image plus the shared read-only configuration:
//!
//! ```text
//! decode → read EXIF bag → resolve display fields → plan geometry
//!        → compose canvas → encode PNG → write
//! ```
//!
//! Batches fan the pipeline out across a rayon worker pool; images are
//! fully independent, so no synchronization is needed beyond serializing
//! the interactive lens prompt.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `exifstamp.toml` loading, validation, stock defaults |
//! | [`metadata`] | EXIF tag bag with the `"N/A"` sentinel for absent tags |
//! | [`resolve`] | Display field resolution: lens fallback chain + prompt |
//! | [`layout`] | Canvas plan: sizes, text anchors, logo rect, skip gate |
//! | [`text`] | Glyph measurement and left/right-anchored rendering |
//! | [`assets`] | Font set and brand logo loading, embedded fallback font |
//! | [`compose`] | Canvas composition and lossless PNG encoding |
//! | [`batch`] | Per-image pipeline + parallel batch execution |
//! | [`output`] | CLI report formatting (pure `format_*` + `print_*`) |
//!
//! # Design Decisions
//!
//! ## Deterministic Output
//!
//! The whole pipeline is a pure function of input image + configuration: no
//! timestamps, no randomness, fixed pixel offsets. Running twice produces
//! byte-identical files, which keeps golden-image comparisons meaningful.
//!
//! ## Forgiving Metadata, Strict Config
//!
//! Absent EXIF tags are normal (`"N/A"` sentinel, lens fallback chain), but
//! a config file that exists and fails to parse or validate is a hard error
//! — silently watermarking a batch with wrong geometry is worse than
//! stopping.
//!
//! ## In-Memory Encoding
//!
//! Each output is encoded to PNG in memory and written with a single
//! `fs::write`, so an aborted image never leaves a truncated file behind.
//!
//! ## Pluggable Lens Prompt
//!
//! The only blocking interaction — asking the operator for a lens name —
//! sits behind the [`resolve::LensPrompt`] trait. The console
//! implementation serializes concurrent prompts with a mutex; tests supply
//! canned answers.

pub mod assets;
pub mod batch;
pub mod compose;
pub mod config;
pub mod layout;
pub mod metadata;
pub mod output;
pub mod resolve;
pub mod text;
