//! Display field resolution.
//!
//! Turns an [`ExifBag`] into the six strings rendered onto the info band.
//! Most fields resolve directly (absent → `"N/A"`), but the lens field runs
//! a fallback chain and is guaranteed resolved before layout begins:
//!
//! 1. `LensModel` tag
//! 2. `LensSpecification` tag
//! 3. caller-supplied override (`--lens`)
//! 4. interactive prompt via [`LensPrompt`]
//!
//! The prompt is a trait rather than a direct `stdin` read so tests can
//! supply a canned answer, and so the console implementation can serialize
//! prompts from concurrent batch workers.

use crate::metadata::{
    ExifBag, TAG_APERTURE, TAG_ISO, TAG_LENS_ID, TAG_LENS_MODEL, TAG_MAKE, TAG_MODEL, TAG_SHUTTER,
    UNKNOWN,
};
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// The resolved, human-readable strings rendered onto the output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub make: String,
    pub model: String,
    /// Never `"N/A"` — resolved via the fallback chain before this struct
    /// is constructed.
    pub lens: String,
    pub iso: String,
    pub aperture: String,
    pub shutter: String,
}

impl DisplayFields {
    /// The exposure triad as one delimited line, e.g. `/ISO400/F2.8/1/200/`.
    pub fn exposure_line(&self) -> String {
        format!("/ISO{}/F{}/{}/", self.iso, self.aperture, self.shutter)
    }
}

/// Source of a manually-entered lens name when EXIF carries none.
///
/// `Sync` because concurrent batch workers share one prompt; only the
/// worker awaiting input blocks.
pub trait LensPrompt: Sync {
    fn read_lens(&self) -> io::Result<String>;
}

/// Interactive console prompt.
///
/// A mutex serializes prompts from concurrent workers so two questions
/// never interleave on the terminal.
#[derive(Default)]
pub struct ConsolePrompt {
    gate: Mutex<()>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LensPrompt for ConsolePrompt {
    fn read_lens(&self) -> io::Result<String> {
        let _guard = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        let mut stdout = io::stdout().lock();
        write!(stdout, "Lens model not found in EXIF, enter it manually: ")?;
        stdout.flush()?;
        drop(stdout);
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Resolve all display fields from a metadata bag.
///
/// Blocks on `prompt` only when the lens cannot be resolved from EXIF or
/// the override; re-prompts until a non-empty answer arrives. The exposure
/// fields pass through as-is — `"N/A"` is an acceptable rendering for them.
pub fn resolve(
    bag: &ExifBag,
    lens_override: Option<&str>,
    prompt: &dyn LensPrompt,
) -> io::Result<DisplayFields> {
    let make = bag.get(TAG_MAKE).to_string();
    let model = bag.get(TAG_MODEL).to_string();

    let mut lens = bag.get(TAG_LENS_MODEL).to_string();
    if lens == UNKNOWN {
        lens = bag.get(TAG_LENS_ID).to_string();
    }
    if lens == UNKNOWN {
        if let Some(name) = lens_override.map(str::trim).filter(|s| !s.is_empty()) {
            lens = name.to_string();
        }
    }
    while lens == UNKNOWN || lens.is_empty() {
        let answer = prompt.read_lens()?;
        let answer = answer.trim();
        if !answer.is_empty() {
            lens = answer.to_string();
        }
    }

    Ok(DisplayFields {
        make,
        model,
        lens,
        iso: bag.get(TAG_ISO).to_string(),
        aperture: bag.get(TAG_APERTURE).to_string(),
        shutter: bag.get(TAG_SHUTTER).to_string(),
    })
}
