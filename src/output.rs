//! CLI output formatting.
//!
//! Each report has a `format_*` function returning plain strings and a thin
//! `print_*` wrapper that writes to the console. Format functions are pure —
//! no I/O, no side effects — so tests assert on report content without
//! capturing stdout.

use crate::batch::ImageOutcome;
use crate::metadata::ExifBag;
use std::path::Path;

/// Format the full EXIF bag, one `tag: value` line per entry.
///
/// Shown by `--debug` before field resolution. Purely observational.
pub fn format_exif_dump(bag: &ExifBag) -> Vec<String> {
    if bag.is_empty() {
        return vec!["  (no EXIF tags found)".to_string()];
    }
    bag.iter().map(|(tag, value)| format!("  {tag}: {value}")).collect()
}

pub fn print_exif_dump(input: &Path, bag: &ExifBag) {
    println!("EXIF tags for {}:", input.display());
    for line in format_exif_dump(bag) {
        println!("{line}");
    }
}

/// One line per processed image.
pub fn format_outcome(outcome: &ImageOutcome) -> String {
    match outcome {
        ImageOutcome::Written { input, output } => {
            format!("{} -> {}", input.display(), output.display())
        }
        ImageOutcome::Skipped {
            input,
            width,
            threshold,
        } => format!(
            "{}: skipped ({width}px wide, threshold {threshold}px; use --force to watermark anyway)",
            input.display()
        ),
        ImageOutcome::Failed { input, error } => {
            format!("{}: error: {error}", input.display())
        }
    }
}

/// Run summary: written/skipped/failed counts.
pub fn format_summary(outcomes: &[ImageOutcome]) -> String {
    let written = outcomes.iter().filter(|o| o.is_written()).count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, ImageOutcome::Skipped { .. }))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, ImageOutcome::Failed { .. }))
        .count();
    format!(
        "{} image(s): {written} written, {skipped} skipped, {failed} failed",
        outcomes.len()
    )
}

pub fn print_outcomes(outcomes: &[ImageOutcome]) {
    for outcome in outcomes {
        println!("{}", format_outcome(outcome));
    }
}

pub fn print_summary(outcomes: &[ImageOutcome]) {
    println!("{}", format_summary(outcomes));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ProcessError;
    use crate::metadata::TAG_MAKE;
    use std::path::PathBuf;

    fn written() -> ImageOutcome {
        ImageOutcome::Written {
            input: PathBuf::from("a.jpg"),
            output: PathBuf::from("out/a.jpg"),
        }
    }

    fn skipped() -> ImageOutcome {
        ImageOutcome::Skipped {
            input: PathBuf::from("small.jpg"),
            width: 1000,
            threshold: 1800,
        }
    }

    fn failed() -> ImageOutcome {
        ImageOutcome::Failed {
            input: PathBuf::from("broken.jpg"),
            error: ProcessError::Io(std::io::Error::other("boom")),
        }
    }

    #[test]
    fn format_written_shows_both_paths() {
        let line = format_outcome(&written());
        assert!(line.contains("a.jpg"));
        assert!(line.contains("out/a.jpg"));
    }

    #[test]
    fn format_skipped_mentions_threshold_and_force() {
        let line = format_outcome(&skipped());
        assert!(line.contains("skipped"));
        assert!(line.contains("1000px"));
        assert!(line.contains("1800px"));
        assert!(line.contains("--force"));
    }

    #[test]
    fn format_failed_includes_error() {
        let line = format_outcome(&failed());
        assert!(line.contains("broken.jpg"));
        assert!(line.contains("boom"));
    }

    #[test]
    fn summary_counts_each_kind() {
        let outcomes = vec![written(), written(), skipped(), failed()];
        let summary = format_summary(&outcomes);
        assert_eq!(summary, "4 image(s): 2 written, 1 skipped, 1 failed");
    }

    #[test]
    fn exif_dump_lists_tags_in_order() {
        let bag = ExifBag::from_pairs([("Model", "Z 9"), (TAG_MAKE, "NIKON")]);
        let lines = format_exif_dump(&bag);
        assert_eq!(lines, vec!["  Make: NIKON", "  Model: Z 9"]);
    }

    #[test]
    fn exif_dump_empty_bag_is_explicit() {
        let lines = format_exif_dump(&ExifBag::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("no EXIF"));
    }
}
