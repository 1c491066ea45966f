//! Compare command handler
//!
//! Loads the reference image and every test image, then prints the
//! differing ranges of each test image against the reference.

use crate::config::CompareConfig;
use anyhow::{bail, Context, Result};
use memdump::{read_dump, Comparison, MemoryBuffer};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;

/// Handle the compare command, writing the report to stdout
pub fn handle(config: &CompareConfig) -> Result<()> {
    let stdout = io::stdout();
    let ranges = run(config, stdout.lock())?;
    tracing::info!(ranges, "compare finished");
    Ok(())
}

/// Run a comparison, returning the total number of ranges reported
pub fn run<W: Write>(config: &CompareConfig, mut out: W) -> Result<usize> {
    let Some((reference_path, test_paths)) = config.inputs.split_first() else {
        bail!("Requires at least one memory dump file");
    };

    // Load everything up front so a bad file aborts before any output
    let reference = load_image(reference_path, config.memory_size)?;
    let mut tests = Vec::with_capacity(test_paths.len());
    for path in test_paths {
        tests.push((path, load_image(path, config.memory_size)?));
    }

    if tests.is_empty() {
        tracing::warn!(
            reference = %reference_path.display(),
            "no test images given, nothing to compare"
        );
    }

    let mut total = 0;
    for (path, test) in &tests {
        if config.headers {
            writeln!(
                out,
                "== {} vs {} ==",
                reference_path.display(),
                path.display()
            )?;
        }

        let comparison = Comparison::new(reference.as_bytes(), test.as_bytes());
        if let Some(mismatch) = comparison.mismatch() {
            tracing::warn!(test = %path.display(), "{}", mismatch);
        }

        let count = comparison.write_report(&mut out, config.flush_trailing)?;
        tracing::info!(test = %path.display(), ranges = count, "compared image");
        total += count;
    }

    Ok(total)
}

/// Load a memory image: `.bin` files verbatim, anything else as dump text
pub fn load_image(path: &Path, memory_size: usize) -> Result<MemoryBuffer> {
    let is_raw = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("bin"))
        .unwrap_or(false);

    if is_raw {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "loaded raw image");
        return Ok(MemoryBuffer::from_bytes(bytes));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_dump(BufReader::new(file), memory_size)
        .with_context(|| format!("Failed to parse memory dump {}", path.display()))
}
