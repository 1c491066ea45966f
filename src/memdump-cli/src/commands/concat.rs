//! Concat command handler
//!
//! Flattens dump files into one binary file, e.g. for a disassembler.

use anyhow::{Context, Result};
use memdump::append_dump;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Handle the concat command
///
/// `paths` is the output file followed by the input dumps. With fewer than
/// two paths the usage is printed and the process exits with status 1.
pub fn handle(paths: &[PathBuf]) -> Result<()> {
    let Some((output, inputs)) = split_paths(paths) else {
        show_usage();
        std::process::exit(1);
    };

    let written = concat_files(output, inputs)?;
    tracing::info!(
        output = %output.display(),
        inputs = inputs.len(),
        bytes = written,
        "wrote binary"
    );

    Ok(())
}

/// Split into the output path and at least one input path
pub fn split_paths(paths: &[PathBuf]) -> Option<(&PathBuf, &[PathBuf])> {
    match paths {
        [output, inputs @ ..] if !inputs.is_empty() => Some((output, inputs)),
        _ => None,
    }
}

/// Decode every input, then write the bytes to `output`.
///
/// The output file is only created once all inputs decoded cleanly.
pub fn concat_files(output: &Path, inputs: &[PathBuf]) -> Result<usize> {
    let mut data = Vec::new();

    for input in inputs {
        let file =
            File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
        let count = append_dump(BufReader::new(file), &mut data)
            .with_context(|| format!("Failed to read memory dump {}", input.display()))?;
        tracing::debug!(input = %input.display(), bytes = count, "decoded dump");
    }

    let mut file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    file.write_all(&data)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(data.len())
}

fn show_usage() {
    println!("Usage: memdump concat <output file> <file 1> <file 2> ... <file N>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_concat_ignores_addresses() {
        let temp_dir = tempfile::tempdir().unwrap();
        let first = temp_dir.path().join("a.txt");
        let second = temp_dir.path().join("b.txt");
        let output = temp_dir.path().join("out.bin");
        fs::write(&first, "1000:AABB\n").unwrap();
        fs::write(&second, "2000:CCDD\n").unwrap();

        let written = concat_files(&output, &[first, second]).unwrap();

        assert_eq!(written, 4);
        assert_eq!(fs::read(&output).unwrap(), vec![0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_concat_truncates_existing_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("a.txt");
        let output = temp_dir.path().join("out.bin");
        fs::write(&input, "0000:01\n").unwrap();
        fs::write(&output, [0xFF; 32]).unwrap();

        concat_files(&output, &[input]).unwrap();
        assert_eq!(fs::read(&output).unwrap(), vec![0x01]);
    }

    #[test]
    fn test_malformed_line_leaves_no_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let good = temp_dir.path().join("good.txt");
        let bad = temp_dir.path().join("bad.txt");
        let output = temp_dir.path().join("out.bin");
        fs::write(&good, "0000:0102\n").unwrap();
        fs::write(&bad, "0000:03\nabcREF\n").unwrap();

        let err = concat_files(&output, &[good, bad]).unwrap_err();

        assert!(format!("{:#}", err).contains("line 2"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("out.bin");

        assert!(concat_files(&output, &[temp_dir.path().join("nope.txt")]).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_split_paths_needs_output_and_input() {
        assert!(split_paths(&[]).is_none());
        assert!(split_paths(&[PathBuf::from("out.bin")]).is_none());

        let paths = [PathBuf::from("out.bin"), PathBuf::from("a.txt")];
        let (output, inputs) = split_paths(&paths).unwrap();
        assert_eq!(output, &PathBuf::from("out.bin"));
        assert_eq!(inputs, &[PathBuf::from("a.txt")]);

        let paths = [
            PathBuf::from("out.bin"),
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
        ];
        let (_, inputs) = split_paths(&paths).unwrap();
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }
}
