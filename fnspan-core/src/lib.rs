//! Fnspan core library - function definition line spans for C and C++

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Extraction is strictly per-declaration
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Deterministic traversal order must be explicit
// - Records stream to the sink; nothing is accumulated across files
// - Identical input yields identical records

pub mod ast;
pub mod extract;
pub mod language;
pub mod parser;
pub mod sink;
pub mod span;

pub use ast::{Declaration, FunctionRecord};
pub use extract::extract_unit;
pub use language::Language;
pub use sink::{DedupSink, FileSink, RecordFormat, RecordSink, WriterSink, DEFAULT_OUTPUT};
pub use span::SourceSpan;

use anyhow::{Context, Result};
use parser::ParsedUnit;
use std::path::Path;

/// Options controlling a single extraction run
pub struct ExtractOptions {
    /// Drop records already seen during this run (header-defined functions
    /// visited once per including translation unit). Never applies across
    /// runs.
    pub dedup: bool,
}

/// Counts for one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Files successfully parsed and traversed
    pub files: usize,
    /// Records written through the sink (after dedup, when enabled)
    pub records: usize,
    /// Files skipped because they could not be read or parsed
    pub skipped_files: usize,
}

/// Extract function spans from every supported file under the given paths
///
/// Each input path may be a single source file or a directory to walk.
/// Files are processed strictly in sequence; each record is pushed to the
/// sink as its declaration is visited. A file that cannot be read or
/// parsed contributes no records and is reported as a warning on stderr;
/// a sink failure aborts the run.
pub fn extract(
    paths: &[impl AsRef<Path>],
    sink: &mut dyn RecordSink,
    options: &ExtractOptions,
) -> Result<ExtractSummary> {
    if options.dedup {
        let mut dedup = DedupSink::new(sink);
        let mut summary = run(paths, &mut dedup)?;
        summary.records -= dedup.dropped();
        Ok(summary)
    } else {
        run(paths, sink)
    }
}

fn run(paths: &[impl AsRef<Path>], sink: &mut dyn RecordSink) -> Result<ExtractSummary> {
    let mut summary = ExtractSummary {
        files: 0,
        records: 0,
        skipped_files: 0,
    };

    for path in paths {
        let source_files = collect_source_files(path.as_ref())?;

        for file_path in source_files {
            // Parse failures skip one file's contribution; sink failures
            // below are fatal to the whole run
            let unit = match parse_file(&file_path) {
                Ok(unit) => unit,
                Err(e) => {
                    eprintln!("warning: skipping file {}: {}", file_path.display(), e);
                    summary.skipped_files += 1;
                    continue;
                }
            };

            summary.records += extract_unit(unit.as_ref(), sink)?;
            summary.files += 1;
        }
    }

    if summary.skipped_files > 0 {
        eprintln!("Skipped {} file(s) due to parse errors", summary.skipped_files);
    }

    Ok(summary)
}

/// Parse one source file into a translation unit
fn parse_file(path: &Path) -> Result<Box<dyn ParsedUnit>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let language = Language::detect(path, &source)
        .ok_or_else(|| anyhow::anyhow!("Unsupported file type: {}", path.display()))?;
    let parser = language.parser()?;
    parser.parse(&source, &path.display().to_string())
}

/// Check if a file is a supported source file
fn is_supported_source_file(path: &Path) -> bool {
    Language::from_path(path).is_some()
}

/// Collect all C and C++ files from a path (file or directory)
///
/// A file path is used directly when supported; a directory is walked
/// recursively. Results are sorted for deterministic order.
fn collect_source_files(path: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_supported_source_file(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, &mut files)?;
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Recursively collect C and C++ files from a directory
fn collect_source_files_recursive(
    dir: &Path,
    files: &mut Vec<std::path::PathBuf>,
) -> Result<()> {
    use std::ffi::OsStr;

    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry: std::fs::DirEntry = entry_result?;
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden and build-output directories
            if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
                if name.starts_with('.') || name == "build" || name == "target" {
                    continue;
                }
            }
            collect_source_files_recursive(&path, files)?;
        } else if path.is_file() && is_supported_source_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_from_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.c");
        fs::write(&file, "int f(void) { return 0; }\n").unwrap();

        let files = collect_source_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_ignores_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "not source\n").unwrap();

        let files = collect_source_files(&file).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_walks_directories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.c"), "").unwrap();
        fs::write(dir.path().join("a.cpp"), "").unwrap();
        fs::write(dir.path().join("sub/c.h"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let files = collect_source_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.cpp", "b.c", "sub/c.h"]);
    }

    #[test]
    fn test_collect_skips_hidden_and_build_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join(".git/x.c"), "").unwrap();
        fs::write(dir.path().join("build/y.c"), "").unwrap();
        fs::write(dir.path().join("z.c"), "").unwrap();

        let files = collect_source_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("z.c"));
    }

    #[test]
    fn test_extract_streams_records_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("math.c"),
            "int add(int a, int b) {\n    return a + b;\n}\nvoid decl(void);\n",
        )
        .unwrap();

        let mut sink = WriterSink::new(Vec::new(), RecordFormat::Text);
        let summary = extract(&[dir.path()], &mut sink, &ExtractOptions { dedup: false }).unwrap();

        assert_eq!(summary.files, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.skipped_files, 0);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "Function: add\nStart Line: 1\nEnd Line: 3\n\n");
    }

    #[test]
    fn test_extract_dedup_collapses_header_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        // The same inline definition visited through two files
        let body = "static inline int twice(int x) {\n    return 2 * x;\n}\n";
        fs::write(dir.path().join("one.c"), body).unwrap();
        fs::write(dir.path().join("two.c"), body).unwrap();

        let mut plain = WriterSink::new(Vec::new(), RecordFormat::Text);
        let summary = extract(&[dir.path()], &mut plain, &ExtractOptions { dedup: false }).unwrap();
        assert_eq!(summary.records, 2);

        let mut deduped = WriterSink::new(Vec::new(), RecordFormat::Text);
        let summary = extract(&[dir.path()], &mut deduped, &ExtractOptions { dedup: true }).unwrap();
        assert_eq!(summary.records, 1);
        let output = String::from_utf8(deduped.into_inner()).unwrap();
        assert_eq!(output.matches("Function: twice").count(), 1);
    }
}
