//! # Kotoba Corpus
//!
//! Loads the tagger's canonical on-disk corpus format: two line-aligned
//! plain-text files, where line *i* of the sentences file holds
//! whitespace-separated tokens and line *i* of the labels file holds the
//! matching labels.
//!
//! Tokens are lower-cased here, at the boundary; the core's contract is
//! that it receives already-folded tokens. Label case is preserved.
//!
//! File handles are scoped to each call and released on every exit path,
//! success or error; nothing in this crate holds a reader across calls.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use kotoba_core::{KotobaError, Result, SentencePair};

/// Loads a corpus from a sentences file and a labels file.
///
/// Blank line pairs (both sides empty) are skipped. Per-line token/label
/// alignment is *not* checked here; the estimator and evaluator own that
/// check and report the offending sentence index.
///
/// # Errors
///
/// - [`KotobaError::Io`] when either file cannot be opened or read.
/// - [`KotobaError::LineCountMismatch`] when the files differ in line
///   count; a truncated corpus is never silently accepted.
pub fn load_pair_files(
    sentences: impl AsRef<Path>,
    labels: impl AsRef<Path>,
) -> Result<Vec<SentencePair>> {
    let sentence_lines = read_lines(sentences.as_ref())?;
    let label_lines = read_lines(labels.as_ref())?;

    if sentence_lines.len() != label_lines.len() {
        return Err(KotobaError::LineCountMismatch {
            sentences: sentence_lines.len(),
            labels: label_lines.len(),
        });
    }

    let mut pairs = Vec::with_capacity(sentence_lines.len());
    for (line_no, (sentence, labeling)) in sentence_lines.iter().zip(&label_lines).enumerate() {
        if sentence.trim().is_empty() && labeling.trim().is_empty() {
            debug!(line = line_no + 1, "skipping blank line pair");
            continue;
        }
        if sentence.trim().is_empty() != labeling.trim().is_empty() {
            // Kept so the estimator reports it as a length mismatch.
            warn!(line = line_no + 1, "blank line paired with a non-blank one");
        }

        let tokens: Vec<String> = sentence
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let labels: Vec<String> = labeling.split_whitespace().map(String::from).collect();
        pairs.push(SentencePair { tokens, labels });
    }

    debug!(
        pairs = pairs.len(),
        path = %sentences.as_ref().display(),
        "corpus loaded"
    );

    Ok(pairs)
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}
