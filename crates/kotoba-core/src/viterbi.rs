//! # Viterbi Decoding
//!
//! Finds the most likely label sequence for a token sequence under a trained
//! [`Model`] using dynamic programming.
//!
//! ```text
//! Initialization: one reachable state, the start pseudo-label, score 0
//!
//! Recursion: score[i][next] = max over prev of
//!     score[i-1][prev] + transition(prev, next) + emission(next, token[i])
//!
//! Backtracking: follow the winning predecessors from the best final label
//! ```
//!
//! All arithmetic happens in log-space, so scores add instead of multiply.
//! Only labels that have an outgoing transition row are expanded; a label
//! that never preceded anything in training is a dead end, which prunes the
//! trellis rather than erroring. If pruning leaves *no* reachable label at
//! some position, decoding fails with [`KotobaError::NoPath`].
//!
//! ## Tie-breaking
//!
//! Candidates are scanned in lexicographic label order (the model's rows are
//! `BTreeMap`s) and a stored score is only replaced by a strictly greater
//! one. Ties therefore always resolve to the smallest label, independent of
//! any hash-map iteration order, and decoding is a pure, deterministic
//! function of the model and the tokens.

use std::collections::BTreeMap;

use crate::error::{KotobaError, Result};
use crate::model::{Model, START_LABEL};

/// Log-score substituted for P(token | label) when the token was never seen
/// under that label during training.
///
/// Large and negative so that unseen emissions are strongly penalized but
/// never produce infinite or NaN path scores.
pub const DEFAULT_UNOBSERVED_PENALTY: f64 = -100.0;

/// Viterbi decoder over an unbounded label vocabulary.
///
/// Holds only configuration; all per-call state lives on the stack of
/// [`decode`](Self::decode), so one decoder can serve concurrent calls
/// against a shared model.
#[derive(Debug, Clone, Copy)]
pub struct ViterbiDecoder {
    unobserved_penalty: f64,
}

impl Default for ViterbiDecoder {
    fn default() -> Self {
        Self {
            unobserved_penalty: DEFAULT_UNOBSERVED_PENALTY,
        }
    }
}

impl ViterbiDecoder {
    /// Decoder with the default unobserved-token penalty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with a custom unobserved-token penalty.
    pub fn with_penalty(penalty: f64) -> Self {
        Self {
            unobserved_penalty: penalty,
        }
    }

    /// The configured unobserved-token penalty.
    pub fn unobserved_penalty(&self) -> f64 {
        self.unobserved_penalty
    }

    /// Decodes the most likely label sequence for `tokens`.
    ///
    /// On success the output has exactly one label per input token. An empty
    /// token slice decodes to an empty label sequence.
    ///
    /// # Errors
    ///
    /// [`KotobaError::NoPath`] when every reachable label at some position
    /// has no outgoing transitions, leaving no valid path through the
    /// trellis.
    pub fn decode(&self, model: &Model, tokens: &[String]) -> Result<Vec<String>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        // backtrace[i] maps a label reachable at position i to the
        // predecessor that produced its best score.
        let mut backtrace: Vec<BTreeMap<String, String>> = Vec::with_capacity(tokens.len());

        // Virtual position -1: only the start pseudo-label, score 0.
        let mut scores: BTreeMap<String, f64> = BTreeMap::new();
        scores.insert(START_LABEL.to_string(), 0.0);

        for (position, token) in tokens.iter().enumerate() {
            let mut next_scores: BTreeMap<String, f64> = BTreeMap::new();
            let mut pointers: BTreeMap<String, String> = BTreeMap::new();

            for (prev, prev_score) in &scores {
                // A label with no outgoing row is a dead end; prune it.
                let Some(row) = model.transitions_from(prev) else {
                    continue;
                };

                for (next, trans_score) in row {
                    let emit_score = model
                        .emission(next, token)
                        .unwrap_or(self.unobserved_penalty);
                    let candidate = prev_score + trans_score + emit_score;

                    // Strictly-greater replacement over lexicographically
                    // ordered predecessors: ties keep the smallest one.
                    let improved = next_scores
                        .get(next)
                        .map_or(true, |best| candidate > *best);
                    if improved {
                        next_scores.insert(next.clone(), candidate);
                        pointers.insert(next.clone(), prev.clone());
                    }
                }
            }

            if next_scores.is_empty() {
                return Err(KotobaError::NoPath { position });
            }

            backtrace.push(pointers);
            scores = next_scores;
        }

        let last = tokens.len() - 1;
        let Some((terminal, _)) = column_argmax(&scores) else {
            return Err(KotobaError::NoPath { position: last });
        };

        // Walk the backpointers from the terminal label to the front. The
        // start pseudo-label sits at virtual position -1 and is not emitted.
        let mut path = vec![String::new(); tokens.len()];
        let mut current = terminal.to_string();
        for (position, pointers) in backtrace.iter().enumerate().rev() {
            path[position] = current.clone();
            let Some(prev) = pointers.get(&current) else {
                return Err(KotobaError::NoPath { position });
            };
            current = prev.clone();
        }

        Ok(path)
    }

    /// Splits `line` on whitespace, lower-cases it, and decodes it.
    ///
    /// Convenience for console-style input where the caller has a raw
    /// sentence rather than pre-tokenized text.
    pub fn decode_line(&self, model: &Model, line: &str) -> Result<Vec<String>> {
        let lowered = line.to_lowercase();
        let tokens: Vec<String> = lowered.split_whitespace().map(String::from).collect();
        self.decode(model, &tokens)
    }
}

/// Highest-scoring label in a trellis column.
///
/// Iteration is lexicographic and replacement requires a strictly greater
/// score, so ties resolve to the smallest label.
fn column_argmax(scores: &BTreeMap<String, f64>) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (label, &score) in scores {
        match best {
            Some((_, high)) if score <= high => {}
            _ => best = Some((label, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::estimate;
    use crate::types::SentencePair;

    fn trivial_model() -> Model {
        let corpus = vec![SentencePair::new(
            ["the", "dog", "runs"],
            ["DET", "NOUN", "VERB"],
        )];
        estimate(&corpus).unwrap()
    }

    fn to_tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn exact_recall_on_trivial_corpus() {
        let model = trivial_model();
        let decoder = ViterbiDecoder::new();

        let labels = decoder
            .decode(&model, &to_tokens(&["the", "dog", "runs"]))
            .unwrap();
        assert_eq!(labels, vec!["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn unseen_token_still_decodes() {
        let model = trivial_model();
        let decoder = ViterbiDecoder::new();

        // "cat" was never observed; the penalty stands in for its emission
        // and the transition structure still forces the only path.
        let labels = decoder
            .decode(&model, &to_tokens(&["the", "cat", "runs"]))
            .unwrap();
        assert_eq!(labels, vec!["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn output_length_matches_input_length() {
        let corpus = vec![
            SentencePair::new(["the", "dog", "runs"], ["DET", "NOUN", "VERB"]),
            SentencePair::new(
                ["a", "cat", "sleeps", "here", "now"],
                ["DET", "NOUN", "VERB", "ADV", "ADV"],
            ),
            SentencePair::new(["dogs", "run"], ["NOUN", "VERB"]),
        ];
        let model = estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::new();

        for sentence in [
            vec!["the", "dog", "sleeps"],
            vec!["a", "dog", "runs", "here"],
            vec!["unknown", "words", "everywhere", "all", "over"],
        ] {
            let tokens = to_tokens(&sentence);
            let labels = decoder.decode(&model, &tokens).unwrap();
            assert_eq!(labels.len(), tokens.len());
        }
    }

    #[test]
    fn decoding_is_deterministic() {
        let corpus = vec![
            SentencePair::new(["time", "flies"], ["NOUN", "VERB"]),
            SentencePair::new(["fruit", "flies"], ["NOUN", "NOUN"]),
        ];
        let model = estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::new();

        let tokens = to_tokens(&["time", "flies"]);
        let first = decoder.decode(&model, &tokens).unwrap();
        let second = decoder.decode(&model, &tokens).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ties_resolve_to_smallest_label() {
        // Two labels with perfectly symmetric statistics: start probability
        // 1/2 each, identical emissions. "A" must win on ordering alone.
        let corpus = vec![
            SentencePair::new(["x"], ["A"]),
            SentencePair::new(["x"], ["B"]),
        ];
        let model = estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::new();

        let labels = decoder.decode(&model, &to_tokens(&["x"])).unwrap();
        assert_eq!(labels, vec!["A"]);
    }

    #[test]
    fn single_token_sentence() {
        let model = trivial_model();
        let decoder = ViterbiDecoder::new();

        let labels = decoder.decode(&model, &to_tokens(&["the"])).unwrap();
        assert_eq!(labels, vec!["DET"]);
    }

    #[test]
    fn empty_sentence_decodes_to_empty() {
        let model = trivial_model();
        let decoder = ViterbiDecoder::new();

        let labels = decoder.decode(&model, &[]).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn dead_end_trellis_is_a_no_path_error() {
        // "X" only ever ends the (single-token) sentence, so it has no
        // outgoing transitions and the second position is unreachable.
        let corpus = vec![SentencePair::new(["a"], ["X"])];
        let model = estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::new();

        let err = decoder
            .decode(&model, &to_tokens(&["a", "b"]))
            .unwrap_err();
        assert!(matches!(err, KotobaError::NoPath { position: 1 }));
    }

    #[test]
    fn decode_line_lowercases_and_splits() {
        let model = trivial_model();
        let decoder = ViterbiDecoder::new();

        let labels = decoder.decode_line(&model, "The DOG runs").unwrap();
        assert_eq!(labels, vec!["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn transitions_outweigh_a_single_penalty() {
        // An ambiguous token ("flies") seen under two labels; the path with
        // the better transition score must win even when the competing path
        // has identical emissions.
        let corpus = vec![
            SentencePair::new(["fruit", "flies", "fly"], ["NOUN", "NOUN", "VERB"]),
            SentencePair::new(["time", "flies", "fly"], ["NOUN", "VERB", "VERB"]),
            SentencePair::new(["time", "flies", "fly"], ["NOUN", "VERB", "VERB"]),
        ];
        let model = estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::new();

        let labels = decoder
            .decode(&model, &to_tokens(&["time", "flies", "fly"]))
            .unwrap();
        assert_eq!(labels, vec!["NOUN", "VERB", "VERB"]);
    }
}
