//! # Model evaluation
//!
//! Decodes a labeled test corpus and reports token-level accuracy.

use serde::Serialize;
use tracing::debug;

use crate::error::{KotobaError, Result};
use crate::model::Model;
use crate::types::SentencePair;
use crate::viterbi::ViterbiDecoder;

/// What to do with a test sentence that cannot be scored token-for-token:
/// the decoded sequence's length differs from the gold labeling, or decoding
/// failed with [`KotobaError::NoPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Drop the sentence from both the numerator and the denominator.
    ///
    /// This is lenient: it understates the true error rate by pretending the
    /// unscorable sentence was never asked about.
    #[default]
    Exclude,
    /// Count every token of the sentence as wrong.
    CountWrong,
}

/// Aggregate accuracy over a test corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalReport {
    /// Tokens considered for scoring.
    pub total: usize,
    /// Tokens whose predicted label matched the gold label.
    pub correct: usize,
    /// `correct / total`.
    pub accuracy: f64,
}

/// Decodes every sentence of `corpus` and scores the predictions against
/// the gold labels, token by token.
///
/// # Errors
///
/// - [`KotobaError::NoEligibleTokens`] when no token was eligible for
///   scoring (so accuracy would be 0/0).
/// - [`KotobaError::NoPath`] is handled per sentence according to `policy`
///   and never aborts the evaluation.
pub fn evaluate(
    model: &Model,
    decoder: &ViterbiDecoder,
    corpus: &[SentencePair],
    policy: MismatchPolicy,
) -> Result<EvalReport> {
    let mut total = 0usize;
    let mut correct = 0usize;

    for (index, pair) in corpus.iter().enumerate() {
        let predicted = match decoder.decode(model, &pair.tokens) {
            Ok(predicted) if predicted.len() == pair.labels.len() => predicted,
            Ok(predicted) => {
                debug!(
                    sentence = index,
                    predicted = predicted.len(),
                    gold = pair.labels.len(),
                    "length mismatch"
                );
                score_unscorable(pair, policy, &mut total);
                continue;
            }
            Err(KotobaError::NoPath { position }) => {
                debug!(sentence = index, position, "no path through trellis");
                score_unscorable(pair, policy, &mut total);
                continue;
            }
            Err(err) => return Err(err),
        };

        total += pair.labels.len();
        correct += predicted
            .iter()
            .zip(&pair.labels)
            .filter(|(p, g)| p == g)
            .count();
    }

    if total == 0 {
        return Err(KotobaError::NoEligibleTokens);
    }

    Ok(EvalReport {
        total,
        correct,
        accuracy: correct as f64 / total as f64,
    })
}

fn score_unscorable(pair: &SentencePair, policy: MismatchPolicy, total: &mut usize) {
    if policy == MismatchPolicy::CountWrong {
        *total += pair.labels.len();
    }
}
