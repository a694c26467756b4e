//! # Kotoba Core
//!
//! Part-of-speech tagging with a hidden Markov model: maximum-likelihood
//! estimation of emission/transition log-probabilities from a labeled
//! corpus, Viterbi decoding of unseen sentences, and token-level accuracy
//! evaluation.
//!
//! The core does no I/O; corpus loading lives in `kotoba-corpus` and the
//! console surface in the `kotoba` binary.
//!
//! ## Quick Start
//!
//! ```rust
//! use kotoba_core::{estimate, SentencePair, ViterbiDecoder};
//!
//! let corpus = vec![SentencePair::new(
//!     ["the", "dog", "runs"],
//!     ["DET", "NOUN", "VERB"],
//! )];
//! let model = estimate(&corpus).unwrap();
//!
//! let decoder = ViterbiDecoder::new();
//! let labels = decoder.decode_line(&model, "the dog runs").unwrap();
//! assert_eq!(labels, vec!["DET", "NOUN", "VERB"]);
//! ```
pub mod error;
pub mod eval;
pub mod model;
pub mod train;
pub mod types;
pub mod viterbi;

// Re-export primary API
pub use error::{KotobaError, Result};
pub use eval::{evaluate, EvalReport, MismatchPolicy};
pub use model::{LogProbRow, Model, START_LABEL};
pub use train::estimate;
pub use types::SentencePair;
pub use viterbi::{ViterbiDecoder, DEFAULT_UNOBSERVED_PENALTY};
