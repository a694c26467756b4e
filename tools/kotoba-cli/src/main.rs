//! Kotoba Tagger CLI
//!
//! Trains an HMM part-of-speech model from line-aligned corpus files,
//! evaluates it against a test corpus, and tags sentences either one-shot
//! or from an interactive prompt.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kotoba_core::{
    estimate, evaluate, MismatchPolicy, Model, ViterbiDecoder, DEFAULT_UNOBSERVED_PENALTY,
};
use kotoba_corpus::load_pair_files;

/// CLI arguments
#[derive(Parser)]
#[command(name = "kotoba")]
#[command(about = "HMM part-of-speech tagger: train, evaluate, tag")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from line-aligned sentence and label files
    Train {
        /// Sentences file (one whitespace-separated sentence per line)
        sentences: PathBuf,
        /// Labels file (line-aligned with the sentences file)
        labels: PathBuf,
        /// Where to write the trained model (JSON)
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Evaluate a trained model against a test corpus
    Eval {
        /// Trained model file (JSON)
        #[arg(short, long)]
        model: PathBuf,
        /// Test sentences file
        sentences: PathBuf,
        /// Test labels file
        labels: PathBuf,
        /// Log-score substituted for unseen (label, token) emissions
        #[arg(long, default_value_t = DEFAULT_UNOBSERVED_PENALTY)]
        penalty: f64,
        /// How to score sentences that cannot be compared token-for-token
        #[arg(long, value_enum, default_value = "exclude")]
        mismatch: MismatchArg,
    },
    /// Tag a sentence, or start an interactive prompt if none is given
    Tag {
        /// Trained model file (JSON)
        #[arg(short, long)]
        model: PathBuf,
        /// Log-score substituted for unseen (label, token) emissions
        #[arg(long, default_value_t = DEFAULT_UNOBSERVED_PENALTY)]
        penalty: f64,
        /// Sentence to tag; omit to read sentences from stdin
        sentence: Option<String>,
    },
}

/// Scoring policy for unscorable test sentences.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum MismatchArg {
    /// Exclude the sentence from the accuracy calculation
    #[default]
    Exclude,
    /// Count every token of the sentence as wrong
    CountWrong,
}

impl From<MismatchArg> for MismatchPolicy {
    fn from(arg: MismatchArg) -> Self {
        match arg {
            MismatchArg::Exclude => MismatchPolicy::Exclude,
            MismatchArg::CountWrong => MismatchPolicy::CountWrong,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Train {
            sentences,
            labels,
            out,
        } => train(&sentences, &labels, &out),
        Commands::Eval {
            model,
            sentences,
            labels,
            penalty,
            mismatch,
        } => eval(&model, &sentences, &labels, penalty, mismatch.into()),
        Commands::Tag {
            model,
            penalty,
            sentence,
        } => tag(&model, penalty, sentence.as_deref()),
    }
}

fn train(sentences: &PathBuf, labels: &PathBuf, out: &PathBuf) -> Result<()> {
    let corpus = load_pair_files(sentences, labels).context("failed to load training corpus")?;
    info!(sentences = corpus.len(), "training");

    let model = estimate(&corpus).context("training failed")?;

    let file = File::create(out)
        .with_context(|| format!("failed to create model file {}", out.display()))?;
    serde_json::to_writer(BufWriter::new(file), &model).context("failed to write model")?;

    println!(
        "Trained on {} sentences, {} labels. Model written to {}",
        corpus.len(),
        model.label_count(),
        out.display()
    );
    Ok(())
}

fn eval(
    model_path: &PathBuf,
    sentences: &PathBuf,
    labels: &PathBuf,
    penalty: f64,
    policy: MismatchPolicy,
) -> Result<()> {
    let model = load_model(model_path)?;
    let corpus = load_pair_files(sentences, labels).context("failed to load test corpus")?;
    let decoder = ViterbiDecoder::with_penalty(penalty);

    let report = evaluate(&model, &decoder, &corpus, policy).context("evaluation failed")?;

    println!(
        "Out of {} tags, the model got {} right and {} wrong.",
        report.total,
        report.correct,
        report.total - report.correct
    );
    println!("The accuracy is: {}", report.accuracy);
    Ok(())
}

fn tag(model_path: &PathBuf, penalty: f64, sentence: Option<&str>) -> Result<()> {
    let model = load_model(model_path)?;
    let decoder = ViterbiDecoder::with_penalty(penalty);

    if let Some(sentence) = sentence {
        let tags = decoder.decode_line(&model, sentence)?;
        println!("{}", tags.join(" "));
        return Ok(());
    }

    // Interactive prompt, `q` to quit.
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Enter a sentence for a prediction or q to quit > ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "q" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match decoder.decode_line(&model, line) {
            Ok(tags) => println!("{}", tags.join(" ")),
            Err(err) => eprintln!("could not tag sentence: {err}"),
        }
    }
    Ok(())
}

fn load_model(path: &PathBuf) -> Result<Model> {
    let file = File::open(path)
        .with_context(|| format!("failed to open model file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).context("failed to parse model file")
}
