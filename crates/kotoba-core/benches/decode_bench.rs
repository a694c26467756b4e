use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kotoba_core::{estimate, SentencePair, ViterbiDecoder};

fn training_corpus() -> Vec<SentencePair> {
    vec![
        SentencePair::new(
            ["the", "dog", "chases", "the", "cat"],
            ["DET", "NOUN", "VERB", "DET", "NOUN"],
        ),
        SentencePair::new(
            ["a", "cat", "sleeps", "quietly", "here"],
            ["DET", "NOUN", "VERB", "ADV", "ADV"],
        ),
        SentencePair::new(
            ["time", "flies", "like", "an", "arrow"],
            ["NOUN", "VERB", "ADP", "DET", "NOUN"],
        ),
        SentencePair::new(
            ["fruit", "flies", "like", "a", "banana"],
            ["NOUN", "NOUN", "VERB", "DET", "NOUN"],
        ),
        SentencePair::new(
            ["she", "runs", "and", "he", "walks"],
            ["PRON", "VERB", "CONJ", "PRON", "VERB"],
        ),
    ]
}

fn bench_viterbi_decode(c: &mut Criterion) {
    let model = estimate(&training_corpus()).unwrap();
    let decoder = ViterbiDecoder::new();

    let seen: Vec<String> = ["the", "dog", "sleeps", "here"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let unseen: Vec<String> = ["the", "zebra", "gallops", "here"]
        .iter()
        .map(|w| w.to_string())
        .collect();

    c.bench_function("viterbi_decode_seen", |b| {
        b.iter(|| decoder.decode(&model, black_box(&seen)).unwrap());
    });

    c.bench_function("viterbi_decode_unseen", |b| {
        b.iter(|| decoder.decode(&model, black_box(&unseen)).unwrap());
    });
}

criterion_group!(benches, bench_viterbi_decode);
criterion_main!(benches);
