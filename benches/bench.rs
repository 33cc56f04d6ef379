//! Criterion benchmarks for the handoff classifier.
//!
//! Covers the analysis pipeline, single-message classification and batch
//! classification (sequential and parallel).

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use handoff::analysis::analyzer::{Analyzer, HandoffAnalyzer};
use handoff::classifier::{HandoffClassifier, HandoffPolicy};
use rayon::prelude::*;

/// Generate chat messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    let words = [
        "my", "order", "is", "late", "please", "help", "where", "invoice", "the", "app",
        "keeps", "crashing", "can", "you", "check", "account", "billing", "password", "reset",
        "shipping", "subscription", "plan", "upgrade", "thanks", "not", "working", "again",
    ];

    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let length = 3 + (i % 15); // Variable length messages
        let mut message_words = Vec::with_capacity(length);

        for j in 0..length {
            let word_idx = (i * 7 + j * 13) % words.len(); // Pseudo-random distribution
            message_words.push(words[word_idx]);
        }

        messages.push(message_words.join(" "));
    }

    messages
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let analyzer = HandoffAnalyzer::new().unwrap();
    let messages = generate_messages(1000);

    group.bench_function("analyze_single_message", |b| {
        b.iter(|| {
            let tokens: Vec<_> = analyzer
                .analyze(black_box(&messages[0]))
                .unwrap()
                .collect();
            black_box(tokens)
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("token_set_batch", |b| {
        b.iter(|| {
            for message in messages.iter().take(100) {
                let _ = black_box(analyzer.token_set(black_box(message)));
            }
        })
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let classifier = HandoffClassifier::new().unwrap();
    let messages = generate_messages(1000);
    let history = "User: where is my order\nBot: Let me check that for you.\n\
                   User: it has been two weeks\nBot: I understand.";

    group.bench_function("benign_message", |b| {
        b.iter(|| black_box(classifier.should_handoff(black_box("What are your business hours?"), history)))
    });

    group.bench_function("indicator_message", |b| {
        b.iter(|| black_box(classifier.should_handoff(black_box("I need a human"), history)))
    });

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("sequential_batch", |b| {
        b.iter(|| {
            let handoffs = messages
                .iter()
                .filter(|m| classifier.should_handoff(m, history))
                .count();
            black_box(handoffs)
        })
    });

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("parallel_batch", |b| {
        b.iter(|| {
            let handoffs = messages
                .par_iter()
                .filter(|m| classifier.should_handoff(m, history))
                .count();
            black_box(handoffs)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_classification);
criterion_main!(benches);
