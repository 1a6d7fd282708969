//! Criterion benchmarks for the Polarity sentiment classifier.
//!
//! Covers the hot paths of training and scoring:
//! - Text analysis and tokenization
//! - Hashing featurization
//! - Logistic regression training and scoring

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use polarity::analysis::analyzer::{Analyzer, AnalyzerKind};
use polarity::features::assembler::FeatureAssembler;
use polarity::features::hashing::{HashingConfig, HashingVectorizer};
use polarity::model::logistic::LogisticRegression;
use std::hint::black_box;

/// Generate synthetic review texts for benchmarking.
fn generate_reviews(count: usize) -> Vec<String> {
    let words = [
        "book", "story", "author", "character", "plot", "chapter", "great", "terrible",
        "wonderful", "boring", "recommend", "disappointing", "enjoyed", "wasted", "page",
        "writing", "read", "series", "ending", "beginning",
    ];

    let mut reviews = Vec::with_capacity(count);
    for i in 0..count {
        let length = 20 + (i % 40);
        let mut review_words = Vec::with_capacity(length);
        for j in 0..length {
            review_words.push(words[(i * 7 + j * 3) % words.len()]);
        }
        reviews.push(review_words.join(" "));
    }
    reviews
}

fn bench_analysis(c: &mut Criterion) {
    let reviews = generate_reviews(100);
    let mut group = c.benchmark_group("analysis");
    group.throughput(Throughput::Elements(reviews.len() as u64));

    for kind in [AnalyzerKind::Standard, AnalyzerKind::Whitespace] {
        let analyzer = kind.build();
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                for review in &reviews {
                    let tokens: Vec<_> = analyzer.analyze(black_box(review)).unwrap().collect();
                    black_box(tokens);
                }
            })
        });
    }
    group.finish();
}

fn bench_featurization(c: &mut Criterion) {
    let reviews = generate_reviews(100);
    let analyzer = AnalyzerKind::Standard.build();
    let config = HashingConfig::default();
    let vectorizer = HashingVectorizer::with_config(analyzer.clone(), config.clone());
    let assembler = FeatureAssembler::new(analyzer, config);

    let mut group = c.benchmark_group("featurization");
    group.throughput(Throughput::Elements(reviews.len() as u64));

    group.bench_function("hashing_transform", |b| {
        b.iter(|| {
            for review in &reviews {
                black_box(vectorizer.transform(black_box(review)).unwrap());
            }
        })
    });

    group.bench_function("assemble", |b| {
        b.iter(|| {
            for review in &reviews {
                black_box(assembler.assemble(black_box(review)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let reviews = generate_reviews(200);
    let assembler = FeatureAssembler::new(
        AnalyzerKind::Standard.build(),
        HashingConfig { num_features: 1 << 12 },
    );
    let features: Vec<_> = reviews
        .iter()
        .map(|r| assembler.assemble(r).unwrap())
        .collect();
    let labels: Vec<bool> = (0..reviews.len()).map(|i| i % 2 == 0).collect();

    c.bench_function("logistic_fit_50_iter", |b| {
        b.iter(|| {
            let mut model = LogisticRegression::new().with_max_iter(50);
            black_box(model.fit(black_box(&features), black_box(&labels)).unwrap());
        })
    });

    let mut trained = LogisticRegression::new().with_max_iter(50);
    trained.fit(&features, &labels).unwrap();

    c.bench_function("logistic_predict_batch", |b| {
        b.iter(|| {
            black_box(trained.predict_proba_batch(black_box(&features)).unwrap());
        })
    });
}

criterion_group!(benches, bench_analysis, bench_featurization, bench_training);
criterion_main!(benches);
