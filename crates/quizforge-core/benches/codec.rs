use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::grading::calculate;
use quizforge_core::{QuestionKind, QuestionPayload};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let cases = [
        (QuestionKind::MathEquation, "12 x 12 = ?|144".to_string()),
        (
            QuestionKind::FillInBlank,
            r#"The ___ rises in the ___.|["sun","moon","east","west"]|["sun","east"]|2|"#
                .to_string(),
        ),
        (
            QuestionKind::SelectChoice,
            r#"Which is prime?|["4","6","7","9"]|["7"]|false||"#.to_string(),
        ),
        (
            QuestionKind::WordProblems,
            r#"A bus travels 120 km in 2 hours.|[{"id":"1","question":"Speed?","answer":"60","unit":"km/h"}]"#
                .to_string(),
        ),
        (
            QuestionKind::NumberSequence,
            (0..200)
                .map(|i| (i * 3).to_string())
                .collect::<Vec<_>>()
                .join(","),
        ),
    ];

    for (kind, raw) in &cases {
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| QuestionPayload::decode(*kind, black_box(raw)))
        });
    }

    group.finish();
}

fn bench_encode_and_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_validate");

    let raw = r#"The ___ rises in the ___.|["sun","moon","east","west"]|["sun","east"]|2|"#;
    let payload = QuestionPayload::decode(QuestionKind::FillInBlank, raw);

    group.bench_function("encode", |b| b.iter(|| black_box(&payload).encode()));
    group.bench_function("issues", |b| b.iter(|| black_box(&payload).issues()));

    group.finish();
}

fn bench_grading(c: &mut Criterion) {
    c.bench_function("calculate", |b| {
        b.iter(|| {
            calculate(
                black_box(Some(78.5)),
                black_box(None),
                black_box(Some(64.0)),
                black_box(Some(91.25)),
            )
        })
    });
}

criterion_group!(benches, bench_decode, bench_encode_and_validate, bench_grading);
criterion_main!(benches);
