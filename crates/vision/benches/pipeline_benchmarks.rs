use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageFormat, Rgb, RgbImage};

use leafscan_core::{DeploymentProfile, ProbabilityVector, ResolveOptions, resolve};
use leafscan_vision::{FixedClassifier, Predictor, load_image};

fn leaf_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, 120, (y % 256) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

fn bench_load_image(c: &mut Criterion) {
    let bytes = leaf_jpeg(1024, 768);
    c.bench_function("load_image_1024x768_to_224", |b| {
        b.iter(|| load_image(black_box(&bytes), 224).unwrap())
    });
}

fn bench_resolve(c: &mut Criterion) {
    let profile = DeploymentProfile::builtin("plant-village-16").unwrap();
    let raw: Vec<f32> = (0..16).map(|i| (i as f32 + 1.0) / 136.0).collect();
    let probs = ProbabilityVector::for_classes(raw, 16).unwrap();
    let options = ResolveOptions {
        report_runner_up: true,
    };

    c.bench_function("resolve_16_classes_top_two", |b| {
        b.iter(|| resolve(profile.catalog(), black_box(&probs), options).unwrap())
    });
}

fn bench_predict(c: &mut Criterion) {
    let profile = DeploymentProfile::builtin("leaf-disease-3").unwrap();
    let predictor = Predictor::new(
        Arc::new(FixedClassifier::new(224, vec![0.1, 0.05, 0.85])),
        &profile,
    )
    .unwrap();
    let bytes = leaf_jpeg(640, 480);

    c.bench_function("predict_fixed_classifier_640x480", |b| {
        b.iter(|| predictor.predict(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_load_image, bench_resolve, bench_predict);
criterion_main!(benches);
