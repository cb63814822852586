use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sensor_pixfmt_rs::pixel_pipeline::format::catalog::{
    BAYER_RG_8, MONO_12_P, MONO_12_PACKED, MONO_16, MONO_8, YUV_422_PACKED,
};
use sensor_pixfmt_rs::pixel_pipeline::{DecoderConfig, FormatDescriptor, FramePipeline, RawFrame};

fn generate_mock_frame(format: &FormatDescriptor, width: u32, height: u32) -> Vec<u8> {
    (0..format.expected_byte_size(width, height))
        .map(|i| (i * 7 % 256) as u8)
        .collect()
}

fn benchmark_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_format");
    let (width, height) = (1280, 1024);
    let pipeline = FramePipeline::with_builtin(&DecoderConfig::default()).expect("builtin registry");

    for format in [MONO_8, MONO_16, MONO_12_P, MONO_12_PACKED, YUV_422_PACKED, BAYER_RG_8] {
        let data = generate_mock_frame(&format, width, height);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format.name), &data, |b, data| {
            b.iter(|| {
                let frame = RawFrame::new(black_box(data), width, height, format);
                pipeline.decode_with(&frame, |image| image.pixels()[0]).expect("decode");
            });
        });
    }

    group.finish();
}

fn benchmark_frame_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mono12p_by_size");
    let pipeline = FramePipeline::with_builtin(&DecoderConfig::default()).expect("builtin registry");

    let sizes = vec![
        (320, 240, "320x240"),
        (1280, 1024, "1280x1024"),
        (4096, 3000, "4096x3000"),
    ];

    for (width, height, label) in sizes {
        let data = generate_mock_frame(&MONO_12_P, width, height);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            b.iter(|| {
                let frame = RawFrame::new(black_box(data), width, height, MONO_12_P);
                pipeline.decode_with(&frame, |image| image.pixels()[0]).expect("decode");
            });
        });
    }

    group.finish();
}

fn benchmark_owned_vs_borrowed(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_ownership");
    let (width, height) = (1280, 1024);
    let data = generate_mock_frame(&MONO_8, width, height);
    let pipeline = FramePipeline::with_builtin(&DecoderConfig::default()).expect("builtin registry");

    group.bench_function("decode_with", |b| {
        b.iter(|| {
            let frame = RawFrame::new(black_box(&data), width, height, MONO_8);
            pipeline.decode_with(&frame, |image| image.pixels()[0]).expect("decode");
        });
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            let frame = RawFrame::new(black_box(&data), width, height, MONO_8);
            pipeline.decode(&frame).expect("decode");
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_formats,
    benchmark_frame_sizes,
    benchmark_owned_vs_borrowed
);
criterion_main!(benches);
