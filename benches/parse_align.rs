use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use masslynx_xlsx::dataset::DatasetBuilder;
use masslynx_xlsx::parser::parse_records;
use masslynx_xlsx::record::SourceInfo;
use masslynx_xlsx::workbook::WorkbookAssembler;
use std::fmt::Write;

/// Generate a synthetic export: one MS function and one PDA function with `channels` wavelengths
fn generate_export(scans: usize, channels: usize, time_offset: f64) -> String {
    let mut text = String::from("Sample Description: benchmark\n\nFUNCTION 1\n");
    for scan in 0..scans {
        let rt = scan as f64 * 0.0167 + time_offset;
        writeln!(text, "Scan {}\nRetention Time {:.4}", scan + 1, rt).unwrap();
        for peak in 0..5 {
            writeln!(text, "{:.4} {}", 150.0 + peak as f64 * 12.5, 1000 + scan * 3 + peak).unwrap();
        }
    }

    text.push_str("FUNCTION 2\n");
    for scan in 0..scans {
        let rt = scan as f64 * 0.0167 + time_offset;
        writeln!(text, "Scan {}\nRetention Time {:.4}", scan + 1, rt).unwrap();
        for channel in 0..channels {
            writeln!(text, "{}.0000 {}", 200 + channel * 2, (scan * channel) % 977).unwrap();
        }
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for scans in [1_000, 10_000] {
        let text = generate_export(scans, 16, 0.0);
        let source = SourceInfo::named("bench.txt");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(scans), &text, |b, text| {
            b.iter(|| parse_records(text, &source))
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    group.sample_size(20);

    for files in [2, 8] {
        let mut builder = DatasetBuilder::new();
        for i in 0..files {
            let text = generate_export(2_000, 16, i as f64 * 0.00037);
            let source = SourceInfo::named(&format!("run{:02}.txt", i));
            builder.add_file(parse_records(&text, &source));
        }
        let dataset = builder.build();
        let assembler = WorkbookAssembler::default();

        group.throughput(Throughput::Elements(dataset.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(files), &dataset, |b, dataset| {
            b.iter(|| assembler.assemble(dataset))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_assemble);
criterion_main!(benches);
