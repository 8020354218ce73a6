use calamine::{Data, Range};
use calm_processor::config::Settings;
use calm_processor::models::RowBlock;
use calm_processor::pipeline::Pipeline;
use calm_processor::processors::{clean_cell, CellCleaner, ColumnNormalizer};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const FIRST_YEAR: i32 = 1990;

/// Sheet with a header on row 2 and `sites` data rows below it
fn create_test_sheet(sites: u32, years: u32) -> Range<Data> {
    let mut range = Range::new((0, 0), (sites + 1, 4 + years));

    range.set_value((1, 2), Data::String("LAT".to_string()));
    range.set_value((1, 3), Data::String("LONG".to_string()));
    for y in 0..years {
        range.set_value((1, 5 + y), Data::Float((FIRST_YEAR + y as i32) as f64));
    }

    for s in 0..sites {
        let row = 2 + s;
        let name = if s == 0 {
            "Andryushkino".to_string()
        } else {
            format!("Site {}", s)
        };
        range.set_value((row, 0), Data::String(format!("R{}", s)));
        range.set_value((row, 1), Data::String(name));
        range.set_value((row, 2), Data::Float(60.0 + (s % 20) as f64 * 0.5));
        range.set_value((row, 3), Data::Float(-170.0 + (s % 300) as f64));

        for y in 0..years {
            let cell = match (s + y) % 5 {
                0 => Data::String("-".to_string()),
                1 => Data::String(format!("*{}<", 40 + y)),
                2 => Data::String("inactive".to_string()),
                3 => Data::Empty,
                _ => Data::Float(50.0 + y as f64),
            };
            range.set_value((row, 5 + y), cell);
        }
    }

    range
}

fn pipeline(sites: u32) -> Pipeline {
    Pipeline::new(Settings::default())
        .with_blocks(vec![RowBlock::new(3, sites + 2)])
        .with_silent(true)
}

fn benchmark_clean_cell(c: &mut Criterion) {
    let cells = vec![
        Data::Float(42.0),
        Data::String(" 57 ".to_string()),
        Data::String("*22<".to_string()),
        Data::String("-".to_string()),
        Data::String("inactive".to_string()),
        Data::Empty,
    ];

    c.bench_function("clean_cell", |b| {
        b.iter(|| {
            let present = cells
                .iter()
                .filter_map(|cell| clean_cell(black_box(cell)))
                .filter(|cleaned| cleaned.value.is_some())
                .count();
            black_box(present)
        })
    });
}

fn benchmark_cell_cleaner(c: &mut Criterion) {
    let extraction = pipeline(200).extract(&create_test_sheet(200, 33)).unwrap();
    let mut table = extraction.table;
    ColumnNormalizer::new().normalize(&mut table);

    c.bench_function("cell_cleaner", |b| {
        b.iter(|| {
            let (clean, stats) = CellCleaner::new().clean(black_box(&table)).unwrap();
            black_box((clean.site_count(), stats.total()))
        })
    });
}

fn benchmark_transform_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_by_size");

    for &sites in &[50u32, 200, 1000] {
        group.bench_with_input(BenchmarkId::new("sites", sites), &sites, |b, &sites| {
            let pipeline = pipeline(sites);
            let sheet = create_test_sheet(sites, 33);

            b.iter(|| {
                let extraction = pipeline.extract(&sheet).unwrap();
                let (table, report) = pipeline.transform(extraction).unwrap();
                black_box((table.site_count(), report.extracted_rows))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_clean_cell,
    benchmark_cell_cleaner,
    benchmark_transform_by_size
);
criterion_main!(benches);
