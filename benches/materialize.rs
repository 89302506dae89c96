use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rowbind::{MemoryRows, RecordList, Value, bindable, collect_all, load_rows};

bindable! {
    #[derive(Debug, Default)]
    pub struct Order {
        pub id: i64,
        #[db = "ordered_at"]
        pub placed: Option<chrono::DateTime<chrono::FixedOffset>>,
        pub status: String,
        pub qty: u32,
    }
}

fn generate_orders(rows: usize) -> MemoryRows {
    let mut cursor = MemoryRows::new(["id", "ordered_at", "STATUS", "qty"]);
    for i in 0..rows {
        let status = match i % 3 {
            0 => "shipped",
            1 => "pending",
            _ => "processing",
        };
        let day = (i % 28) + 1;
        cursor = cursor.with_row([
            Value::Int(i as i64),
            Value::Bytes(format!("2024-01-{day:02}T10:00:00Z").into_bytes()),
            Value::from(status),
            Value::Int((i % 7) as i64),
        ]);
    }
    cursor
}

fn bench_load_and_materialize(c: &mut Criterion) {
    let source = generate_orders(10_000);

    c.bench_function("load_rows_10k", |b| {
        b.iter_batched(
            || source.clone(),
            |mut rows| {
                let mut list = RecordList::new();
                load_rows(&mut list, &mut rows).expect("load rows");
                list
            },
            BatchSize::LargeInput,
        )
    });

    let mut loaded = RecordList::new();
    load_rows(&mut loaded, &mut source.clone()).expect("load rows");
    c.bench_function("materialize_10k", |b| {
        b.iter_batched(
            || loaded.clone(),
            |mut list| collect_all::<Order>(&mut list).expect("materialize"),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_load_and_materialize);
criterion_main!(benches);
