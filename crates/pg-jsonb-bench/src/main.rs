//! Benchmark for jsonb column encoding using synthetic order records.
//!
//! Builds a deterministic dataset, then times encode and decode in both
//! wire formats for a typed struct and for a loosely-typed map.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use pg_jsonb::{
    ColumnValue, EncodeOptions, JsonbConvertible, decode_jsonb, encode_jsonb_with_options,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "bench-jsonb", about = "jsonb column encode/decode benchmark")]
struct Cli {
    /// Number of records in the dataset.
    #[arg(short, long, env = "BENCH_RECORDS", default_value_t = 100_000)]
    records: usize,

    /// Timed passes over the dataset per measurement.
    #[arg(short, long, env = "BENCH_ITERATIONS", default_value_t = 5)]
    iterations: u32,

    /// Wire format(s) to encode and decode.
    #[arg(short, long, value_enum, env = "BENCH_FORMAT", default_value_t = WireFormat::Both)]
    format: WireFormat,

    /// Print one encoded sample column per format and exit.
    #[arg(long)]
    sample: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WireFormat {
    Binary,
    Text,
    Both,
}

impl WireFormat {
    fn options(self) -> Vec<EncodeOptions> {
        match self {
            WireFormat::Binary => vec![EncodeOptions::binary()],
            WireFormat::Text => vec![EncodeOptions::text()],
            WireFormat::Both => vec![EncodeOptions::binary(), EncodeOptions::text()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LineItem {
    sku: String,
    quantity: u32,
    unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: Uuid,
    customer: String,
    status: String,
    items: Vec<LineItem>,
    tags: Vec<String>,
    attributes: HashMap<String, Value>,
}

impl JsonbConvertible for Order {}

const STATUSES: [&str; 4] = ["pending", "paid", "shipped", "cancelled"];

/// Deterministic record generator.
fn make_order(n: usize) -> Order {
    let items = (0..(n % 4) + 1)
        .map(|i| LineItem {
            sku: format!("SKU-{:05}", (n * 7 + i) % 100_000),
            quantity: ((n + i) % 9) as u32 + 1,
            unit_price: ((n * 13 + i) % 10_000) as f64 / 100.0,
        })
        .collect();

    let mut attributes = HashMap::new();
    attributes.insert("channel".to_string(), Value::from(if n % 2 == 0 { "web" } else { "store" }));
    attributes.insert("priority".to_string(), Value::from(n % 3 == 0));
    if n % 5 == 0 {
        attributes.insert("coupon".to_string(), Value::from(format!("SAVE{}", n % 50)));
    }

    Order {
        id: Uuid::from_u128(0x6f72_6465_7200_0000_0000_0000_0000_0000 | n as u128),
        customer: format!("customer-{}", n % 1_000),
        status: STATUSES[n % STATUSES.len()].to_string(),
        items,
        tags: (0..n % 3).map(|t| format!("tag{}", t)).collect(),
        attributes,
    }
}

fn encode_all(orders: &[Order], options: EncodeOptions) -> Vec<ColumnValue<'static>> {
    orders
        .iter()
        .map(|order| encode_jsonb_with_options(order, options).expect("Failed to encode order"))
        .collect()
}

fn time<R>(iterations: u32, mut f: impl FnMut() -> R) -> (Duration, R) {
    let mut result = f();
    let start = Instant::now();
    for _ in 0..iterations {
        result = f();
    }
    (start.elapsed() / iterations.max(1), result)
}

fn throughput(bytes: usize, elapsed: Duration) -> f64 {
    bytes as f64 / 1_048_576.0 / elapsed.as_secs_f64().max(f64::EPSILON)
}

fn total_len(columns: &[ColumnValue<'_>]) -> usize {
    columns.iter().map(ColumnValue::len).sum()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.sample {
        let order = make_order(42);
        for options in cli.format.options() {
            let column = encode_jsonb_with_options(&order, options).expect("Failed to encode order");
            let data = column.data().unwrap_or_default();
            println!("{} ({} bytes): {:02x?}", column.format(), data.len(), &data[..data.len().min(24)]);
        }
        return;
    }

    tracing::info!(
        records = cli.records,
        iterations = cli.iterations,
        format = ?cli.format,
        "generating dataset"
    );
    let orders: Vec<Order> = (0..cli.records).map(make_order).collect();

    let mut mismatches = 0;
    for options in cli.format.options() {
        // Encode
        let (encode_time, columns) = time(cli.iterations, || encode_all(&orders, options));
        let bytes = total_len(&columns);

        println!("\n=== {} ({} records) ===", options.format, orders.len());
        println!(
            "  encode:                     {:>10} bytes in {:?} ({:.1} MB/s)",
            bytes,
            encode_time,
            throughput(bytes, encode_time)
        );

        // Decode
        let (typed_time, typed) = time(cli.iterations, || {
            columns
                .iter()
                .map(|column| Order::from_column(column).expect("Failed to decode order"))
                .collect::<Vec<_>>()
        });
        let (map_time, maps) = time(cli.iterations, || {
            columns
                .iter()
                .map(|column| {
                    decode_jsonb::<HashMap<String, Value>>(column).expect("Failed to decode map")
                })
                .collect::<Vec<_>>()
        });

        println!(
            "  decode -> Order:            {:?} ({:.1} MB/s)",
            typed_time,
            throughput(bytes, typed_time)
        );
        println!(
            "  decode -> HashMap<String,_>: {:?} ({:.1} MB/s)",
            map_time,
            throughput(bytes, map_time)
        );

        // Verify
        let format_mismatches = typed.iter().zip(&orders).filter(|(a, b)| a != b).count();
        let map_fields: usize = maps.iter().map(HashMap::len).sum();
        println!("  typed mismatches:           {}", format_mismatches);
        println!("  map fields:                 {}", map_fields);
        mismatches += format_mismatches;
    }

    if mismatches > 0 {
        tracing::error!(mismatches, "round-trip produced different records");
        std::process::exit(1);
    }
}
