//! Simulate a stream of payments into a paypack ledger and report the summary.

use anyhow::Context;
use clap::Parser;
use paypack::{AppendError, PaymentsSummary, Processor, RecordStore, StoredItem, MAX_RELATIVE_MS};
use rand::Rng;
use rust_decimal::Decimal;
use std::mem;

#[derive(Parser)]
#[command(name = "paypack-sim")]
#[command(about = "Feed random payment events into a bit-packed ledger")]
#[command(after_help = "LIMITS:\n  \
    Amounts above 20.47 and timestamps more than 2,097,151 ms (~34.9 min)\n  \
    after store creation cannot be stored and are reported as rejected.")]
struct Args {
    /// Number of payment events to generate
    #[arg(short, long, default_value = "10000")]
    records: usize,

    /// Share of events routed to the fallback processor (0.0-1.0)
    #[arg(long, default_value = "0.2")]
    fallback_ratio: f64,

    /// Largest generated amount in cents (values above 2047 are rejected by the store)
    #[arg(long, default_value = "1990")]
    max_cents: u32,

    /// Share of events placed outside the representable time window (0.0-1.0)
    #[arg(long, default_value = "0.0")]
    out_of_window: f64,

    /// Only summarize events at or after this offset from the epoch (ms)
    #[arg(long)]
    from: Option<i64>,

    /// Only summarize events at or before this offset from the epoch (ms)
    #[arg(long)]
    to: Option<i64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Log every rejected event
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Default)]
struct Rejections {
    amount: usize,
    timestamp: usize,
}

impl Rejections {
    fn record(&mut self, err: &AppendError) {
        match err {
            AppendError::AmountOutOfRange { .. } | AppendError::NegativeAmount { .. } => self.amount += 1,
            AppendError::TimestampOutOfRange { .. } => self.timestamp += 1,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

/// Generate and append events, returning the rejection tally
fn simulate(store: &mut RecordStore, args: &Args) -> Rejections {
    let mut rng = rand::rng();
    let mut rejections = Rejections::default();
    let window = i64::from(MAX_RELATIVE_MS);
    let step = (window / args.records.max(1) as i64).max(1);
    let mut offset: i64 = 0;

    for i in 0..args.records {
        offset = (offset + rng.random_range(0..=step)).min(window);

        let ts = if rng.random_bool(args.out_of_window.clamp(0.0, 1.0)) {
            if rng.random_bool(0.5) {
                store.epoch() - rng.random_range(1..=60_000)
            } else {
                store.max_timestamp() + rng.random_range(1..=60_000)
            }
        } else {
            store.epoch() + offset
        };

        let cents = rng.random_range(1..=args.max_cents.max(1));
        let processor = if rng.random_bool(args.fallback_ratio.clamp(0.0, 1.0)) {
            Processor::Fallback
        } else {
            Processor::Default
        };

        if let Err(e) = store.append(ts, Decimal::new(i64::from(cents), 2), processor) {
            tracing::debug!(event = i, error = %e, "event rejected");
            rejections.record(&e);
        }
    }

    rejections
}

fn print_report(store: &RecordStore, summary: &PaymentsSummary, rejections: &Rejections) {
    println!("Stored {} records ({} rejected: {} amount, {} timestamp)",
        store.len(),
        rejections.amount + rejections.timestamp,
        rejections.amount,
        rejections.timestamp,
    );
    for processor in Processor::ALL {
        let totals = summary.get(processor);
        println!(
            "  {:<9} requests={:<8} amount={}",
            processor, totals.total_requests, totals.total_amount
        );
    }

    let packed = store.len() * mem::size_of::<u64>();
    let unpacked = store.len() * mem::size_of::<StoredItem>();
    println!("\nPacked storage:   {packed} bytes");
    println!("Decoded view:     {unpacked} bytes");
    if packed > 0 {
        println!("Compression:      {:.1}x", unpacked as f64 / packed as f64);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut store = RecordStore::new();
    tracing::info!(epoch = store.epoch(), records = args.records, "simulation started");

    let rejections = simulate(&mut store, &args);
    if rejections.amount + rejections.timestamp > 0 {
        tracing::warn!(
            amount = rejections.amount,
            timestamp = rejections.timestamp,
            "some events did not fit the record layout"
        );
    }

    let from = args.from.map(|f| store.epoch() + f);
    let to = args.to.map(|t| store.epoch() + t);
    let summary = store.summary(from, to);

    if args.json {
        let out = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{out}");
    } else {
        print_report(&store, &summary, &rejections);
    }

    Ok(())
}
