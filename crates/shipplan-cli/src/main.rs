use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shipplan_mip::Solver;
use shipplan_model::{
    Assignment, LatenessEncoding, ModeTable, Order, PlanConfig, ShippingMode, build_matrices,
    effective_capacity, plan,
};

#[derive(Parser)]
#[command(name = "shipplan")]
#[command(about = "Least-cost shipping mode assignment for order batches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a shipping mode to every order in a dataset
    Solve {
        /// CSV file with order id, scheduled days, price, and distance columns
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Solve a random sample of this many orders
        #[arg(short, long)]
        sample: Option<usize>,
        /// Sampling seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Late-delivery penalty per day, as a fraction of item price
        #[arg(long)]
        penalty_rate: Option<f64>,
        /// Share of the batch a single mode may serve
        #[arg(long)]
        capacity_fraction: Option<f64>,
        /// Maximum tolerated lateness in days
        #[arg(long)]
        lateness_cap: Option<i64>,
        /// Encode the lateness cap as per-pair constraint rows instead of
        /// eliminating over-cap pairs
        #[arg(long)]
        per_pair_cap: bool,
        /// Give up on the solve after this many seconds
        #[arg(long)]
        time_limit_secs: Option<u64>,
    },
    /// Load and validate a dataset without solving
    Check {
        /// The file to check
        file: PathBuf,
    },
}

/// One row of the order dataset, with the upstream export's column headers.
#[derive(Debug, serde::Deserialize)]
struct OrderRecord {
    #[serde(rename = "Order Item Id")]
    id: String,
    #[serde(rename = "Days for shipment (scheduled)")]
    scheduled_days: i64,
    #[serde(rename = "Order Item Product Price")]
    price: f64,
    #[serde(rename = "Distance_km")]
    distance_km: f64,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order::new(
            record.id,
            record.price,
            record.scheduled_days,
            record.distance_km,
        )
    }
}

fn load_orders(path: &Path) -> Result<Vec<Order>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut orders = Vec::new();
    for record in reader.deserialize::<OrderRecord>() {
        orders.push(record?.into());
    }
    Ok(orders)
}

fn sample_orders(orders: Vec<Order>, n: usize, seed: u64) -> Vec<Order> {
    if n >= orders.len() {
        return orders;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, orders.len(), n);
    picked.iter().map(|i| orders[i].clone()).collect()
}

#[derive(serde::Serialize)]
struct Report {
    objective: f64,
    assignments: Vec<ReportRow>,
}

#[derive(serde::Serialize)]
struct ReportRow {
    order: String,
    mode: ShippingMode,
}

impl Report {
    fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            objective: assignment.total_cost,
            assignments: assignment
                .choices
                .iter()
                .map(|(order, mode)| ReportRow {
                    order: order.clone(),
                    mode: *mode,
                })
                .collect(),
        }
    }
}

fn print_pretty(assignment: &Assignment) {
    println!("{:<24} {}", "Order", "Selected mode");
    for (id, mode) in &assignment.choices {
        println!("{:<24} {}", id, mode);
    }
    println!();
    println!("Total cost: {:.2}", assignment.total_cost);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            format,
            sample,
            seed,
            penalty_rate,
            capacity_fraction,
            lateness_cap,
            per_pair_cap,
            time_limit_secs,
        } => {
            let mut orders = match load_orders(&file) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Error reading {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            };
            if let Some(n) = sample {
                orders = sample_orders(orders, n, seed);
            }

            let mut config = PlanConfig::default();
            if let Some(rate) = penalty_rate {
                config.penalty_per_day_late = rate;
            }
            if let Some(fraction) = capacity_fraction {
                config.capacity_fraction = fraction;
            }
            if let Some(cap) = lateness_cap {
                config.lateness_cap_days = cap;
            }
            if per_pair_cap {
                config.lateness_encoding = LatenessEncoding::PerPair;
            }

            let mut solver = Solver::new();
            if let Some(secs) = time_limit_secs {
                solver = solver.with_time_limit(Duration::from_secs(secs));
            }

            let assignment = match plan(&orders, &ModeTable::default(), &config, &solver) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Solve error: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                let report = Report::from_assignment(&assignment);
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing report: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_pretty(&assignment);
            }
        }
        Commands::Check { file } => {
            let orders = match load_orders(&file) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Error reading {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            };

            let table = ModeTable::default();
            let config = PlanConfig::default();
            let matrices = match build_matrices(&orders, &table, &config) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Invalid dataset: {}", e);
                    std::process::exit(1);
                }
            };

            let unassignable = matrices
                .lateness
                .iter()
                .filter(|row| row.iter().all(|&late| late > config.lateness_cap_days))
                .count();

            println!("Orders:        {}", orders.len());
            println!("Modes:         {}", table.len());
            println!(
                "Per-mode cap:  {}",
                effective_capacity(orders.len(), &config)
            );
            println!("Unassignable:  {} (late under every mode)", unassignable);
            if unassignable > 0 {
                eprintln!("Warning: batch cannot be solved as-is");
                std::process::exit(1);
            }
        }
    }
}
