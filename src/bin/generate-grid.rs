//! CLI for map generation

use clap::Parser;
use grid_shortest_path::grid_generator::GridGenerator;
use itertools::Itertools;

/// Random map generator, prints rows separated by `;`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated map height
    #[arg(long, default_value_t = 15)]
    rows: usize,

    /// Generated map width
    #[arg(long, default_value_t = 15)]
    cols: usize,

    /// Number of flags
    #[arg(long, default_value_t = 1)]
    goals: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate a map, print it
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::init();

    let mut gen = GridGenerator::new(args.seed);
    let res = gen.generate_grid(args.rows, args.cols, args.goals)?;
    println!("{}", res.iter().map(|row| row.iter().join("")).join(";"));
    Ok(())
}
