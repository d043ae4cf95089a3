//! CLI for shortest path solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};
use grid_shortest_path::{solve_grid, Grid, SearchStrategy};
use itertools::Itertools;
use log::LevelFilter;

/// Shortest way from the player `P` to the nearest flag `F`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File, where to read the map. Use `-` for stdin.
    ///
    /// Rows may be separated by `;` or by newlines.
    #[arg(required_unless_present = "map")]
    file: Option<PathBuf>,

    /// Map given inline, rows separated by `;`
    #[arg(short, long, conflicts_with = "file")]
    map: Option<String>,

    /// How the search picks the next cell to settle
    #[arg(short, long, value_enum, default_value_t = Strategy::Scan)]
    strategy: Strategy,

    /// Print the map chart before solving
    #[arg(long)]
    print_map: bool,

    /// Print the map chart with the path marked
    #[arg(long)]
    show_path: bool,

    /// Increase logging verbosity, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    /// Scan the grid for the nearest pending cell
    Scan,
    /// Use a priority queue
    Heap,
}

impl From<Strategy> for SearchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Scan => SearchStrategy::LinearScan,
            Strategy::Heap => SearchStrategy::BinaryHeap,
        }
    }
}

/// Read map from file or argument, print the path
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let map = match (args.map, args.file) {
        (Some(map), _) => map,
        (None, Some(file)) if file.to_str() == Some("-") => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
        (None, Some(file)) => fs::read_to_string(&file)
            .with_context(|| format!("Cannot read map from {}", file.display()))?,
        (None, None) => bail!("No map given"),
    };
    let map = map.trim().lines().map(str::trim).join(";");

    let mut grid = Grid::parse(&map)?;
    if args.print_map {
        println!("Map chart:\n{grid}\n");
    }

    let solution = solve_grid(&mut grid, args.strategy.into())?;
    if args.show_path {
        println!("{}\n", grid.chart_with_path(&solution.moves));
    }
    println!("{solution}");
    Ok(())
}
