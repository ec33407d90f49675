use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
    time::Instant,
};

use clap::{Parser, Subcommand, ValueEnum};
use pipe_maze::{classify_loop, Grid, PipeLoop, Strategy};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(about = "Find the loop in a field of pipes, and what it encloses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the farthest distance along the loop and the enclosed tile count
    Solve {
        #[arg(short, long)]
        /// Print out how long each part took
        timings: bool,

        #[arg(short, long, value_enum, default_value_t = StrategyArg::Parity)]
        /// How to decide which tiles are enclosed
        strategy: StrategyArg,

        /// File with the sketch of the pipes
        file: PathBuf,
    },
    /// Draw the loop, its distances, and which tiles it encloses
    Show {
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Parity)]
        strategy: StrategyArg,

        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Parity,
    Magnify,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Parity => Strategy::ParityScan,
            StrategyArg::Magnify => Strategy::Magnify,
        }
    }
}

/// Reads `RUST_LOG`, defaulting to `warn`, and logs compactly to stderr
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn read_grid(file: &Path) -> Grid {
    let Ok(contents) = fs::read_to_string(file) else {
        eprintln!("Could not read file: {}", file.display());
        exit(1);
    };

    match Grid::parse(&contents) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Could not parse sketch: {err}");
            exit(2);
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            timings,
            strategy,
            file,
        } => {
            let grid = read_grid(&file);
            info!(rows = grid.height(), cols = grid.width(), "read sketch");

            let t0 = Instant::now();
            let pipe_loop = PipeLoop::extract(&grid).unwrap_or_else(|err| {
                eprintln!("Analysis error: {err}");
                exit(3);
            });
            println!("First part: {}", pipe_loop.farthest());
            if timings {
                eprintln!("  took {:?}", t0.elapsed());
            }

            let t0 = Instant::now();
            let enclosure = classify_loop(&pipe_loop, &grid, strategy.into());
            println!("Bonus: {}", enclosure.inside());
            if timings {
                eprintln!("  took {:?}", t0.elapsed());
            }
        }
        Commands::Show { strategy, file } => {
            let grid = read_grid(&file);

            let pipe_loop = PipeLoop::extract(&grid).unwrap_or_else(|err| {
                eprintln!("Analysis error: {err}");
                exit(3);
            });
            let enclosure = classify_loop(&pipe_loop, &grid, strategy.into());

            println!("{}", pipe_loop.loop_map(&grid));
            println!("{}", pipe_loop.render_distances());
            println!("{enclosure}");
        }
    }
}
