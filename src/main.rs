use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use mtx_density::{convert, BoundsPolicy, DensityConfig, GridRounding};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "mtx-density",
    version,
    about = "Aggregate the nonzeros of a Matrix Market matrix into a block density map"
)]
struct Cli {
    /// Matrix Market coordinate file to read
    input: PathBuf,

    /// Density map file to write
    output: PathBuf,

    /// Number of destination block rows
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    dst_rows: u32,

    /// How the source-to-block scaling rates are derived
    #[arg(long, value_enum, default_value_t = RoundingChoice::Floor)]
    rounding: RoundingChoice,

    /// Handling of coordinates that fall past the last block
    #[arg(long, value_enum, default_value_t = BoundsChoice::Clamp)]
    bounds: BoundsChoice,

    /// Verbosity (-v info with timings, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingChoice {
    Floor,
    Ceil,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoundsChoice {
    Clamp,
    Reject,
}

impl Cli {
    fn config(&self) -> DensityConfig {
        DensityConfig {
            dst_rows: self.dst_rows,
            rounding: match self.rounding {
                RoundingChoice::Floor => GridRounding::Floor,
                RoundingChoice::Ceil => GridRounding::Ceil,
            },
            bounds: match self.bounds {
                BoundsChoice::Clamp => BoundsPolicy::Clamp,
                BoundsChoice::Reject => BoundsPolicy::Reject,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(match cli.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a global tracing subscriber is already installed");
    }

    let config = cli.config();
    match convert(&cli.input, &cli.output, &config) {
        Ok(report) => {
            info!(
                dst_m = report.grid.dst_m,
                dst_n = report.grid.dst_n,
                nnz = report.nnz,
                blocks = report.blocks,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_output_error() => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {} (input: {})", e, cli.input.display());
            ExitCode::FAILURE
        }
    }
}
