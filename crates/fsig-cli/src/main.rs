#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fsig_cli::{CliError, DEFAULT_PRECISION, Operation, Rendering, execute, read_input};
use fsig_fft::{DEFAULT_DEGENERATE_RTOL, KernelKind, SignalOptions};
use fsig_runtime::{LogConfig, LogFormat, LogLevel, init_logging};

/// Command line interface for the fsig transform kernel.
#[derive(Parser, Debug)]
#[command(
    name = "fsig",
    about = "Radix-2 FFT, convolution, correlation and Pearson matching over `<len>: [..]` signals",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read signals from this file. Defaults to stdin.
    #[arg(short, long, global = true, value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Transform kernel: iterative, recursive or naive_dft.
    #[arg(long, global = true, default_value = "iterative")]
    kernel: KernelKind,

    /// Decimals printed per sample.
    #[arg(long, global = true, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Print samples rounded to integers instead of with decimals.
    #[arg(long, global = true, conflicts_with = "precision")]
    integer: bool,

    /// Relative variance floor below which a Pearson window is degenerate.
    #[arg(long, global = true, default_value_t = DEFAULT_DEGENERATE_RTOL)]
    degenerate_rtol: f64,

    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Log output format: json, pretty or compact.
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Transform one signal; prints the real parts then the imaginary parts.
    Fft {
        /// Apply the normalised inverse transform instead.
        #[arg(long)]
        inverse: bool,
    },
    /// Linear convolution of h (first signal) with x (second signal).
    Convolve,
    /// Cross-correlation of h (first signal) against x (second signal).
    Correlate,
    /// Pearson coefficient of template h at every full offset into x.
    Pearson,
}

impl From<Command> for Operation {
    fn from(command: Command) -> Self {
        match command {
            Command::Fft { inverse } => Self::Fft { inverse },
            Command::Convolve => Self::Convolve,
            Command::Correlate => Self::Correlate,
            Command::Pearson => Self::Pearson,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(
        &LogConfig::default()
            .with_level(cli.log_level)
            .with_format(cli.log_format),
    );
    match run(&cli) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let input = read_input(cli.input.as_deref())?;
    let options = SignalOptions::default()
        .with_kernel(cli.kernel)
        .with_degenerate_rtol(cli.degenerate_rtol);
    let rendering = if cli.integer {
        Rendering::Integer
    } else {
        Rendering::Decimal {
            precision: cli.precision,
        }
    };
    execute(cli.command.into(), &input, &options, rendering)
}

fn report_error(err: &CliError) {
    eprintln!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
