use crate::config::{ChannelSpec, OutputFormat, Tunables};
use crate::error::GvfResult;
use crate::routing::Boundary;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gradually varied flow profiles for trapezoidal channels (RK4)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the water-surface profile of a single channel
    Profile(ProfileArgs),
    /// Run every scenario in a CSV file in parallel and write a summary
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Discharge Q (m^3/s)
    #[arg(short = 'q', long, default_value_t = 20.0)]
    pub discharge: f64,

    /// Bottom width b (m)
    #[arg(short, long, default_value_t = 10.0)]
    pub bottom_width: f64,

    /// Side slope m (H:V)
    #[arg(short, long, default_value_t = 1.5)]
    pub side_slope: f64,

    /// Manning's n
    #[arg(short = 'n', long, default_value_t = 0.015)]
    pub manning: f64,

    /// Bed slope S0
    #[arg(long, default_value_t = 0.0005, allow_negative_numbers = true)]
    pub bed_slope: f64,

    /// Starting depth y (m)
    #[arg(short = 'y', long)]
    pub depth: f64,

    /// Starting position x (m)
    #[arg(short = 'x', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub position: f64,

    /// Length to simulate (m)
    #[arg(short, long)]
    pub length: f64,

    /// Output file for the profile (defaults to a timestamped name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub numerics: NumericArgs,
}

impl ProfileArgs {
    pub fn channel(&self) -> GvfResult<ChannelSpec> {
        ChannelSpec::new(
            self.discharge,
            self.manning,
            self.bed_slope,
            self.bottom_width,
            self.side_slope,
        )
    }

    pub fn boundary(&self) -> Boundary {
        Boundary {
            x0: self.position,
            y0: self.depth,
            length: self.length,
        }
    }
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Scenario CSV with columns Q,n,S0,b,m,y0,length and optional x0
    pub scenarios: PathBuf,

    /// Summary CSV output (defaults to a timestamped name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub threads: usize,

    #[command(flatten)]
    pub numerics: NumericArgs,
}

// Overrides for the numerical defaults
#[derive(Args, Debug)]
pub struct NumericArgs {
    /// Integration step magnitude (m); the sign is chosen from the flow regime
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    pub step: f64,

    /// Newton seed for normal depth (m)
    #[arg(long, default_value_t = 4.0)]
    pub normal_seed: f64,

    /// Newton seed for critical depth (m)
    #[arg(long, default_value_t = 2.0)]
    pub critical_seed: f64,

    /// Residual tolerance for the depth searches
    #[arg(long, default_value_t = 1e-6)]
    pub tolerance: f64,

    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,
}

impl NumericArgs {
    pub fn tunables(&self) -> Tunables {
        Tunables {
            step: self.step.abs(),
            normal_seed: self.normal_seed,
            critical_seed: self.critical_seed,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            ..Tunables::default()
        }
    }
}

pub fn get_args() -> Cli {
    Cli::parse()
}
