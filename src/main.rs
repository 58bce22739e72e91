use anyhow::{Context, Result};
use chrono::Local;
use gvf_rs::cli::{Command, ProfileArgs, SweepArgs, get_args};
use gvf_rs::config::{ColumnConfig, OutputFormat};
use gvf_rs::io::csv::{create_csv_writer, load_scenarios_from_path, write_profile, write_summaries};
use gvf_rs::io::results::RunSummary;
use gvf_rs::{RunOutcome, run_scenario, run_sweep};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    match get_args().command {
        Command::Profile(args) => cmd_profile(&args),
        Command::Sweep(args) => cmd_sweep(&args),
    }
}

fn timestamped(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}.csv", prefix, Local::now().format("%Y%m%d%H%M")))
}

fn cmd_profile(args: &ProfileArgs) -> Result<()> {
    let channel = args.channel().context("Invalid channel parameters")?;
    let boundary = args.boundary();
    let tunables = args.numerics.tunables();

    println!("--- GRADUALLY VARIED FLOW SOLVER (RK4) ---");
    let outcome = run_scenario(&channel, &boundary, &tunables).context("Invalid boundary condition")?;

    print_report(&outcome);

    if matches!(args.format, OutputFormat::Table | OutputFormat::Both) {
        print_table(&outcome);
    }

    if matches!(args.format, OutputFormat::Csv | OutputFormat::Both) {
        let path = args.output.clone().unwrap_or_else(|| timestamped("gvf_profile"));
        let mut wtr = create_csv_writer(&path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;
        write_profile(&mut wtr, &outcome).context("Failed to write profile")?;
        println!("\nProfile saved to {}", path.display());
    }

    Ok(())
}

fn print_report(outcome: &RunOutcome) {
    let refs = &outcome.refs;

    println!("\n[ CALCULATED REFERENCE DEPTHS ]");
    match refs.yn() {
        Some(yn) => println!("Normal Depth (yn)   : {:.4} m", yn),
        None => println!("Normal Depth (yn)   : none (S0 <= 0)"),
    }
    println!("Critical Depth (yc) : {:.4} m", refs.yc());
    println!("Slope Type: {}", outcome.slope);
    println!("Profile Type: {}", outcome.profile_type);

    println!("\n-> {:?} flow, integrating {:?}.", outcome.flow, outcome.direction);

    let profile = &outcome.profile;
    let (lo, hi) = profile.depth_range();
    println!(
        "-> {} points, depth {:.4}..{:.4} m, {}",
        profile.len(),
        lo,
        hi,
        profile.termination.label()
    );
}

fn print_table(outcome: &RunOutcome) {
    println!("\n{:>12} {:>10}", "x (m)", "y (m)");
    for p in &outcome.profile.points {
        println!("{:>12.2} {:>10.4}", p.x, p.y);
    }
}

fn cmd_sweep(args: &SweepArgs) -> Result<()> {
    let tunables = args.numerics.tunables();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .context("Failed to configure worker threads")?;

    let scenarios = load_scenarios_from_path(&args.scenarios, &ColumnConfig::new())
        .with_context(|| format!("Failed to load scenarios: {:?}", args.scenarios))?;

    println!("\nSweep Configuration:");
    println!("  Scenarios: {}", scenarios.len());
    println!("  Threads: {}", args.threads);
    println!("  Step: {} m", tunables.step);

    let pb = ProgressBar::new(scenarios.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scenarios ({eta})")?
            .progress_chars("#>-"),
    );

    let results = run_sweep(&scenarios, &tunables, Arc::new(pb));

    // Failed scenarios were already logged by the sweep
    let rows: Vec<RunSummary> = scenarios
        .iter()
        .zip(&results)
        .filter_map(|(s, r)| r.as_ref().ok().map(|o| RunSummary::new(s.id, o)))
        .collect();

    let path = args.output.clone().unwrap_or_else(|| timestamped("gvf_sweep"));
    let mut wtr = create_csv_writer(&path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    write_summaries(&mut wtr, &rows).context("Failed to write summary")?;

    println!(
        "\nSweep complete: {}/{} scenarios. Summary saved to {}",
        rows.len(),
        scenarios.len(),
        path.display()
    );
    Ok(())
}
