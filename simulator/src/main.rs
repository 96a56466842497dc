//! Single-Core vs Multi-Core Simulator CLI.
//!
//! The main executable. It handles command-line argument parsing, configuration
//! loading, logging setup and dispatch to the individual simulations.
//!
//! # Usage
//!
//! * `pipeline`: Animate instructions through the 4-stage pipeline.
//! * `checkout`: Compare one cashier with a bank of cashiers.
//! * `benchmark`: Show the benchmark table for a workload.
//! * `quiz`: Get a CPU recommendation.
//! * `hazards`: Explain pipeline hazards.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cpu_compare::benchmark::{self, Workload};
use cpu_compare::checkout::CheckoutSim;
use cpu_compare::common::{CoreMode, SimResult};
use cpu_compare::config::Config;
use cpu_compare::core::pipeline::hazards::{HAZARD_NOTES, MULTI_CORE_MITIGATIONS};
use cpu_compare::core::pipeline::PipelineObserver;
use cpu_compare::core::SimContext;
use cpu_compare::quiz::{self, Budget, QuizAnswers, Usage};
use cpu_compare::sim::render::{render_bar_chart, JsonRenderer, TextRenderer};
use cpu_compare::sim::Ticker;

/// Command-line arguments for the simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Single-core vs multi-core CPU simulator")]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run instructions through the pipeline, cycle by cycle.
    Pipeline {
        /// Number of instructions to queue.
        #[arg(short = 'n', long, default_value_t = 5)]
        instructions: usize,

        /// Core mode (single or multi). Overrides the config file.
        #[arg(short, long)]
        mode: Option<CoreMode>,

        /// Milliseconds per cycle. Overrides the config file.
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Print run statistics afterwards.
        #[arg(long)]
        stats: bool,
    },

    /// Drain identical customer queues with one cashier and with several.
    Checkout {
        /// Number of customers to queue.
        #[arg(short = 'n', long, default_value_t = 8)]
        customers: usize,

        /// Milliseconds per simulated second. Overrides the config file.
        #[arg(long)]
        tick_ms: Option<u64>,
    },

    /// Show benchmark results for a workload.
    Benchmark {
        /// gaming, video-editing or web-browsing.
        #[arg(short, long, default_value = "gaming")]
        workload: Workload,
    },

    /// Recommend a CPU from three answers.
    Quiz {
        /// gaming, content-creation, programming or productivity.
        #[arg(long)]
        usage: Option<Usage>,

        /// low, medium or high.
        #[arg(long)]
        budget: Option<Budget>,

        /// Main applications you run.
        #[arg(long)]
        applications: Option<String>,
    },

    /// Explain pipeline hazards.
    Hazards,
}

/// Main entry point.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and loads the TOML configuration if given.
/// 2. **Logging**: Installs a stderr subscriber filtered by `RUST_LOG`, `--trace`
///    or the config's `trace` flag.
/// 3. **Dispatch**: Runs the selected command.
/// 4. **Exit**: Notices (nothing queued, unanswered quiz) print a warning and exit 0;
///    faults print a diagnostic and exit 1.
fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });

    init_tracing(cli.trace || config.general.trace || cfg!(feature = "always-trace"));

    if let Err(e) = run(&cli, &config) {
        if e.is_notice() {
            eprintln!("[notice] {}", e);
        } else {
            eprintln!("\n[!] FATAL: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, config: &Config) -> SimResult<()> {
    match &cli.command {
        Commands::Pipeline {
            instructions,
            mode,
            tick_ms,
            stats,
        } => cmd_pipeline(config, cli.json, *instructions, *mode, *tick_ms, *stats),
        Commands::Checkout { customers, tick_ms } => {
            cmd_checkout(config, cli.json, *customers, *tick_ms)
        }
        Commands::Benchmark { workload } => cmd_benchmark(cli.json, *workload),
        Commands::Quiz {
            usage,
            budget,
            applications,
        } => {
            let answers = QuizAnswers {
                usage: *usage,
                budget: *budget,
                applications: applications.clone(),
            };
            cmd_quiz(cli.json, &answers)
        }
        Commands::Hazards => cmd_hazards(),
    }
}

fn tick_period(config: &Config, tick_ms: Option<u64>) -> Duration {
    tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.general.tick_period())
}

fn cmd_pipeline(
    config: &Config,
    json: bool,
    instructions: usize,
    mode: Option<CoreMode>,
    tick_ms: Option<u64>,
    stats: bool,
) -> SimResult<()> {
    let mut ctx = SimContext::from_config(config);
    if let Some(mode) = mode {
        ctx.set_mode(mode)?;
    }
    ctx.add_instructions(instructions)?;

    let ticker = Ticker::new(
        tick_period(config, tick_ms),
        Some(config.pipeline.max_cycles),
    );
    let mut observer: Box<dyn PipelineObserver> = if json {
        Box::new(JsonRenderer::new(io::stdout()))
    } else {
        Box::new(TextRenderer::new(io::stdout(), ctx.stepper.cores()))
    };

    ticker.run_pipeline(&mut ctx, observer.as_mut())?;

    if stats && !json {
        ctx.stats.print();
    }
    Ok(())
}

fn cmd_checkout(
    config: &Config,
    json: bool,
    customers: usize,
    tick_ms: Option<u64>,
) -> SimResult<()> {
    let mut sim = CheckoutSim::from_config(config);
    for _ in 0..customers {
        sim.add_customer()?;
    }

    if !json {
        println!(
            "[*] {} customers, 1 cashier vs {} cashiers",
            customers,
            sim.cashiers()
        );
    }

    let ticker = Ticker::new(tick_period(config, tick_ms), None);
    let comparison = sim.run(&ticker)?;

    let mut out = io::stdout().lock();
    match comparison {
        Some(comparison) if json => {
            serde_json::to_writer_pretty(&mut out, &comparison)?;
            writeln!(out)?;
        }
        Some(comparison) => writeln!(out, "[*] {}", comparison)?,
        None => writeln!(out, "[*] Checkout run stopped before the queues emptied.")?,
    }
    Ok(())
}

fn cmd_benchmark(json: bool, workload: Workload) -> SimResult<()> {
    let report = benchmark::report(workload);
    let mut out = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Benchmark: {}", report.workload)?;
    writeln!(out, "--------------------")?;
    write!(out, "{}", render_bar_chart(&report.points, 40))?;
    writeln!(out, "--------------------")?;
    writeln!(out, "[*] {}", report.headline)?;
    writeln!(out, "Best value:")?;
    writeln!(
        out,
        "  {} cores ({}%)  [{}]",
        report.best_value.cores, report.best_value.performance, report.advice.badge
    )?;
    writeln!(out, "  vs 1 core:          +{}%", report.best_value.vs_single)?;
    writeln!(
        out,
        "  vs 8 cores:         {}{}%",
        if report.best_value.vs_max > 0 { "+" } else { "" },
        report.best_value.vs_max
    )?;
    writeln!(
        out,
        "  Best performing:    {} cores ({}%)",
        report.best_performing.0, report.best_performing.1
    )?;
    writeln!(out, "  Scaling (8 vs 1):   {:.1}x", report.scaling_factor)?;
    writeln!(out, "Analysis:")?;
    writeln!(out, "  {}", report.advice.analysis)?;
    writeln!(out, "  {}", report.insight)?;
    writeln!(out, "Recommendation:")?;
    writeln!(
        out,
        "  {} - {}",
        report.advice.specific, report.advice.details
    )?;
    writeln!(out, "  Example CPUs: {}", report.advice.examples)?;
    writeln!(out, "  {}", report.conclusion)?;
    Ok(())
}

fn cmd_quiz(json: bool, answers: &QuizAnswers) -> SimResult<()> {
    let recommendation = quiz::recommend(answers)?;
    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &recommendation)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{} {}", recommendation.icon, recommendation.title)?;
        writeln!(out, "{}", recommendation.body)?;
    }
    Ok(())
}

fn cmd_hazards() -> SimResult<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "Pipeline Hazards")?;
    writeln!(out, "----------------")?;
    for (name, description) in HAZARD_NOTES {
        writeln!(out, "{}: {}", name, description)?;
    }
    writeln!(out, "Multi-core reduces hazards by:")?;
    for mitigation in MULTI_CORE_MITIGATIONS {
        writeln!(out, "  - {}", mitigation)?;
    }
    Ok(())
}
