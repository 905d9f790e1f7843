use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use lead_rank::{EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score and rank contacts (default if no subcommand)
    Rank(RankArgs),
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Options for a ranking run. Accepted before or after `rank`.
#[derive(Args, Debug)]
struct RankArgs {
    /// Input CSV (overrides config; default data.csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV (overrides config; default contact_plan.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the top N ranked contacts
    #[arg(long, value_name = "N")]
    top: Option<usize>,
}

impl RankArgs {
    fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none() && self.top.is_none()
    }

    /// Values given after `rank` win over those given before it
    fn merge(self, outer: RankArgs) -> RankArgs {
        RankArgs {
            input: self.input.or(outer.input),
            output: self.output.or(outer.output),
            top: self.top.or(outer.top),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lead-rank")]
#[command(about = "Rank sales contacts by role, company size and country", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging and print each contact's score breakdown
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/lead-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    rank: RankArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "lead_rank=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Print a clap error and exit. Help and version go to stdout with success;
/// usage errors get their own exit code, distinct from pipeline failures.
fn exit_with(e: clap::Error) -> ! {
    let _ = e.print();
    if e.use_stderr() {
        std::process::exit(EXIT_USAGE);
    }
    std::process::exit(EXIT_SUCCESS);
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| exit_with(e));
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Init { force }) => {
            if !cli.rank.is_empty() {
                exit_with(Cli::command().error(
                    ErrorKind::ArgumentConflict,
                    "--input, --output and --top only apply to ranking, not to 'init'",
                ));
            }
            run_init(cli.config, force)
        }
        Some(Commands::Rank(args)) => run_rank(cli.config, args.merge(cli.rank), cli.verbose),
        None => run_rank(cli.config, cli.rank, cli.verbose),
    }
}

fn run_init(config_path: Option<PathBuf>, force: bool) {
    let Some(path) = config_path.or_else(lead_rank::config::get_config_path) else {
        eprintln!("Could not determine home directory. Pass --config <PATH>.");
        std::process::exit(EXIT_CONFIG);
    };

    if let Err(e) = lead_rank::config::write_default_config(&path, force) {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    println!("Wrote default config to {}", path.display());
    std::process::exit(EXIT_SUCCESS);
}

fn run_rank(config_path: Option<PathBuf>, args: RankArgs, verbose: bool) {
    let start_time = Instant::now();

    // Load config
    let config = match lead_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.effective_scoring();
    if let Err(errors) = lead_rank::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let scorer = match lead_rank::scoring::Scorer::new(&effective_scoring) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let input = args.input.unwrap_or_else(|| config.input_path());
    let output = args.output.unwrap_or_else(|| config.output_path());

    let report = match lead_rank::pipeline::run(&input, &output, &scorer) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let use_colors = lead_rank::output::should_use_colors();

    if verbose {
        for (contact, result) in &report.ranked {
            println!(
                "{}",
                lead_rank::output::format_breakdown(contact, result, use_colors)
            );
        }
        println!();
    }

    if let Some(limit) = args.top {
        println!(
            "{}",
            lead_rank::output::format_ranked_table(&report.ranked, limit, use_colors)
        );
        println!();
    }

    println!("{}", lead_rank::output::format_summary(&report, use_colors));

    if verbose {
        eprintln!("Total: {} contacts in {:?}", report.ranked.len(), start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
