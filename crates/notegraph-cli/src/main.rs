#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "notegraph: graph analytics for markdown knowledge bases",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (defaults to ROOT/notegraph.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Report",
        about = "Run every analysis and print the full report",
        long_about = "Load the notes under ROOT, build the link graph and run every engine: \
                      graph properties, all centrality measures, clustering, communities, \
                      bottlenecks and critical paths.",
        after_help = "EXAMPLES:\n    # Analyze the notes in the current directory\n    notegraph analyze\n\n    # Top 5 per ranking, as JSON\n    notegraph analyze ~/notes --top 5 --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Report",
        about = "Show graph properties and degree extremes",
        after_help = "EXAMPLES:\n    notegraph stats ~/notes"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Rank notes by a centrality measure",
        after_help = "EXAMPLES:\n    # Most central notes by PageRank\n    notegraph centrality --metric pagerank\n\n    # Every note by betweenness\n    notegraph centrality --metric betweenness --top 0"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Detect communities of densely linked notes",
        after_help = "EXAMPLES:\n    notegraph communities --method label-propagation"
    )]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Show how two notes are connected",
        long_about = "Print the shortest path between two notes (links treated as undirected). \
                      With --all, also enumerate every simple path up to --max-length edges.",
        after_help = "EXAMPLES:\n    notegraph path notes/rust notes/wasm\n\n    notegraph path notes/rust notes/wasm ~/notes --all --max-length 4"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Paths",
        about = "List notes with high betweenness",
        after_help = "EXAMPLES:\n    notegraph bottlenecks --threshold 0.2"
    )]
    Bottlenecks(cmd::bottlenecks::BottlenecksArgs),

    #[command(
        next_help_heading = "Paths",
        about = "List fragile hub-to-hub paths",
        after_help = "EXAMPLES:\n    notegraph critical-paths --top 5"
    )]
    CriticalPaths(cmd::critical_paths::CriticalPathsArgs),

    #[command(
        next_help_heading = "Export",
        about = "Export the graph as GraphML, GEXF, JSON, Markdown or HTML",
        after_help = "EXAMPLES:\n    # GraphML for Gephi or yEd\n    notegraph export --to graphml -o notes.graphml\n\n    # JSON with every metric, to stdout\n    notegraph export --to json --metrics\n\n    # Browsable report\n    notegraph export --to html -o report.html"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    notegraph completions bash > /etc/bash_completion.d/notegraph"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NOTEGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "notegraph=debug,info"
        } else {
            "notegraph=warn,warn"
        })
    });

    let format = env::var("NOTEGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = resolve_output_mode(cli.format, cli.json);
    let config = cli.config.as_deref();
    debug!(?output, json = output.is_json(), "output mode resolved");

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, config, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, config, output),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, config, output),
        Commands::Communities(args) => cmd::communities::run_communities(args, config, output),
        Commands::Path(args) => cmd::path::run_path(args, config, output),
        Commands::Bottlenecks(args) => cmd::bottlenecks::run_bottlenecks(args, config, output),
        Commands::CriticalPaths(args) => {
            cmd::critical_paths::run_critical_paths(args, config, output)
        }
        Commands::Export(args) => cmd::export::run_export(args, config, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
