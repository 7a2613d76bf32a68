//! `work`: traverses a randomly generated work graph and reports the time.
//!
//! Usage: `work [-?] [-t NumThreads] [-n Vertices] [-s Seed]`.
//! Help and unrecognized arguments print the usage and exit with status 0.

mod cli;

use cft::{GraphSource, TraversalConfig, work_graph::WorkGraph};
use cli::{Invocation, USAGE};
use std::{
    io::{self, Write},
    process::ExitCode,
    sync::Arc,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    println!("** Work Graph Application **");
    println!();

    let cli = match cli::parse_from(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Help => {
            println!("{USAGE}");
            println!();
            return ExitCode::SUCCESS;
        }
        Invocation::Rejected(message) => {
            println!("**{message}");
            println!("{USAGE}");
            println!();
            return ExitCode::SUCCESS;
        }
    };

    // The graph must be fully built before any execution unit starts.
    let mut builder = WorkGraph::builder().vertex_count(cli.vertices);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let graph = match builder.build() {
        Ok(graph) => Arc::new(graph),
        Err(err) => {
            eprintln!("**Invalid graph: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Graph size:   {} vertices", graph.vertex_count());
    println!("Start vertex: {}", graph.start_vertex());
    println!("# of threads: {}", cli.threads);
    println!("Total work:   {:.3} secs", graph.total_cost().as_secs_f64());
    println!();
    print!("working");
    if let Err(err) = io::stdout().flush() {
        tracing::debug!(%err, "failed to flush stdout");
    }

    let config = TraversalConfig::with_units(cli.threads);
    let report = match cft::traverse(graph, &config) {
        Ok(report) => report,
        Err(err) => {
            println!();
            eprintln!("**Traversal failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!();
    println!("Visited:      {} vertices", report.visited_count());
    println!();
    println!(
        "** Done!  Time: {:.3} secs",
        report.elapsed().as_secs_f64()
    );
    println!("** Execution complete **");
    println!();
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
