//! fmtctl - inspect and stress the format spec caches

mod handler;
mod stress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use tracing::info;

use crate::handler::CacheArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the spec string for each precision
    Get {
        #[command(flatten)]
        cache: CacheArgs,

        /// Requested precisions (negative and oversized values are normalized)
        #[arg(required = true, allow_negative_numbers = true)]
        precisions: Vec<i32>,
    },

    /// Parse spec strings and print them as JSON lines
    Parse {
        /// Spec strings such as F2 or P12
        #[arg(required = true)]
        specs: Vec<String>,
    },

    /// Hammer one cache from several threads and report statistics
    Stress {
        #[command(flatten)]
        cache: CacheArgs,

        /// Worker threads
        #[arg(short, long, default_value_t = 8)]
        threads: usize,

        /// Lookups per thread
        #[arg(short, long, default_value_t = 100_000)]
        iterations: usize,

        /// Seed for the precision mix
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Get { cache, precisions } => {
            let cache = cache.resolve()?;
            handler::run_get(&cache, &precisions, &mut stdout)
        }
        Command::Parse { specs } => handler::run_parse(&specs, &mut stdout),
        Command::Stress {
            cache,
            threads,
            iterations,
            seed,
        } => {
            let cache = cache.resolve()?;
            info!(
                "Stressing '{}' cache: {} threads x {} lookups",
                cache.specifier(),
                threads,
                iterations
            );
            let report = stress::run(&cache, threads, iterations, seed)?;
            handler::write_json(&report, &mut stdout)
        }
    }
}
