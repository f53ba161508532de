//! vdoc CLI - versioned documentation sites.
//!
//! Provides commands for:
//! - `generate`: Render the Markdown tree and write the sitemap
//! - `remove`: Delete rendered pages
//! - `serve`: Start the documentation server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, RemoveArgs, ServeArgs};
use output::Output;

/// vdoc - versioned documentation sites.
#[derive(Parser)]
#[command(name = "vdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every Markdown document to HTML.
    Generate(GenerateArgs),
    /// Delete every rendered HTML page.
    Remove(RemoveArgs),
    /// Start the documentation server.
    Serve(ServeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Generate(args) => args.verbose,
            Self::Serve(args) => args.verbose,
            Self::Remove(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // RUST_LOG wins unless --verbose is given
    let filter = if cli.command.verbose() {
        EnvFilter::new("vdoc=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vdoc=info,warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Remove(args) => args.execute(),
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
