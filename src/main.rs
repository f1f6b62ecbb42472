//! minikube-mcp - Model Context Protocol server for Minikube clusters

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minikube-mcp")]
#[command(author, version, about = "Model Context Protocol server for Minikube Kubernetes clusters", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server (default when no command is given)
    Serve {
        /// Transport mechanism (stdio, sse, http)
        #[arg(long, default_value = "stdio")]
        transport: String,

        /// Access level (readonly, readwrite)
        #[arg(long, default_value = "readwrite")]
        access_level: String,
    },

    /// Check prerequisites
    Check,

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity level. Diagnostics go to stderr;
    // stdout belongs to the protocol.
    let log_level = match cli.verbose {
        0 => "warn",  // Default: only warnings and errors
        1 => "info",  // -v: info level
        2 => "debug", // -vv: debug level
        _ => "trace", // -vvv: trace level
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Serve {
        transport: "stdio".to_string(),
        access_level: "readwrite".to_string(),
    });

    match command {
        Commands::Serve {
            transport,
            access_level,
        } => minikube_mcp::commands::serve::serve(&transport, &access_level),
        Commands::Check => minikube_mcp::commands::check::check(),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "minikube-mcp", &mut io::stdout());
            Ok(())
        }
        Commands::Version => {
            println!("minikube-mcp {}", env!("CARGO_PKG_VERSION"));
            println!("Model Context Protocol server for Minikube clusters");
            Ok(())
        }
    }
}
