//! CLI argument parsing with clap.

use std::io::Read;

use clap::{Parser, Subcommand};

/// Render entity-relationship diagrams from JSON models, as a Lambda function
/// or from the command line.
#[derive(Parser, Debug)]
#[command(name = "erender", version, about)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output (debug logging).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the Lambda runtime loop, handling invocations until shut down.
    Serve,

    /// Handle one request envelope and print the response envelope.
    Invoke {
        /// Event JSON file; `-` or omitted reads stdin.
        event: Option<String>,
    },

    /// Render an ER model JSON file to an image file.
    Render {
        /// ER model JSON file (`{"entities": [...], "relations": [...]}`).
        model: String,

        /// Output file path (defaults to the model file name with the format's extension).
        #[arg(short, long)]
        output: Option<String>,

        /// Output format: svg, png (overrides config).
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the ER script generated for a model JSON file.
    Script {
        /// ER model JSON file; `-` reads stdin.
        model: String,
    },
}

/// Read a file, or stdin when the path is `-` or absent.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(path: Option<&str>) -> Result<String, std::io::Error> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(p) => std::fs::read_to_string(p),
    }
}
