use clap::{Parser as ClapParser, Subcommand};
use filterdoc::cli::{self, CliError, ConvertOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "filterdoc")]
#[command(about = "filterdoc - Translate filter expressions into document-store queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON-encoded filter into a query document
    Convert {
        /// The filter tree as JSON (reads from stdin if not provided)
        filter: Option<String>,

        /// Strategy options as JSON, or @path to a JSON file
        #[arg(short, long)]
        strategy: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'filterdoc docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            filter,
            strategy,
            pretty,
        } => run_convert(filter, strategy, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_convert(
    filter: Option<String>,
    strategy: Option<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let filter = match filter {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let result = cli::execute_convert(&ConvertOptions { filter, strategy })?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }?;
    println!("{}", json);
    Ok(())
}
