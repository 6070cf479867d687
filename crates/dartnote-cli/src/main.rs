mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dartnote",
    version,
    about = "Extracts subsidiary-overview tables from DART consolidated financial statement notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a filing's consolidated-notes document from DART
    Fetch {
        /// Company name as registered with DART (e.g. 한솔피엔에스)
        company: String,

        /// Reporting year (e.g. 2025)
        year: String,

        /// Report kind: 사업/반기/분기/1분기/3분기 보고서, or a DART code
        #[arg(short, long, default_value = "반기보고서")]
        report: String,

        /// Directory the document is saved into
        #[arg(short, long, default_value = "result")]
        out_dir: PathBuf,
    },
    /// Extract table data from a downloaded notes document into CSV
    Extract {
        /// Path to the notes HTML document
        input_file: PathBuf,

        /// Company name recorded in the output metadata columns
        #[arg(short, long)]
        company: String,

        /// Reporting year recorded in the output metadata columns
        #[arg(short, long)]
        year: String,

        /// Report kind: 사업/반기/분기/1분기/3분기 보고서, or a DART code
        #[arg(short, long, default_value = "반기보고서")]
        report: String,

        /// Output CSV path (default: next to the input, by naming convention)
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Extract every company listed in a JSON config, continuing on failure
    Batch {
        /// Path to companies_config.json
        config_file: PathBuf,

        /// Directory holding the downloaded notes documents
        #[arg(short, long, default_value = "result")]
        data_dir: PathBuf,
    },
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            company,
            year,
            report,
            out_dir,
        } => commands::fetch::run(&company, &year, &report, out_dir),
        Commands::Extract {
            input_file,
            company,
            year,
            report,
            out,
        } => commands::extract::run(input_file, &company, &year, &report, out),
        Commands::Batch {
            config_file,
            data_dir,
        } => commands::batch::run(config_file, data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
