use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reportkit_report::cli;
use reportkit_report::spec::EnumReportLayout;
use tracing::error;

#[derive(Parser)]
#[command(name = "reportkit")]
#[command(about = "Write the formatted company report workbook (.xlsx)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the report workbook
    Generate {
        /// Output workbook path (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet arrangement (overrides the config file)
        #[arg(short, long, value_enum)]
        layout: Option<EnumReportLayout>,

        /// YAML config file
        #[arg(short, long, env = "REPORTKIT_CONFIG")]
        config: Option<PathBuf>,

        /// Show debug logs
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the company dataset and summary without writing a workbook
    Preview,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            output,
            layout,
            config,
            verbose,
        } => {
            reportkit_log::init_logging(verbose);
            cli::generate(config, output, layout)
        }
        Commands::Preview => {
            reportkit_log::init_logging(false);
            cli::preview()
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
