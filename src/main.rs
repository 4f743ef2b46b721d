use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use customer_merge::app::merge_use_case::MergeUseCase;
use customer_merge::app::ports::{ProgressPort, ProgressStage};
use customer_merge::config::MergeConfig;
use customer_merge::infra::csv_table::{read_table, write_table};
use customer_merge::logging::init_logging;

#[derive(Parser)]
#[command(name = "customer-merge")]
#[command(about = "Deduplicates customer contact lists by canonical mobile number")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge duplicate customer rows in a CSV export
    Merge {
        /// Input customer list (CSV)
        input: PathBuf,
        /// Where to write the merged list (CSV)
        output: PathBuf,
        /// Product catalog TOML; the built-in catalog is used when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Progress sink that surfaces stage descriptions on the console.
struct ConsoleProgress;

impl ProgressPort for ConsoleProgress {
    fn report(&self, stage: ProgressStage) {
        info!("{}", stage);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Merge {
            input,
            output,
            catalog,
        } => {
            let config = match catalog {
                Some(path) => MergeConfig::load(&path)?,
                None => MergeConfig::default(),
            };

            let use_case = MergeUseCase::with_progress(config, Arc::new(ConsoleProgress));
            let table = read_table(&input)?;
            let outcome = use_case.run(&table)?;
            write_table(&outcome.table, &output)?;

            println!("\n📊 Merge results for {}:", input.display());
            println!("   Input rows: {}", outcome.stats.input_rows);
            println!("   Unlinkable rows dropped: {}", outcome.stats.unlinkable_rows);
            println!("   Unique customers: {}", outcome.stats.unique_customers);
            println!("   Output file: {}", output.display());
        }
    }

    Ok(())
}
