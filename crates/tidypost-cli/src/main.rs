//! tidypost CLI - clean a post dataset and report summary statistics.

mod cli;
mod logging;
mod report;

use clap::Parser;
use cli::Cli;
use tidypost::{Pipeline, PipelineConfig};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> tidypost::Result<()> {
    let config = PipelineConfig {
        top_users: cli.top,
        ..PipelineConfig::default()
    };

    let result = Pipeline::with_config(config).run(&cli.input, &cli.output)?;

    if cli.json {
        println!("{}", result.to_json()?);
    } else {
        report::print(&result, cli.verbose);
    }

    Ok(())
}
