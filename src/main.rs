use anyhow::Result;
use bucketmap::cli::{Cli, Commands};
use bucketmap::commands::{self, NormalizeOptions};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    bucketmap::observability::init_tracing(cli.verbose);

    match cli.command {
        Commands::Normalize {
            input,
            fields,
            config,
            output,
            pretty,
            sequential,
        } => commands::handle_normalize(NormalizeOptions {
            input,
            fields,
            config,
            output,
            pretty,
            sequential,
        }),
        Commands::Stats {
            input,
            fields,
            config,
            pretty,
        } => commands::handle_stats(NormalizeOptions {
            input,
            fields,
            config,
            pretty,
            ..Default::default()
        }),
        Commands::Classify {
            table,
            config,
            ranks,
        } => {
            let config = commands::resolve_config(config.as_deref())?;
            let results = commands::classify_ranks(&config, &table, &ranks)?;
            commands::write_json(&results, None, true)
        }
        Commands::Color { values } => {
            commands::write_json(&commands::describe_colors(&values), None, true)
        }
        Commands::Init { force } => {
            let dir = std::env::current_dir()?;
            commands::init_config(&dir, force)
        }
    }
}
