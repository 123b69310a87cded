use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use cli::{Cli, Commands};
use commands::{
    ListArgs, cmd_activity, cmd_attention, cmd_config, cmd_list, cmd_stats, cmd_status,
};
use config::Config;
use format::FormatOptions;
use util::{build_engine, load_snapshot};

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "saintpaulia", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let opts = FormatOptions::new(cli.no_color || config.no_color, cli.style)
        .with_compact(cli.compact);
    let output = cli.output.as_ref();

    match cli.command {
        Commands::Status {
            plant,
            output: format,
        } => {
            let snapshot = load_snapshot(cli.plants, &config)?;
            let engine = build_engine(&config, cli.now);
            cmd_status(
                &snapshot,
                &engine,
                &plant,
                format.resolve(cli.json),
                output,
                &opts.with_no_header(format.no_header),
            )?;
        }
        Commands::Stats { output: format } => {
            let snapshot = load_snapshot(cli.plants, &config)?;
            let engine = build_engine(&config, cli.now);
            cmd_stats(
                &snapshot,
                &engine,
                format.resolve(cli.json),
                output,
                &opts.with_no_header(format.no_header),
            )?;
        }
        Commands::Attention {
            output: format,
            limit,
        } => {
            let snapshot = load_snapshot(cli.plants, &config)?;
            let engine = build_engine(&config, cli.now);
            cmd_attention(
                &snapshot,
                &engine,
                limit,
                format.resolve(cli.json),
                output,
                &opts.with_no_header(format.no_header),
            )?;
        }
        Commands::List {
            output: format,
            search,
            filter,
            sort,
            page,
            per_page,
            view,
        } => {
            let snapshot = load_snapshot(cli.plants, &config)?;
            let engine = build_engine(&config, cli.now);
            let args = ListArgs {
                search,
                filter,
                sort,
                page,
                per_page: per_page.unwrap_or(config.plants_per_page),
                view: view.unwrap_or(config.default_view),
            };
            cmd_list(
                &snapshot,
                &engine,
                args,
                format.resolve(cli.json),
                output,
                &opts.with_no_header(format.no_header),
            )?;
        }
        Commands::Activity {
            output: format,
            plant,
            limit,
        } => {
            let snapshot = load_snapshot(cli.plants, &config)?;
            let now = build_engine(&config, cli.now).now();
            cmd_activity(
                &snapshot,
                plant.as_deref(),
                limit,
                now,
                format.resolve(cli.json),
                output,
                &opts.with_no_header(format.no_header),
            )?;
        }
        Commands::Config { action } => {
            cmd_config(action, opts.no_color, cli.quiet)?;
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
