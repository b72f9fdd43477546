/*!
 * Command-line interface for project-aggregator
 */

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use project_aggregator::config::{Args, Config};
use project_aggregator::error::Result;
use project_aggregator::pipeline::Aggregator;
use project_aggregator::report::{ReportFormat, Reporter, RunReport};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "project-aggregator", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    config.validate()?;

    let progress = create_progress_bar(config.show_progress);
    let aggregator = Aggregator::new(config.clone(), Arc::new(progress.clone()));

    let start_time = Instant::now();
    let result = aggregator.run();
    let duration = start_time.elapsed();
    progress.finish_and_clear();

    let statistics = result?;

    println!(
        "Aggregated file generated successfully: {}",
        config.output_file.display()
    );

    if config.show_progress {
        let report = RunReport {
            output_file: config.output_file.display().to_string(),
            duration,
            statistics,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    }

    Ok(())
}

fn create_progress_bar(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
    {
        progress.set_style(style);
    }
    progress.set_prefix("Aggregating");
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
