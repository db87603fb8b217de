//! Application entry point and dispatch.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use num_traits::ToPrimitive;

use primegen_cli::presenter::{CLIProgressReporter, CLIResultPresenter};
use primegen_core::observer::{LoggingObserver, ProgressObserver};
use primegen_core::progress::{CancelReason, CancellationToken};
use primegen_orchestration::interfaces::ResultPresenter;
use primegen_orchestration::pipeline::run_pipeline;

use crate::config::AppConfig;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        primegen_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    run_cli(config)
}

fn run_cli(config: &AppConfig) -> Result<()> {
    let opts = config.to_options().normalize();
    opts.validate().context("invalid options")?;

    let cancel = CancellationToken::new();

    // Set up Ctrl+C handler
    ctrlc_handler(cancel.clone())?;

    if !config.quiet {
        primegen_cli::ui::print_header(&format!(
            "Searching for {} primes from {} on {} workers",
            primegen_cli::output::format_big(&opts.max_primes),
            opts.start,
            opts.workers
        ));
    }

    let target = opts.max_primes.to_u64().unwrap_or(u64::MAX);
    let observer = progress_observer(target, config.quiet, std::io::stderr().is_terminal());
    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);

    let report = run_pipeline(&opts, &cancel, observer.as_ref())?;
    presenter.present_report(&report);
    Ok(())
}

/// Progress bar on a terminal, periodic log lines when stderr is redirected.
fn progress_observer(target: u64, quiet: bool, interactive: bool) -> Box<dyn ProgressObserver> {
    if quiet || interactive {
        Box::new(CLIProgressReporter::new(target, quiet))
    } else {
        Box::new(LoggingObserver::default())
    }
}

fn ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        if cancel.cancel(CancelReason::Interrupt) {
            tracing::info!("interrupt received, stopping");
        }
    })
    .context("failed to install Ctrl+C handler")
}
