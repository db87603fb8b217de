//! CLI result presenter and progress reporter.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use primegen_core::observer::ProgressObserver;
use primegen_core::progress::ProgressUpdate;
use primegen_orchestration::interfaces::{ResultPresenter, RunReport, Termination};

use crate::output::{format_duration, format_number, format_rate};
use crate::ui;

/// Progress bar toward the target prime count.
pub struct CLIProgressReporter {
    bar: ProgressBar,
}

impl CLIProgressReporter {
    /// Create a reporter for `target` primes; hidden when `quiet`.
    #[must_use]
    pub fn new(target: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(Some(target), ProgressDrawTarget::stderr());
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} primes ({per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
            bar.set_style(style);
            bar
        };
        Self { bar }
    }
}

impl ProgressObserver for CLIProgressReporter {
    fn on_progress(&self, update: &ProgressUpdate) {
        self.bar.set_position(update.found);
        if update.done {
            self.bar.finish_and_clear();
        }
    }
}

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_report(&self, report: &RunReport) {
        if self.quiet {
            println!("{}", report.total);
            return;
        }

        match report.termination {
            Termination::TargetReached => ui::print_success(report.termination.message()),
            Termination::Interrupted | Termination::RangeExhausted => {
                ui::print_notice(report.termination.message());
            }
        }
        println!("Wrote {} primes.", format_number(report.total));
        println!("Output: {}", report.output.display());
        let order = if report.is_exactly_sorted() {
            "exact"
        } else {
            "per flush window"
        };
        println!("Ordering: {order}");
        match format_rate(report.total, report.duration) {
            Some(rate) => println!("Duration: {} ({rate})", format_duration(report.duration)),
            None => println!("Duration: {}", format_duration(report.duration)),
        }

        if self.verbose {
            println!("\nPipeline:");
            println!("{:-<60}", "");
            println!("  Candidates generated: {}", format_number(report.generated));
            println!("  Candidates tested:    {}", format_number(report.tested()));
            println!("  Sink flushes:         {}", format_number(report.flushes));
            for worker in &report.workers {
                println!(
                    "  worker {:<3} tested {:>12} found {:>12}{}",
                    worker.id,
                    format_number(worker.tested),
                    format_number(worker.found),
                    if worker.cancelled { " [cancelled]" } else { "" },
                );
            }
        }
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}
