//! Pipeline wiring: generator -> worker pool -> output sink -> final sort.

use std::thread::ScopedJoinHandle;
use std::time::Instant;

use num_bigint::BigUint;
use tracing::info;

use primegen_core::constants::SEED_PRIMES;
use primegen_core::error::PrimeError;
use primegen_core::final_sort::FinalSortPass;
use primegen_core::generator::CandidateGenerator;
use primegen_core::observer::ProgressObserver;
use primegen_core::options::Options;
use primegen_core::primality::PrimalityTester;
use primegen_core::progress::CancellationToken;
use primegen_core::sink::OutputSink;
use primegen_core::worker::{PrimalityWorker, WorkerReport};

use crate::interfaces::{RunReport, Termination};

/// Run the whole pipeline to completion or cancellation.
///
/// Options are validated and the sink's file opened before any thread
/// starts. The candidate queue holds `buffer_size` entries and the prime
/// queue twice that. Workers are joined before the prime queue closes, and
/// the sink is joined before the optional final sort runs.
pub fn run_pipeline(
    opts: &Options,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Result<RunReport, PrimeError> {
    opts.validate()?;
    let start_time = Instant::now();

    let sink_path = opts.sink_path();
    // The presorted file holds only this run's primes; the plain output
    // accumulates across runs.
    let sink = if opts.final_sort {
        OutputSink::create_truncated(&sink_path, opts.buffer_size, &opts.max_primes, observer)?
    } else {
        OutputSink::create(&sink_path, opts.buffer_size, &opts.max_primes, observer)?
    };

    let (candidate_tx, candidate_rx) = crossbeam_channel::bounded::<BigUint>(opts.buffer_size);
    let (prime_tx, prime_rx) =
        crossbeam_channel::bounded::<BigUint>(opts.buffer_size.saturating_mul(2));

    if opts.needs_seed_primes() {
        for seed in SEED_PRIMES {
            prime_tx
                .send(BigUint::from(seed))
                .map_err(|_| PrimeError::Worker("prime queue closed before start".into()))?;
        }
    }

    let mut generator = CandidateGenerator::new(opts.start.clone());
    if let Some(max) = &opts.max_candidate {
        generator = generator.with_ceiling(max.clone());
    }
    let tester = PrimalityTester::from_options(opts);

    info!(
        start = %opts.start,
        target = %opts.max_primes,
        workers = opts.workers,
        buffer = opts.buffer_size,
        fast = opts.probabilistic,
        "starting prime search"
    );

    let (generator_report, worker_results, sink_result) = std::thread::scope(|s| {
        let sink_handle = s.spawn(move || sink.run(prime_rx, cancel));
        let generator_handle = s.spawn(move || generator.run(candidate_tx, cancel));

        let worker_handles: Vec<_> = (0..opts.workers)
            .map(|id| {
                let worker = PrimalityWorker::new(id, tester.clone());
                let candidates = candidate_rx.clone();
                let primes = prime_tx.clone();
                s.spawn(move || worker.run(candidates, primes, cancel))
            })
            .collect();
        // Workers hold the only receivers now, so the generator notices if
        // they all stop.
        drop(candidate_rx);

        let generator_report = join(generator_handle, "generator");
        let worker_results: Vec<Result<WorkerReport, PrimeError>> = worker_handles
            .into_iter()
            .map(|h| join(h, "worker").and_then(|r| r))
            .collect();
        info!("worker threads finished");

        drop(prime_tx);
        let sink_result = join(sink_handle, "sink").and_then(|r| r);
        info!("finished writing values to disk");

        (generator_report, worker_results, sink_result)
    });

    let generator_report = generator_report?;
    let workers = worker_results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let sink_report = sink_result?;

    let final_sorted = if opts.final_sort {
        let pass = FinalSortPass::new(opts.final_sort_chunk);
        Some(pass.run(&sink_path, &opts.output)?)
    } else {
        None
    };

    let termination = Termination::classify(cancel.reason(), generator_report.status);
    Ok(RunReport {
        termination,
        total: sink_report.total,
        generated: generator_report.emitted,
        workers,
        flushes: sink_report.flushes,
        final_sorted,
        output: opts.output.clone(),
        duration: start_time.elapsed(),
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, T>, role: &str) -> Result<T, PrimeError> {
    handle
        .join()
        .map_err(|_| PrimeError::Worker(format!("{role} thread panicked")))
}
