//! Output sink: buffers confirmed primes, sorts each window, appends to disk.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crossbeam_channel::Receiver;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::error::PrimeError;
use crate::observer::ProgressObserver;
use crate::progress::{CancelReason, CancellationToken, ProgressUpdate};
use crate::sort::insertion_sort;

/// Terminal report of the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    /// Primes written.
    pub total: u64,
    /// Number of sort-and-write windows.
    pub flushes: u64,
    /// Whether this sink set the cancellation token.
    pub raised_cancellation: bool,
    /// File the primes were appended to.
    pub path: PathBuf,
}

/// Consumer of the confirmed-prime queue.
///
/// Each flush sorts only the current buffer, so the file is ordered within
/// a window but not necessarily across windows.
pub struct OutputSink<'a, W: Write = File> {
    writer: BufWriter<W>,
    path: PathBuf,
    buffer: Vec<BigUint>,
    capacity: usize,
    target: Option<u64>,
    total: u64,
    flushes: u64,
    observer: &'a dyn ProgressObserver,
}

impl<'a> OutputSink<'a, File> {
    /// Open `path` for appending (creating it if needed).
    pub fn create(
        path: &Path,
        capacity: usize,
        target: &BigUint,
        observer: &'a dyn ProgressObserver,
    ) -> Result<Self, PrimeError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| PrimeError::io(path, e))?;
        Ok(Self::from_writer(file, path, capacity, target, observer))
    }

    /// Open `path` empty, discarding anything a previous run left there.
    pub fn create_truncated(
        path: &Path,
        capacity: usize,
        target: &BigUint,
        observer: &'a dyn ProgressObserver,
    ) -> Result<Self, PrimeError> {
        let file = File::create(path).map_err(|e| PrimeError::io(path, e))?;
        Ok(Self::from_writer(file, path, capacity, target, observer))
    }
}

impl<'a, W: Write> OutputSink<'a, W> {
    /// Build a sink over an arbitrary writer; `path` labels errors and the report.
    pub fn from_writer(
        writer: W,
        path: &Path,
        capacity: usize,
        target: &BigUint,
        observer: &'a dyn ProgressObserver,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            writer: BufWriter::new(writer),
            path: path.to_path_buf(),
            buffer: Vec::with_capacity(capacity),
            capacity,
            target: target.to_u64(),
            total: 0,
            flushes: 0,
            observer,
        }
    }

    /// Drain `primes` until it closes or the target count is reached.
    pub fn run(
        mut self,
        primes: Receiver<BigUint>,
        cancel: &CancellationToken,
    ) -> Result<SinkReport, PrimeError> {
        let target = self.target.unwrap_or(u64::MAX);
        let mut raised_cancellation = false;

        for prime in &primes {
            self.buffer.push(prime);
            self.total += 1;
            self.observer
                .on_progress(&ProgressUpdate::new(self.total, target));

            if self.target.is_some_and(|t| self.total >= t) {
                raised_cancellation = cancel.cancel(CancelReason::TargetReached);
                info!(total = self.total, "found max num primes");
                break;
            }
            if self.buffer.len() >= self.capacity {
                self.flush()?;
            }
        }
        drop(primes);

        self.flush()?;
        self.observer
            .on_progress(&ProgressUpdate::done(self.total, target));
        info!(total = self.total, flushes = self.flushes, path = %self.path.display(), "wrote primes");

        Ok(SinkReport {
            total: self.total,
            flushes: self.flushes,
            raised_cancellation,
            path: self.path,
        })
    }

    fn flush(&mut self) -> Result<(), PrimeError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        insertion_sort(&mut self.buffer);
        for prime in &self.buffer {
            writeln!(self.writer, "{prime}").map_err(|e| PrimeError::io(&self.path, e))?;
        }
        self.writer
            .flush()
            .map_err(|e| PrimeError::io(&self.path, e))?;
        self.flushes += 1;
        debug!(
            count = self.buffer.len(),
            flushes = self.flushes,
            "flushed sorted window"
        );
        self.buffer.clear();
        Ok(())
    }
}
