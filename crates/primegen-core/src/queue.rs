//! Queue operations that give way to cancellation.

use crossbeam_channel::{select, Receiver, Sender};

use crate::progress::CancellationToken;

/// Outcome of a queue operation raced against cancellation.
#[derive(Debug, PartialEq, Eq)]
pub enum Wait<T> {
    /// The operation completed.
    Ready(T),
    /// The other side of the queue is gone.
    Closed,
    /// Cancellation was observed first.
    Cancelled,
}

/// Send `value`, blocking while the queue is full unless cancelled first.
pub fn send_or_cancel<T>(tx: &Sender<T>, value: T, cancel: &CancellationToken) -> Wait<()> {
    if cancel.is_cancelled() {
        return Wait::Cancelled;
    }
    select! {
        send(tx, value) -> res => match res {
            Ok(()) => Wait::Ready(()),
            Err(_) => Wait::Closed,
        },
        recv(cancel.signal()) -> _ => Wait::Cancelled,
    }
}

/// Receive a value, blocking while the queue is empty unless cancelled first.
pub fn recv_or_cancel<T>(rx: &Receiver<T>, cancel: &CancellationToken) -> Wait<T> {
    if cancel.is_cancelled() {
        return Wait::Cancelled;
    }
    select! {
        recv(rx) -> msg => match msg {
            Ok(value) => Wait::Ready(value),
            Err(_) => Wait::Closed,
        },
        recv(cancel.signal()) -> _ => Wait::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CancelReason;
    use std::time::Duration;

    #[test]
    fn send_and_recv_when_ready() {
        let cancel = CancellationToken::new();
        let (tx, rx) = crossbeam_channel::bounded(1);
        assert_eq!(send_or_cancel(&tx, 7u32, &cancel), Wait::Ready(()));
        assert_eq!(recv_or_cancel(&rx, &cancel), Wait::Ready(7));
    }

    #[test]
    fn recv_reports_closed_after_drain() {
        let cancel = CancellationToken::new();
        let (tx, rx) = crossbeam_channel::bounded(2);
        tx.send(1u32).unwrap();
        drop(tx);
        assert_eq!(recv_or_cancel(&rx, &cancel), Wait::Ready(1));
        assert_eq!(recv_or_cancel(&rx, &cancel), Wait::Closed);
    }

    #[test]
    fn send_reports_closed_without_receiver() {
        let cancel = CancellationToken::new();
        let (tx, rx) = crossbeam_channel::bounded::<u32>(1);
        drop(rx);
        assert_eq!(send_or_cancel(&tx, 1, &cancel), Wait::Closed);
    }

    #[test]
    fn cancelled_token_wins_over_ready_queue() {
        let cancel = CancellationToken::new();
        cancel.cancel(CancelReason::Interrupt);
        let (tx, rx) = crossbeam_channel::bounded(1);
        assert_eq!(send_or_cancel(&tx, 1u32, &cancel), Wait::Cancelled);
        tx.send(2).unwrap();
        assert_eq!(recv_or_cancel(&rx, &cancel), Wait::Cancelled);
    }

    #[test]
    fn cancel_unblocks_full_queue() {
        let cancel = CancellationToken::new();
        let (tx, _rx) = crossbeam_channel::bounded(1);
        tx.send(0u32).unwrap();
        let waiter = cancel.clone();
        let handle = std::thread::spawn(move || send_or_cancel(&tx, 1, &waiter));
        std::thread::sleep(Duration::from_millis(20));
        cancel.cancel(CancelReason::Interrupt);
        assert_eq!(handle.join().unwrap(), Wait::Cancelled);
    }

    #[test]
    fn cancel_unblocks_empty_queue() {
        let cancel = CancellationToken::new();
        let (_tx, rx) = crossbeam_channel::bounded::<u32>(1);
        let waiter = cancel.clone();
        let handle = std::thread::spawn(move || recv_or_cancel(&rx, &waiter));
        std::thread::sleep(Duration::from_millis(20));
        cancel.cancel(CancelReason::TargetReached);
        assert_eq!(handle.join().unwrap(), Wait::Cancelled);
    }
}
