//! Trailing-edge debouncing of raw search input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Value that survived the debounce delay, tagged with its generation.
#[derive(Debug)]
pub struct Debounced<T> {
    generation: u64,
    value: T,
}

/// Trailing-edge debouncer.
///
/// Every `push` cancels the pending timer and starts a new one; only a value
/// left alone for the full delay is delivered on the output channel. The
/// generation counter makes cancellation race-free: a timer that fired just
/// before it was aborted carries an old generation and `accept` rejects it.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    output: mpsc::UnboundedSender<Debounced<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, output: mpsc::UnboundedSender<Debounced<T>>) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            output,
        }
    }

    /// Restarts the timer with `value` as the candidate emission.
    pub fn push(&mut self, value: T) {
        self.supersede();

        let generation = self.generation;
        let delay = self.delay;
        let output = self.output.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = output.send(Debounced { generation, value });
        }));
    }

    /// Unwraps an emission if it belongs to the current timer.
    ///
    /// Each generation is accepted at most once.
    pub fn accept(&mut self, debounced: Debounced<T>) -> Option<T> {
        if debounced.generation != self.generation || self.pending.is_none() {
            tracing::trace!(
                generation = debounced.generation,
                current = self.generation,
                "Dropping superseded debounce emission"
            );
            return None;
        }
        self.pending = None;
        Some(debounced.value)
    }

    /// Drops the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.supersede();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn supersede(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
        self.generation += 1;
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_only_last_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        for term in ["d", "du", "dun"] {
            debouncer.push(term.to_string());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        let last_push = Instant::now();
        debouncer.push("dune".to_string());

        let emission = rx.recv().await.unwrap();
        assert!(last_push.elapsed() >= DELAY);
        assert_eq!(debouncer.accept(emission), Some("dune".to_string()));
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_values_each_emit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.push("alien");
        let first = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(first), Some("alien"));

        debouncer.push("aliens");
        let second = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(second), Some("aliens"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_emission_raced_by_new_push_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.push("dun");
        let fired = rx.recv().await.unwrap();

        // Input arrived after the timer fired but before the emission was handled.
        debouncer.push("dune");
        assert_eq!(debouncer.accept(fired), None);

        let latest = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(latest), Some("dune"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.push("dune");
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(DELAY * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Debounced<&str>>();
        let mut debouncer = Debouncer::new(DELAY, tx);
        debouncer.push("dune");
        drop(debouncer);

        assert!(rx.recv().await.is_none());
    }
}
