//! Fan-in of worker results.
//!
//! Workers push matches into clones of one crossbeam sender. The sink is
//! drained exactly once, by value, after every worker has been joined, so
//! callers never observe a partially filled result.

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Multi-producer, single-consumer hand-off for partial results.
pub struct ResultSink<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> ResultSink<T> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// A sender for one worker. Dropping it signals nothing by itself; the
    /// join on the workers is the completion signal.
    ///
    /// Sends succeed for as long as the sink is alive, since the sink owns
    /// the receiver. After [`drain`](Self::drain) they fail.
    pub fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }

    /// Take every queued result.
    ///
    /// Must only be called once all producers have finished (after the
    /// join). Order across producers is unspecified.
    pub fn drain(self) -> Vec<T> {
        let Self { sender, receiver } = self;
        drop(sender);
        receiver.try_iter().collect()
    }
}

impl<T> Default for ResultSink<T> {
    fn default() -> Self {
        Self::new()
    }
}
