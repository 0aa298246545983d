//! Reactive read stream for repository state.
//!
//! Subscribers receive the tri-state [`Outcome`] over a channel: a
//! `Loading` marker first, then a `Success` snapshot notice, then one
//! notice per committed mutation. Senders that hang up are dropped on
//! the next publish.

use std::sync::mpsc::{channel, Receiver, Sender};

use growfund_core::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which slice of the fund a committed mutation touched.
pub enum ChangeScope {
    Fund,
    Shareholders,
    Deposits,
    Borrowings,
    Repayments,
    Penalties,
    Investments,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One emission of the read stream.
pub struct ChangeNotice {
    pub revision: u64,
    pub scope: ChangeScope,
}

/// Fan-out of change notices to any number of subscribers.
#[derive(Default)]
pub struct ChangeFeed {
    revision: u64,
    subscribers: Vec<Sender<Outcome<ChangeNotice>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a subscriber. The receiver immediately observes
    /// `Loading` followed by a snapshot of the current revision.
    pub fn subscribe(&mut self) -> Receiver<Outcome<ChangeNotice>> {
        let (tx, rx) = channel();
        let _ = tx.send(Outcome::Loading);
        let _ = tx.send(Outcome::Success(ChangeNotice {
            revision: self.revision,
            scope: ChangeScope::Fund,
        }));
        self.subscribers.push(tx);
        rx
    }

    /// Publishes a committed mutation to every live subscriber.
    pub fn publish(&mut self, scope: ChangeScope) -> ChangeNotice {
        self.revision += 1;
        let notice = ChangeNotice {
            revision: self.revision,
            scope,
        };
        self.subscribers
            .retain(|tx| tx.send(Outcome::Success(notice)).is_ok());
        notice
    }

    /// Surfaces a failed operation to subscribers without bumping the
    /// revision; the stored state did not change.
    pub fn publish_error(&mut self, message: &str) {
        let message = message.to_string();
        self.subscribers
            .retain(|tx| tx.send(Outcome::Error(message.clone())).is_ok());
    }
}
