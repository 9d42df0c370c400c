//! Per-participant inbound mailbox.
//!
//! A [`Mailbox`] is a small bounded buffer with an explicit open/closed
//! flag. Fan-out writes into it without ever waiting; the owning
//! participant drains it with a long-poll [`Mailbox::recv`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, mpsc};

use super::ChatMessage;

/// Outcome of a single long-poll receive.
///
/// Exactly one of the three is produced per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A message was taken from the mailbox.
    Message(ChatMessage),
    /// The mailbox was closed because its owner left.
    Closed,
    /// The wait elapsed with neither a message nor a close.
    TimedOut,
}

/// Bounded inbound buffer owned by one registry entry.
///
/// # Concurrency
///
/// - Any number of producers may call [`Mailbox::try_deliver`]; it never
///   suspends.
/// - Concurrent [`Mailbox::recv`] calls are serialized on the receiver
///   half, so each buffered message is handed out once. A call still
///   queued for the receiver half observes a close without waiting for
///   the current holder to finish.
/// - The open → closed transition is one-way.
#[derive(Debug)]
pub struct Mailbox {
    sender: mpsc::Sender<ChatMessage>,
    receiver: Mutex<mpsc::Receiver<ChatMessage>>,
    closed: AtomicBool,
    close_notify: Notify,
}

impl Mailbox {
    /// Largest number of pending messages a mailbox may hold.
    pub const MAX_CAPACITY: usize = 4096;

    /// Creates an open mailbox holding at most `capacity` pending messages.
    ///
    /// `capacity` is clamped to `1..=`[`Mailbox::MAX_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.clamp(1, Self::MAX_CAPACITY));
        Self {
            sender,
            receiver: Mutex::new(receiver),
            closed: AtomicBool::new(false),
            close_notify: Notify::new(),
        }
    }

    /// Attempts to enqueue `message` without waiting.
    ///
    /// Returns `false` if the buffer is full or the mailbox is closed; the
    /// message is then dropped for this mailbox only.
    pub fn try_deliver(&self, message: &ChatMessage) -> bool {
        if self.is_closed() {
            return false;
        }
        self.sender.try_send(message.clone()).is_ok()
    }

    /// Waits up to `wait` for the next message.
    ///
    /// Closing takes priority over buffered messages. A timeout never
    /// consumes a message: one that arrives afterwards stays buffered for
    /// the next call.
    pub async fn recv(&self, wait: Duration) -> Delivery {
        let attempt = async {
            let mut receiver = tokio::select! {
                biased;
                () = self.wait_closed() => return Delivery::Closed,
                receiver = self.receiver.lock() => receiver,
            };
            tokio::select! {
                biased;
                () = self.wait_closed() => Delivery::Closed,
                message = receiver.recv() => match message {
                    Some(message) if !self.is_closed() => Delivery::Message(message),
                    _ => Delivery::Closed,
                },
            }
        };
        tokio::time::timeout(wait, attempt)
            .await
            .unwrap_or(Delivery::TimedOut)
    }

    /// Closes the mailbox and wakes every pending [`Mailbox::recv`].
    ///
    /// Returns `true` if this call performed the transition.
    pub fn close(&self) -> bool {
        let was_open = !self.closed.swap(true, Ordering::SeqCst);
        if was_open {
            self.close_notify.notify_waiters();
        }
        was_open
    }

    /// Returns `true` once the mailbox has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Returns the number of buffered, not yet received messages.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.sender
            .max_capacity()
            .saturating_sub(self.sender.capacity())
    }

    async fn wait_closed(&self) {
        loop {
            // Registered on creation, so a close between the check and the
            // await is not lost.
            let notified = self.close_notify.notified();
            if self.is_closed() {
                return;
            }
            notified.await;
        }
    }
}
