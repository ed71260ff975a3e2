//! Per-message dispatch outcomes and reject events.

use crate::{ApnsError, QueuedMessage, Response, TransportError};

/// Terminal state of one queued message after a dispatch cycle.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// APNs accepted the notification.
    Delivered,
    /// APNs rejected the notification at the application level.
    Rejected(ApnsError),
    /// The request failed below the application level (build, connection,
    /// timeout, protocol, deadline).
    TransportFailed(TransportError),
}

impl DispatchOutcome {
    /// Whether the message was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Event handed to reject listeners for each rejected or failed message.
#[derive(Debug)]
pub struct RejectEvent<'a> {
    /// Position of the message in the dispatched batch.
    pub index: usize,
    /// The originating message.
    pub message: &'a QueuedMessage,
    /// The APNs response, when one was received.
    pub response: Option<&'a Response>,
    /// The classified outcome (never `Delivered`).
    pub outcome: &'a DispatchOutcome,
}

/// Result of one dispatch cycle: one outcome per queued message, in queue
/// order regardless of completion order.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Outcomes indexed by original queue position.
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// Number of delivered messages.
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Number of application-level rejections.
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::Rejected(_)))
            .count()
    }

    /// Number of transport-level failures.
    pub fn transport_failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DispatchOutcome::TransportFailed(_)))
            .count()
    }

    /// Whether every message was delivered.
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_delivered())
    }
}
