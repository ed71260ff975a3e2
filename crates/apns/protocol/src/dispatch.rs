//! Batched concurrent dispatch engine.
//!
//! Owns the message queue and the reject-listener list, fans a batch out
//! over a bounded pool of in-flight requests, and routes each terminal
//! outcome back to its originating message by stable queue index.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use apns_core::{
    ApnsError, DispatchOutcome, DispatchReport, Notification, QueuedMessage, Receiver,
    RejectEvent, Request, Response, SendError, TransportError,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::{ExceptionFactory, HttpSender, RejectListener, RequestBuilder};

/// Dispatch pool configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of simultaneously in-flight requests.
    pub concurrency: usize,
    /// Optional whole-batch deadline. Requests still pending when it
    /// elapses are aborted and reported as transport failures.
    pub deadline: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 50,
            deadline: None,
        }
    }
}

/// HTTP/2 push dispatcher.
///
/// Messages accumulate via [`add_message`](Self::add_message) and are
/// dispatched as one batch by [`send`](Self::send). The queue and the
/// listener list belong to a single dispatch cycle; neither is safe to
/// share across threads.
pub struct HttpProtocol<S> {
    sender: Arc<S>,
    builder: RequestBuilder,
    exception_factory: Box<dyn ExceptionFactory>,
    listeners: Vec<Box<dyn RejectListener>>,
    queue: Vec<QueuedMessage>,
    config: DispatchConfig,
    closed: bool,
}

impl<S: HttpSender + 'static> HttpProtocol<S> {
    /// Create a dispatcher with the default configuration.
    pub fn new(
        sender: S,
        builder: RequestBuilder,
        exception_factory: impl ExceptionFactory + 'static,
    ) -> Self {
        Self::with_config(sender, builder, exception_factory, DispatchConfig::default())
    }

    /// Create a dispatcher with an explicit configuration.
    pub fn with_config(
        sender: S,
        builder: RequestBuilder,
        exception_factory: impl ExceptionFactory + 'static,
        config: DispatchConfig,
    ) -> Self {
        Self {
            sender: Arc::new(sender),
            builder,
            exception_factory: Box::new(exception_factory),
            listeners: Vec::new(),
            queue: Vec::new(),
            config,
            closed: false,
        }
    }

    /// Append a message to the queue.
    pub fn add_message(
        &mut self,
        receiver: Receiver,
        notification: Notification,
        sandbox: bool,
    ) -> Result<(), SendError> {
        if self.closed {
            return Err(SendError::Closed);
        }
        self.queue.push(QueuedMessage {
            receiver,
            notification,
            sandbox,
        });
        Ok(())
    }

    /// Register an observer for rejected and failed messages.
    ///
    /// Listeners are invoked synchronously, in registration order, once
    /// per non-delivered message.
    pub fn add_reject_listener(&mut self, listener: impl RejectListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of messages currently queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch every queued message and wait for all of them to reach a
    /// terminal state.
    ///
    /// Per-message failures never surface as errors here; they are
    /// reported through the returned [`DispatchReport`] and the reject
    /// listeners. The queue is drained, except that messages whose
    /// request could not be built are retained for a later retry.
    pub async fn send(&mut self) -> Result<DispatchReport, SendError> {
        if self.closed {
            return Err(SendError::Closed);
        }
        if self.config.concurrency == 0 {
            return Err(SendError::Setup(
                "concurrency ceiling must be nonzero".to_string(),
            ));
        }

        let batch = std::mem::take(&mut self.queue);
        let total = batch.len();
        let mut outcomes: Vec<Option<DispatchOutcome>> = vec![None; total];

        tracing::info!(
            total,
            concurrency = self.config.concurrency,
            "dispatching batch"
        );

        // Build phase. A failed build becomes that message's outcome and
        // the message goes back on the queue; the rest of the batch is
        // unaffected.
        let mut requests: Vec<(usize, Request)> = Vec::with_capacity(total);
        let mut retained: Vec<QueuedMessage> = Vec::new();
        for (index, message) in batch.iter().enumerate() {
            match self.builder.build(message) {
                Ok(request) => requests.push((index, request)),
                Err(error) => {
                    tracing::warn!(index, error = %error, "failed to build request");
                    let outcome = DispatchOutcome::TransportFailed(TransportError::Build(error));
                    self.route(index, message, None, &outcome);
                    outcomes[index] = Some(outcome);
                    retained.push(message.clone());
                }
            }
        }

        // Fan-out phase. Each task captures its queue index, so
        // correlation survives out-of-order completion.
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut join_set: JoinSet<(usize, Result<Response, TransportError>)> = JoinSet::new();
        for (index, request) in requests {
            let sender = Arc::clone(&self.sender);
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, Err(TransportError::Closed));
                };
                (index, sender.send(request).await)
            });
        }

        let deadline = self.config.deadline;
        let drain = async {
            while let Some(joined) = join_set.join_next().await {
                // A panicked request task loses its index; the slot is
                // filled after the loop.
                let Ok((index, result)) = joined else { continue };
                let (outcome, response) = self.classify(index, result);
                self.route(index, &batch[index], response.as_ref(), &outcome);
                outcomes[index] = Some(outcome);
            }
        };
        match deadline {
            Some(deadline) => {
                if tokio::time::timeout(deadline, drain).await.is_err() {
                    tracing::warn!(deadline_ms = deadline.as_millis() as u64, "batch deadline exceeded");
                    join_set.abort_all();
                }
            }
            None => drain.await,
        }

        // Every message gets exactly one outcome, aborted or not.
        for (index, slot) in outcomes.iter_mut().enumerate() {
            if slot.is_none() {
                let error = if deadline.is_some() {
                    TransportError::DeadlineExceeded
                } else {
                    TransportError::Protocol("request task failed".to_string())
                };
                let outcome = DispatchOutcome::TransportFailed(error);
                self.route(index, &batch[index], None, &outcome);
                *slot = Some(outcome);
            }
        }

        self.queue.extend(retained);

        let report = DispatchReport {
            outcomes: outcomes.into_iter().flatten().collect(),
        };
        tracing::info!(
            delivered = report.delivered(),
            rejected = report.rejected(),
            transport_failed = report.transport_failed(),
            "batch complete"
        );
        Ok(report)
    }

    /// Release the underlying transport. Idempotent; a closed dispatcher
    /// fails fast on `add_message` and `send`.
    pub fn close_connection(&mut self) {
        if !self.closed {
            self.sender.close();
            self.closed = true;
        }
    }

    fn classify(
        &self,
        index: usize,
        result: Result<Response, TransportError>,
    ) -> (DispatchOutcome, Option<Response>) {
        match result {
            Ok(response) => {
                if response.is_success() {
                    match self.exception_factory.create(&response) {
                        None => {
                            tracing::debug!(index, "notification delivered");
                            (DispatchOutcome::Delivered, Some(response))
                        }
                        Some(error) => {
                            tracing::warn!(index, error = %error, "notification rejected");
                            (DispatchOutcome::Rejected(error), Some(response))
                        }
                    }
                } else {
                    let error = self.exception_factory.create(&response).unwrap_or_else(|| {
                        ApnsError::Unknown {
                            status: response.status,
                            reason: response.body.clone(),
                        }
                    });
                    tracing::warn!(index, status = response.status, error = %error, "notification rejected");
                    (DispatchOutcome::Rejected(error), Some(response))
                }
            }
            Err(error) => {
                tracing::warn!(index, error = %error, "transport failure");
                (DispatchOutcome::TransportFailed(error), None)
            }
        }
    }

    fn route(
        &self,
        index: usize,
        message: &QueuedMessage,
        response: Option<&Response>,
        outcome: &DispatchOutcome,
    ) {
        if outcome.is_delivered() {
            return;
        }
        let event = RejectEvent {
            index,
            message,
            response,
            outcome,
        };
        for listener in &self.listeners {
            // A listener must not take the rest of the dispatch down.
            if catch_unwind(AssertUnwindSafe(|| listener.on_reject(&event))).is_err() {
                tracing::error!(index, "reject listener panicked");
            }
        }
    }
}
