//! Request controller
//!
//! Owns the single execution slot: the request state, the current response,
//! and the in-flight execution with its cancellation token. Executions run on
//! spawned tasks and hand their outcome back over a channel; the owner of the
//! controller applies them one at a time through [`RequestController::apply`].
//!
//! A second `send` while a request is in flight is rejected with
//! [`ApplicationError::Busy`]. Every execution carries an [`ExecutionId`];
//! outcomes that no longer match the in-flight execution are discarded.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use postline_domain::{
    DomainError, Environment, Request, RequestErrorKind, RequestState, Response,
};

use crate::error::{ApplicationError, ApplicationResult};
use crate::execute_request::{ExecuteRequest, ExecutionOutcome};
use crate::http::build_request;
use crate::ports::{CancellationToken, HttpClient};

/// Message shown when the resolved URL cannot be parsed.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL";

/// Monotonic identifier of one `send`.
pub type ExecutionId = u64;

/// Notifications emitted by the controller, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    /// The request was dispatched.
    InFlight {
        /// Request being executed
        request_id: Uuid,
        /// Execution identifier
        execution: ExecutionId,
    },
    /// The server answered.
    Completed {
        /// Request that was executed
        request_id: Uuid,
        /// The new current response
        response: Response,
    },
    /// The request failed; the current response carries the error.
    Failed {
        /// Request that was executed
        request_id: Uuid,
        /// Error category
        kind: RequestErrorKind,
        /// Human-readable message
        message: String,
    },
    /// The user cancelled the request.
    Cancelled {
        /// Request that was cancelled
        request_id: Uuid,
    },
}

/// Outcome of a spawned execution, on its way back to the controller.
#[derive(Debug)]
pub struct Completion {
    execution: ExecutionId,
    request_id: Uuid,
    outcome: ExecutionOutcome,
}

#[derive(Debug)]
struct InFlight {
    execution: ExecutionId,
    request_id: Uuid,
    cancel: CancellationToken,
}

/// Drives request execution for one response slot.
pub struct RequestController<C: HttpClient> {
    executor: ExecuteRequest<C>,
    state: RequestState,
    current_response: Option<Response>,
    in_flight: Option<InFlight>,
    last_execution: ExecutionId,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    subscribers: Vec<mpsc::UnboundedSender<RequestEvent>>,
}

impl<C: HttpClient> RequestController<C> {
    /// Creates an idle controller over the given client.
    pub fn new(client: Arc<C>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            executor: ExecuteRequest::new(client),
            state: RequestState::Idle,
            current_response: None,
            in_flight: None,
            last_execution: 0,
            completion_tx,
            completion_rx,
            subscribers: Vec::new(),
        }
    }

    /// Returns a receiver for every event emitted from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RequestEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    /// Returns the latest response, if any execution has produced one.
    #[must_use]
    pub const fn current_response(&self) -> Option<&Response> {
        self.current_response.as_ref()
    }

    /// Returns the id of the request currently in flight.
    #[must_use]
    pub fn in_flight_request(&self) -> Option<Uuid> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Builds and dispatches `request` against `environment`.
    ///
    /// Returns the event emitted synchronously: `InFlight` when dispatched,
    /// or `Failed` when the request could not be built (for an unparsable URL
    /// the message is `"Invalid URL"` and nothing is dispatched).
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// `ApplicationError::Busy` if a request is already in flight; no state
    /// changes in that case.
    pub fn send(
        &mut self,
        request: &Request,
        environment: Option<&Environment>,
    ) -> ApplicationResult<RequestEvent> {
        if let Some(in_flight) = &self.in_flight {
            tracing::warn!(
                request_id = %request.id,
                in_flight = %in_flight.request_id,
                "send rejected: request already in flight"
            );
            return Err(ApplicationError::Busy);
        }

        let transport = match build_request(request, environment) {
            Ok(transport) => transport,
            Err(DomainError::InvalidUrl(url)) => {
                tracing::info!(request_id = %request.id, url = %url, "invalid URL, not sending");
                return Ok(self.fail_before_dispatch(
                    request.id,
                    RequestErrorKind::InvalidUrl,
                    INVALID_URL_MESSAGE.to_string(),
                ));
            }
            Err(DomainError::InvalidHeaderName(name)) => {
                tracing::info!(
                    request_id = %request.id,
                    header = %name,
                    "invalid header name, not sending"
                );
                return Ok(self.fail_before_dispatch(
                    request.id,
                    RequestErrorKind::InvalidHeader,
                    format!("Invalid header name: {name}"),
                ));
            }
            Err(other) => return Err(other.into()),
        };

        self.last_execution += 1;
        let execution = self.last_execution;
        let (cancel, receiver) = CancellationToken::new();
        self.in_flight = Some(InFlight {
            execution,
            request_id: request.id,
            cancel,
        });
        self.state = RequestState::in_flight();

        tracing::info!(
            request_id = %request.id,
            execution,
            method = %transport.method,
            url = %transport.url,
            "sending request"
        );

        let executor = self.executor.clone();
        let tx = self.completion_tx.clone();
        let request_id = request.id;
        tokio::spawn(async move {
            let outcome = executor.execute_with_cancellation(transport, receiver).await;
            // The controller may have been dropped; nothing left to notify.
            let _ = tx.send(Completion {
                execution,
                request_id,
                outcome,
            });
        });

        let event = RequestEvent::InFlight {
            request_id,
            execution,
        };
        self.emit(&event);
        Ok(event)
    }

    /// Cancels the in-flight execution of `request_id`.
    ///
    /// Returns false, changing nothing, if that request is not in flight
    /// (including when its completion was already applied). The current
    /// response is never touched by cancellation.
    pub fn cancel(&mut self, request_id: Uuid) -> bool {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.request_id == request_id);
        if !matches {
            tracing::debug!(request_id = %request_id, "cancel ignored: not in flight");
            return false;
        }
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
            tracing::info!(
                request_id = %request_id,
                execution = in_flight.execution,
                "request cancelled"
            );
        }
        self.state = RequestState::Cancelled;
        self.emit(&RequestEvent::Cancelled { request_id });
        true
    }

    /// Applies a completion to the state.
    ///
    /// Returns `None` if the completion is stale: it belongs to an execution
    /// that was cancelled or is otherwise no longer in flight.
    pub fn apply(&mut self, completion: Completion) -> Option<RequestEvent> {
        let current = self.in_flight.as_ref().map(|f| f.execution);
        if current != Some(completion.execution) {
            tracing::debug!(
                request_id = %completion.request_id,
                execution = completion.execution,
                "discarding stale completion"
            );
            return None;
        }
        self.in_flight = None;

        let request_id = completion.request_id;
        let state = completion.outcome.to_request_state();
        let event = match completion.outcome {
            ExecutionOutcome::Completed(response) => {
                tracing::info!(
                    request_id = %request_id,
                    status = response.status_code,
                    elapsed_ms = response
                        .elapsed
                        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
                    size = response.size_bytes,
                    "request completed"
                );
                self.current_response = Some(response.clone());
                RequestEvent::Completed {
                    request_id,
                    response,
                }
            }
            ExecutionOutcome::Failed { error, response } => {
                tracing::warn!(request_id = %request_id, error = %error, "request failed");
                self.current_response = Some(response);
                RequestEvent::Failed {
                    request_id,
                    kind: error.to_error_kind(),
                    message: error.to_string(),
                }
            }
            ExecutionOutcome::Cancelled => {
                tracing::info!(request_id = %request_id, "request cancelled by transport");
                RequestEvent::Cancelled { request_id }
            }
        };
        self.state = state;
        self.emit(&event);
        Some(event)
    }

    /// Waits for the in-flight execution to finish and applies it.
    ///
    /// Returns `None` immediately when nothing is in flight. Stale
    /// completions received while waiting are discarded.
    pub async fn next_completion(&mut self) -> Option<RequestEvent> {
        loop {
            if self.in_flight.is_none() {
                while let Ok(stale) = self.completion_rx.try_recv() {
                    let _ = self.apply(stale);
                }
                return None;
            }
            let completion = self.completion_rx.recv().await?;
            if let Some(event) = self.apply(completion) {
                return Some(event);
            }
        }
    }

    fn fail_before_dispatch(
        &mut self,
        request_id: Uuid,
        kind: RequestErrorKind,
        message: String,
    ) -> RequestEvent {
        self.current_response = Some(Response::failure(message.clone(), None));
        self.state = RequestState::failed(kind, message.clone());
        let event = RequestEvent::Failed {
            request_id,
            kind,
            message,
        };
        self.emit(&event);
        event
    }

    fn emit(&mut self, event: &RequestEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
