//! Execute Request Use Case
//!
//! Dispatches a built transport request through the `HttpClient` port,
//! times it, and normalizes the result into a `Response`.

use std::sync::Arc;
use std::time::Instant;

use postline_domain::{RequestState, Response, TransportRequest, TransportResponse};

use crate::ports::{CancellationReceiver, HttpClient, HttpClientError};

/// How an execution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The server answered (any status).
    Completed(Response),
    /// The transport failed. The response carries the message and elapsed time.
    Failed {
        /// Transport error
        error: HttpClientError,
        /// Failure response to show
        response: Response,
    },
    /// The caller cancelled before an answer arrived.
    Cancelled,
}

impl ExecutionOutcome {
    /// Converts the outcome to the state it leads to, if any.
    ///
    /// Cancellation returns `RequestState::Cancelled`; the current response is
    /// left untouched by callers in that case.
    #[must_use]
    pub fn to_request_state(&self) -> RequestState {
        match self {
            Self::Completed(response) => RequestState::completed(response.clone()),
            Self::Failed { error, .. } => {
                RequestState::failed(error.to_error_kind(), error.to_string())
            }
            Self::Cancelled => RequestState::Cancelled,
        }
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new(&settings)?));
/// let outcome = use_case.execute(build_request(&request, env)?).await;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Clone for ExecuteRequest<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request to completion.
    pub async fn execute(&self, request: TransportRequest) -> ExecutionOutcome {
        let started = Instant::now();
        let result = self.client.execute(request).await;
        Self::finish(result, started)
    }

    /// Executes the request, racing it against `cancel`.
    ///
    /// If cancellation wins, the transport future is dropped and no response
    /// is produced.
    pub async fn execute_with_cancellation(
        &self,
        request: TransportRequest,
        mut cancel: CancellationReceiver,
    ) -> ExecutionOutcome {
        let started = Instant::now();
        tokio::select! {
            biased;
            () = cancel.cancelled() => ExecutionOutcome::Cancelled,
            result = self.client.execute(request) => Self::finish(result, started),
        }
    }

    fn finish(
        result: Result<TransportResponse, HttpClientError>,
        started: Instant,
    ) -> ExecutionOutcome {
        let elapsed = started.elapsed();
        match result {
            Ok(transport) => {
                ExecutionOutcome::Completed(Response::from_transport(transport, elapsed))
            }
            Err(error) => {
                let response = Response::failure(error.to_string(), Some(elapsed));
                ExecutionOutcome::Failed { error, response }
            }
        }
    }
}
