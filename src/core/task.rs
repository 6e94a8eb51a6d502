//! Async service-call task
//!
//! [`ServiceCallTask`] executes one [`Service`] description off the owner's
//! thread: preflight connectivity check, bounded retry of transport
//! failures, status check, then a caller-supplied parse of the body. The
//! owner receives [`CallEvent`]s over a channel and drains them on whatever
//! thread owns the UI, so callbacks always land where the owner lives.
//!
//! Exactly one [`CallEvent::Finished`] is delivered per execution, preceded
//! by one [`CallEvent::Progress`] per retried attempt.
//!
//! # Cancellation
//!
//! Dropping the [`CallHandle`] closes the event channel. The task notices
//! between attempts and before delivery, abandons its remaining retry
//! budget, and discards the outcome. The attempt already in flight is not
//! interrupted.

use crate::core::error::{CallError, ParseError, Result};
use crate::core::service::Service;
use crate::net::{Connectivity, InterfaceProbe};
use std::marker::PhantomData;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Default retry budget for transport failures.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Maps a successful response body to a result value.
///
/// The three error variants of [`ParseError`] surface as distinct failure
/// kinds; `Ok(None)` surfaces as [`CallError::NoResult`].
pub trait ResponseParser: Send + Sync {
    type Output: Send;

    fn parse(&self, body: &[u8]) -> std::result::Result<Option<Self::Output>, ParseError>;
}

/// Adapter turning a plain function into a [`ResponseParser`].
pub struct FnParser<T, F> {
    parse: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnParser<T, F>
where
    F: Fn(&[u8]) -> std::result::Result<Option<T>, ParseError> + Send + Sync,
{
    pub fn new(parse: F) -> Self {
        Self {
            parse,
            _marker: PhantomData,
        }
    }
}

impl<T, F> ResponseParser for FnParser<T, F>
where
    T: Send,
    F: Fn(&[u8]) -> std::result::Result<Option<T>, ParseError> + Send + Sync,
{
    type Output = T;

    fn parse(&self, body: &[u8]) -> std::result::Result<Option<T>, ParseError> {
        (self.parse)(body)
    }
}

/// JSON parser: deserializes the body into `T`, mapping a JSON `null` to
/// "no result" and any decode failure to the format-error kind.
pub struct JsonParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResponseParser for JsonParser<T>
where
    T: serde::de::DeserializeOwned + Send,
{
    type Output = T;

    fn parse(&self, body: &[u8]) -> std::result::Result<Option<T>, ParseError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|err| ParseError::Format(err.to_string()))?;
        if value.is_null() {
            return Ok(None);
        }
        T::deserialize(value)
            .map(Some)
            .map_err(|err| ParseError::Format(err.to_string()))
    }
}

/// One retry notification: the attempt about to run and why the last one
/// failed.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub attempt: u32,
    pub max_attempts: u32,
    pub detail: String,
}

/// Events delivered to the owner of a running task.
#[derive(Debug)]
pub enum CallEvent<T> {
    Progress(ProgressUpdate),
    Finished(Result<T>),
}

/// Owner-side handle for a spawned task: an event receiver plus the join
/// handle. Dropping it cancels the task cooperatively.
pub struct CallHandle<T> {
    events: mpsc::Receiver<CallEvent<T>>,
    task: JoinHandle<()>,
}

impl<T> CallHandle<T> {
    /// Receives the next event, or `None` once the task is done and the
    /// channel drained.
    pub async fn recv(&mut self) -> Option<CallEvent<T>> {
        self.events.recv().await
    }

    /// Waits for the terminal outcome, reporting each progress event to
    /// `on_progress` along the way.
    ///
    /// A task that dies without delivering an outcome (a panic in the
    /// parser, an aborted runtime) is reported as
    /// [`CallError::MissingErrorCode`].
    pub async fn finished_with(mut self, mut on_progress: impl FnMut(ProgressUpdate)) -> Result<T> {
        while let Some(event) = self.events.recv().await {
            match event {
                CallEvent::Progress(update) => on_progress(update),
                CallEvent::Finished(outcome) => return outcome,
            }
        }
        Err(CallError::MissingErrorCode)
    }

    /// Waits for the terminal outcome, discarding progress events.
    pub async fn finished(self) -> Result<T> {
        self.finished_with(|_| {}).await
    }

    /// Hard-stops the task. Prefer dropping the handle, which lets the
    /// in-flight attempt finish quietly.
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Executes one described HTTP call with bounded retry.
///
/// The task is consumed by [`run`](Self::run) or [`spawn`](Self::spawn), so
/// an instance can never execute twice.
pub struct ServiceCallTask<P: ResponseParser> {
    service: Service,
    parser: P,
    connectivity: Box<dyn Connectivity>,
    max_attempts: u32,
    id: Uuid,
    client: reqwest::Client,
}

impl<P: ResponseParser> ServiceCallTask<P> {
    /// Creates a task for `service` with the default retry budget and the
    /// system interface probe for connectivity.
    pub fn new(service: Service, parser: P) -> Self {
        Self {
            service,
            parser,
            connectivity: Box::new(InterfaceProbe),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            id: Uuid::new_v4(),
            client: reqwest::Client::new(),
        }
    }

    /// Overrides the retry budget. Clamped to at least one attempt.
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Overrides the connectivity probe consulted before the first attempt.
    #[must_use]
    pub fn connectivity(mut self, connectivity: impl Connectivity + 'static) -> Self {
        self.connectivity = Box::new(connectivity);
        self
    }

    /// Id of this task instance, carried on every log line it emits.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Runs the call to completion, delivering events over `events`.
    ///
    /// Sends exactly one [`CallEvent::Finished`] unless the receiver is
    /// dropped first, in which case the outcome is discarded.
    pub async fn run(self, events: mpsc::Sender<CallEvent<P::Output>>) {
        let id = self.id;
        match self.execute(&events).await {
            Some(outcome) => {
                if events.send(CallEvent::Finished(outcome)).await.is_err() {
                    tracing::debug!(task = %id, "owner gone, discarding outcome");
                }
            }
            None => tracing::debug!(task = %id, "service call cancelled"),
        }
    }

    /// Spawns the call onto the current runtime and returns the owner-side
    /// handle.
    pub fn spawn(self) -> CallHandle<P::Output>
    where
        P: 'static,
        P::Output: 'static,
    {
        let (sender, events) = mpsc::channel(8);
        let task = tokio::spawn(self.run(sender));
        CallHandle { events, task }
    }

    // Returns None when cancellation was observed before the outcome could
    // matter; the caller then skips terminal delivery.
    async fn execute(&self, events: &mpsc::Sender<CallEvent<P::Output>>) -> Option<Result<P::Output>> {
        tracing::debug!(task = %self.id, url = self.service.url(), method = %self.service.method(), "starting service call");

        if !self.connectivity.is_available() {
            return Some(Err(CallError::NoNetwork));
        }

        let url = match self.service.request_url() {
            Ok(url) => url,
            Err(err) => return Some(Err(err)),
        };

        let mut attempts = 0u32;
        let mut response = None;
        while attempts < self.max_attempts {
            if events.is_closed() {
                return None;
            }
            let request = self
                .client
                .request(self.service.method().as_reqwest(), url.clone());
            match request.send().await {
                Ok(resp) => {
                    response = Some(resp);
                    break;
                }
                Err(err) => {
                    attempts += 1;
                    tracing::warn!(
                        task = %self.id,
                        attempt = attempts,
                        max_attempts = self.max_attempts,
                        "transport failure: {err}"
                    );
                    if attempts < self.max_attempts {
                        let update = ProgressUpdate {
                            attempt: attempts + 1,
                            max_attempts: self.max_attempts,
                            detail: err.to_string(),
                        };
                        if events.send(CallEvent::Progress(update)).await.is_err() {
                            return None;
                        }
                    }
                }
            }
        }

        let Some(response) = response else {
            return Some(Err(CallError::MaxAttemptsReached {
                attempts: self.max_attempts,
            }));
        };

        let status = response.status();
        if status.as_u16() != 200 {
            return Some(Err(CallError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: self.service.url().to_string(),
            }));
        }

        // The parser owns the body in the reference design, so a failed body
        // read is a parse-time I/O failure, not a transport failure.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                return Some(Err(CallError::Parse(ParseError::Io(
                    std::io::Error::other(err),
                ))));
            }
        };

        Some(match self.parser.parse(&body) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(CallError::NoResult),
            Err(err) => Err(err.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parser_null_is_no_result() {
        let parser = JsonParser::<Vec<u32>>::new();
        assert!(parser.parse(b"null").unwrap().is_none());
        assert_eq!(parser.parse(b"[1,2]").unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn test_json_parser_garbage_is_format_error() {
        let parser = JsonParser::<Vec<u32>>::new();
        assert!(matches!(
            parser.parse(b"<html>").unwrap_err(),
            ParseError::Format(_)
        ));
        // Valid JSON of the wrong shape is also a format error.
        assert!(matches!(
            parser.parse(b"{\"a\":1}").unwrap_err(),
            ParseError::Format(_)
        ));
    }

    #[test]
    fn test_fn_parser_passes_body_through() {
        let parser = FnParser::new(|body: &[u8]| Ok(Some(body.len())));
        assert_eq!(parser.parse(b"12345").unwrap(), Some(5));
    }

    #[test]
    fn test_max_attempts_clamps_to_one() {
        let service = Service::new("http://example.com/svc", crate::core::service::Method::Get);
        let task = ServiceCallTask::new(service, JsonParser::<u32>::new()).max_attempts(0);
        assert_eq!(task.max_attempts, 1);
    }
}
