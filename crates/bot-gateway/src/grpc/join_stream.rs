//! Join stream bridge.
//!
//! Turns the server-streaming `JoinMeeting` response into a pull-based
//! sequence of [`JoinProgress`] events. One background task per stream reads
//! frames off the network and hands them to the consumer through a bounded
//! `mpsc` queue:
//!
//! ```text
//! bot service ──frames──> receive task ──mpsc(cap)──> JoinStream::recv()
//!                              │                           │
//!                              └──── CallContext ──────────┘
//! ```
//!
//! # Lifecycle
//!
//! - `Open`: the receive task is running.
//! - `Draining`: the task stopped (clean end, stream error, cancellation or
//!   deadline); the consumer still reads whatever was already queued.
//! - `Closed`: the queue is empty and the task has been joined.
//!
//! # Backpressure
//!
//! When the queue is full the receive task stops reading the network until
//! the consumer catches up, so a slow consumer throttles the stream instead
//! of growing a buffer.
//!
//! # Termination
//!
//! A clean end of stream ends the sequence with `None`. Any other ending
//! (remote error, cancellation, deadline) yields exactly one final
//! `Err(BotError)` after the queued events, then `None`, so callers can
//! always tell "joined and finished" apart from "aborted".
//!
//! Dropping a `JoinStream` cancels its receive task.

use crate::errors::BotError;
use crate::grpc::context::CallContext;
use crate::models::JoinProgress;
use crate::observability::metrics;
use proto_gen::bot::JoinMeetingResponse;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::DropGuard;
use tonic::Status;
use tracing::{debug, warn};

const STATE_OPEN: u8 = 0;
const STATE_DRAINING: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// Observable lifecycle state of a [`JoinStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Open,
    Draining,
    Closed,
}

/// How the receive task ended.
#[derive(Debug)]
enum StreamOutcome {
    /// The bot service closed the stream cleanly.
    Completed,
    /// The stream failed after it was opened.
    Failed(BotError),
    /// The context was cancelled, the deadline passed, or the consumer went away.
    Aborted(BotError),
}

impl StreamOutcome {
    fn label(&self) -> &'static str {
        match self {
            StreamOutcome::Completed => "completed",
            StreamOutcome::Failed(_) => "failed",
            StreamOutcome::Aborted(BotError::DeadlineExceeded) => "deadline_exceeded",
            StreamOutcome::Aborted(_) => "cancelled",
        }
    }

    fn into_error(self) -> Option<BotError> {
        match self {
            StreamOutcome::Completed => None,
            StreamOutcome::Failed(err) | StreamOutcome::Aborted(err) => Some(err),
        }
    }
}

/// Consumer side of a join stream.
///
/// Read it with [`JoinStream::recv`] or as a `Stream` of
/// `Result<JoinProgress, BotError>`. Single consumer, not restartable.
pub struct JoinStream {
    rx: mpsc::Receiver<JoinProgress>,
    task: Option<JoinHandle<StreamOutcome>>,
    state: Arc<AtomicU8>,
    ctx: CallContext,
    bot_id: String,
    finished: bool,
    _cancel_on_drop: DropGuard,
}

impl JoinStream {
    /// Start bridging `source` into a new stream.
    ///
    /// The receive task runs under a child of `ctx`: cancelling `ctx`, its
    /// deadline passing, or dropping the returned stream all stop it.
    /// `capacity` is the hand-off queue size (values below 1 are raised to 1).
    pub fn spawn<S>(ctx: &CallContext, bot_id: impl Into<String>, source: S, capacity: usize) -> Self
    where
        S: Stream<Item = Result<JoinMeetingResponse, Status>> + Send + 'static,
    {
        let bot_id = bot_id.into();
        let ctx = ctx.child();
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let state = Arc::new(AtomicU8::new(STATE_OPEN));

        metrics::join_stream_opened();

        let task = tokio::spawn({
            let ctx = ctx.clone();
            let state = Arc::clone(&state);
            let bot_id = bot_id.clone();
            async move {
                let outcome = receive_loop(ctx, source, tx, &bot_id).await;
                // Only the consumer moves the state to Closed; don't undo that
                let _ = state.compare_exchange(
                    STATE_OPEN,
                    STATE_DRAINING,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                );
                metrics::join_stream_closed(outcome.label());
                debug!(
                    target: "bot.grpc.join_stream",
                    bot_id = %bot_id,
                    outcome = outcome.label(),
                    "Join stream receive task exited"
                );
                outcome
            }
        });

        Self {
            rx,
            task: Some(task),
            state,
            _cancel_on_drop: ctx.token().clone().drop_guard(),
            ctx,
            bot_id,
            finished: false,
        }
    }

    /// Receive the next progress event.
    ///
    /// Returns `Some(Ok(_))` for each event in the order the bot sent them,
    /// `Some(Err(_))` once if the stream ended abnormally, then `None`.
    pub async fn recv(&mut self) -> Option<Result<JoinProgress, BotError>> {
        std::future::poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Poll for the next progress event. See [`JoinStream::recv`].
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<Result<JoinProgress, BotError>>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(progress)) => return Poll::Ready(Some(Ok(progress))),
            Poll::Ready(None) => {}
            Poll::Pending => return Poll::Pending,
        }

        // Queue closed: the receive task has dropped its sender and is exiting
        let outcome = match self.task.as_mut() {
            Some(task) => {
                let joined = ready!(Pin::new(task).poll(cx));
                self.task = None;
                joined.unwrap_or_else(|e| {
                    StreamOutcome::Failed(BotError::Internal(format!(
                        "join stream task failed: {e}"
                    )))
                })
            }
            None => StreamOutcome::Completed,
        };

        self.finished = true;
        self.state.store(STATE_CLOSED, Ordering::SeqCst);

        Poll::Ready(outcome.into_error().map(Err))
    }

    /// Stop the receive task. Already queued events can still be read,
    /// followed by a final `Err(BotError::Cancelled)`.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Stop the receive task, wait for it to exit and discard queued events.
    pub async fn close(mut self) {
        self.ctx.cancel();
        self.rx.close();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.finished = true;
        self.state.store(STATE_CLOSED, Ordering::SeqCst);
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BridgeState {
        match self.state.load(Ordering::SeqCst) {
            STATE_OPEN => BridgeState::Open,
            STATE_DRAINING => BridgeState::Draining,
            _ => BridgeState::Closed,
        }
    }

    /// Bot ID this stream was opened for.
    #[must_use]
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }
}

impl Stream for JoinStream {
    type Item = Result<JoinProgress, BotError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_recv(cx)
    }
}

impl fmt::Debug for JoinStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinStream")
            .field("bot_id", &self.bot_id)
            .field("state", &self.state())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Pull frames off `source` and push them into `tx` until something ends it.
///
/// Both blocking points (next frame, queue capacity) race the context, and
/// the context is checked first so nothing is forwarded once it is done.
async fn receive_loop<S>(
    ctx: CallContext,
    source: S,
    tx: mpsc::Sender<JoinProgress>,
    bot_id: &str,
) -> StreamOutcome
where
    S: Stream<Item = Result<JoinMeetingResponse, Status>>,
{
    tokio::pin!(source);

    loop {
        let frame = tokio::select! {
            biased;
            reason = ctx.done() => return StreamOutcome::Aborted(reason),
            frame = source.next() => frame,
        };

        let progress = match frame {
            None => {
                debug!(
                    target: "bot.grpc.join_stream",
                    bot_id = %bot_id,
                    "Join stream closed by bot service"
                );
                return StreamOutcome::Completed;
            }
            Some(Err(status)) => {
                warn!(
                    target: "bot.grpc.join_stream",
                    bot_id = %bot_id,
                    code = ?status.code(),
                    error = %status.message(),
                    "Join stream terminated with error"
                );
                return StreamOutcome::Failed(BotError::from_stream_status(&status));
            }
            Some(Ok(response)) => JoinProgress::from(response),
        };

        if progress.bot_id != bot_id {
            warn!(
                target: "bot.grpc.join_stream",
                bot_id = %bot_id,
                echoed_bot_id = %progress.bot_id,
                "Join progress echoed a different bot ID"
            );
        }

        let state = progress.state;

        tokio::select! {
            biased;
            reason = ctx.done() => {
                debug!(
                    target: "bot.grpc.join_stream",
                    bot_id = %bot_id,
                    state = %state,
                    "Context done while handing off progress, dropping frame"
                );
                return StreamOutcome::Aborted(reason);
            }
            sent = tx.send(progress) => {
                if sent.is_err() {
                    // Receiver closed: JoinStream::close() or the consumer is gone
                    return StreamOutcome::Aborted(BotError::Cancelled);
                }
                metrics::record_join_event(state.as_str());
            }
        }
    }
}
