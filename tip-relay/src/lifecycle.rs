use crate::feed::FeedOutcome;
use futures::{Sink, SinkExt};
use log::{debug, info, warn};
use std::fmt::Display;
use std::future::Future;
use tokio::sync::oneshot;
use tokio::time::{self, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Draining,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    Interrupted,
    FeedEnded,
}

/// Decides when the process stops and closes the upstream on the way out.
///
/// The HTTP side is not drained: requests still in flight are dropped at exit.
pub struct Coordinator<S> {
    sink: S,
    feed_done: oneshot::Receiver<FeedOutcome>,
    grace: Duration,
    phase: Phase,
}

impl<S> Coordinator<S>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    pub fn new(sink: S, feed_done: oneshot::Receiver<FeedOutcome>, grace: Duration) -> Self {
        Self {
            sink,
            feed_done,
            grace,
            phase: Phase::Running,
        }
    }

    /// Run until `interrupt` resolves or the read loop ends, whichever is first.
    pub async fn supervise<F>(mut self, interrupt: F) -> StopCause
    where
        F: Future<Output = ()>,
    {
        let cause = tokio::select! {
            outcome = &mut self.feed_done => {
                match outcome {
                    Ok(Ok(())) => info!("tip stream finished"),
                    Ok(Err(e)) => debug!("tip stream failed: {}", e),
                    Err(_) => warn!("read loop exited without reporting"),
                }
                StopCause::FeedEnded
            }
            _ = interrupt => {
                info!("interrupt");
                StopCause::Interrupted
            }
        };

        self.enter(Phase::Draining);
        if cause == StopCause::Interrupted {
            self.close_upstream().await;
        }
        self.enter(Phase::Stopped);

        cause
    }

    /// Send a close frame, then give the read loop `grace` to see the upstream hang up.
    async fn close_upstream(&mut self) {
        let close = Message::Close(Some(CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        }));

        if let Err(e) = self.sink.send(close).await {
            warn!("write close: {}", e);
            return;
        }

        match time::timeout(self.grace, &mut self.feed_done).await {
            Ok(_) => debug!("upstream closed the tip stream"),
            Err(_) => warn!("upstream did not close within {:?}", self.grace),
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!("lifecycle {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
