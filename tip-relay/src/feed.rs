use crate::config::TIP_STREAM_PATH;
use futures::stream::{SplitSink, SplitStream};
use futures::{Stream, StreamExt};
use log::{debug, info, warn};
use thiserror::Error;
use tip_cache::{CacheError, TipRecord, TipService};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub type WsSink = SplitSink<WsStream, Message>;
pub type WsSource = SplitStream<WsStream>;

/// How the read loop ended. Sent exactly once per subscription.
pub type FeedOutcome = Result<(), FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to connect to tip stream: {0}")]
    Connect(#[source] tungstenite::Error),
    #[error("failed to read from tip stream: {0}")]
    Read(#[source] tungstenite::Error),
    #[error("tip stream message is not a record batch: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub fn tip_stream_url(host: &str) -> String {
    format!("ws://{host}{TIP_STREAM_PATH}")
}

/// Open the tip stream and split it into its write and read halves.
pub async fn connect(url: &str) -> Result<(WsSink, WsSource), FeedError> {
    let (ws_stream, _) = connect_async(url).await.map_err(FeedError::Connect)?;

    Ok(ws_stream.split())
}

/// Relay every batch from `source` into the cache until the stream ends.
///
/// A read or decode failure ends the loop; the message is not retried and the
/// stream is not resubscribed.
pub async fn read_loop<S>(mut source: S, service: TipService) -> FeedOutcome
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(message) = source.next().await {
        let payload = match message.map_err(FeedError::Read)? {
            Message::Text(text) => text.into_bytes(),
            Message::Binary(data) => data,
            Message::Close(frame) => {
                info!("tip stream closed by upstream: {:?}", frame);
                return Ok(());
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        };

        relay_batch(&payload, &service)?;
    }

    info!("tip stream ended");
    Ok(())
}

/// Cache the first record of the batch and drop the rest.
///
/// The upstream does not document the order inside a batch, so "first" is
/// whatever it sent first, not necessarily the newest.
fn relay_batch(message: &[u8], service: &TipService) -> Result<(), FeedError> {
    let batch = TipRecord::batch_from_slice(message).map_err(FeedError::Decode)?;
    debug!("received: {:?}", batch);

    match batch.first() {
        Some(head) => service.store_tip(head)?,
        None => warn!("received an empty batch, keeping the cached record"),
    }

    Ok(())
}

/// Run the read loop on its own task. The receiver resolves once the loop ends.
pub fn spawn_read_loop<S>(source: S, service: TipService) -> oneshot::Receiver<FeedOutcome>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = read_loop(source, service).await;
        if let Err(e) = &outcome {
            warn!("{}", e);
        }

        // Nobody may be waiting any more once shutdown gave up on us.
        let _ = done_tx.send(outcome);
    });

    done_rx
}
