use anyhow::Context as _;
use clap::Parser;
#[rustfmt::skip]
use log::{error, info, warn};
use std::sync::Arc;

use config::{Args, CLOSE_GRACE, GC_INTERVAL, RECORD_TTL};
use lifecycle::Coordinator;
use tip_api::Annotations;
use tip_cache::{ExpiringStore, TipService};
use tokio::{net::TcpListener, signal};

mod config;
mod feed;
mod lifecycle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = Arc::new(ExpiringStore::new());
    store.spawn_reaper(GC_INTERVAL);
    let svc = TipService::new(store, RECORD_TTL);

    let url = feed::tip_stream_url(&args.addr);
    let app = tip_api::router(svc.clone(), Annotations::new(url.clone()));

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("bind {}", args.listen))?;
    info!("listening on {}", args.listen);

    // Requests still in flight at exit are dropped with the runtime.
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("http server: {e}");
            std::process::exit(1);
        }
    });

    info!("connecting to {url}");
    let (sink, source) = feed::connect(&url).await?;
    let feed_done = feed::spawn_read_loop(source, svc);

    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for interrupt: {e}");
            std::future::pending::<()>().await;
        }
    };

    let cause = Coordinator::new(sink, feed_done, CLOSE_GRACE)
        .supervise(interrupt)
        .await;
    info!("exiting: {cause:?}");

    Ok(())
}
