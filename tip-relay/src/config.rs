use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

pub const TIP_STREAM_PATH: &str = "/api/v1/bundles/tip_stream";

/// How long a relayed record stays servable without a fresher one.
pub const RECORD_TTL: Duration = Duration::from_secs(5 * 60);
pub const GC_INTERVAL: Duration = Duration::from_secs(5 * 60);
/// Wait for the upstream to acknowledge our close frame before giving up.
pub const CLOSE_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Parser)]
#[command(about = "Relay the latest landed-tips percentiles from the bundles tip stream")]
pub struct Args {
    /// Upstream tip stream host
    #[arg(long, default_value = "bundles-api-rest.jito.wtf")]
    pub addr: String,

    /// Address the HTTP server listens on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,
}
