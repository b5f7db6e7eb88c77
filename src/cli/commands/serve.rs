//! Serve command - bring caches live and serve HTTP

use crate::cache::RefreshCache;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::error::{SensordError, SensordResult};
use crate::sensors::{ClassicSensors, ComponentScan};
use crate::server::{self, Endpoint};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Path serving the classic report
const CLASSIC_PATH: &str = "/api/sys/sensors";

/// Path serving the component scan
const COMPONENTS_PATH: &str = "/api/sys/sensors2";

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: &Config) -> SensordResult<()> {
    let interval = Duration::from_secs(args.interval.unwrap_or(config.cache.interval_secs));

    let classic = Arc::new(RefreshCache::new(
        "csensors",
        Arc::new(ClassicSensors::from_config(&config.sensors)),
        interval,
    ));
    let components = Arc::new(RefreshCache::new(
        "sensors",
        Arc::new(ComponentScan),
        interval,
    ));

    // Bootstrap both sources concurrently. A source that cannot run on this
    // host drops out here and gets no endpoint.
    let (classic, components) = tokio::join!(classic.start(), components.start());

    let mut endpoints = Vec::new();
    match classic {
        Some(cache) => endpoints.push(Endpoint::new(CLASSIC_PATH, cache)),
        None => info!("classic sensors unavailable on this host"),
    }
    match components {
        Some(cache) => endpoints.push(Endpoint::new(COMPONENTS_PATH, cache)),
        None => info!("component scan unavailable on this host"),
    }

    let listen = args.listen.as_deref().unwrap_or(&config.server.listen);
    let addr: SocketAddr = listen
        .parse()
        .map_err(|_| SensordError::ListenAddrInvalid(listen.to_string()))?;

    server::serve(addr, server::router(endpoints)).await
}
