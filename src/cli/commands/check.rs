//! Check command - run each sensor producer once and report

use crate::cache::{Producer, RefreshCache};
use crate::config::Config;
use crate::error::SensordResult;
use crate::sensors::{ClassicSensors, ComponentScan};
use console::style;
use std::sync::Arc;
use std::time::Duration;

const PREVIEW_CHARS: usize = 96;

/// Execute the check command
///
/// Diagnostic only: a source that cannot run here is reported, not an error,
/// so the exit code stays zero either way.
pub async fn execute(config: &Config) -> SensordResult<()> {
    let interval = Duration::from_secs(config.cache.interval_secs);

    check_one(
        "csensors",
        Arc::new(ClassicSensors::from_config(&config.sensors)),
        interval,
    )
    .await;
    check_one("sensors", Arc::new(ComponentScan), interval).await;

    Ok(())
}

async fn check_one(name: &str, producer: Arc<dyn Producer>, interval: Duration) {
    let cache = RefreshCache::new(name, producer, interval);

    match cache.update_with_timeout(false).await {
        Ok(()) => println!(
            "{} {}: {}",
            style("ok").green().bold(),
            name,
            preview(&cache.read())
        ),
        Err(err) => println!(
            "{} {}: {}",
            style("unavailable").yellow().bold(),
            name,
            err
        ),
    }
}

fn preview(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if preview.len() < text.len() {
        preview.push_str("...");
    }
    preview
}
