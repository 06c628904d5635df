//! Headless runner for the background particle field
//!
//! Run with: cargo run --features cli --bin portfolio-fx-cli
//!
//! Environment:
//! - `PORTFOLIO_FX_CONFIG`: path to a JSON config file
//! - `FX_FRAMES`: stop after this many frames (default: run until Ctrl-C)
//! - `FX_SIZE`: viewport as `WIDTHxHEIGHT` (default 1280x720)
//! - `FX_SEED`: RNG seed for a reproducible field

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use portfolio_fx::core::{Presence, RecordingSurface, SiteConfig, Simulation};
    use portfolio_fx::time::{now_seconds, unix_millis};
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,portfolio_fx=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("PORTFOLIO_FX_CONFIG") {
        Ok(path) => {
            let json = tokio::fs::read_to_string(&path).await?;
            info!(path = %path, "Loaded config");
            SiteConfig::from_json(&json)?
        }
        Err(_) => SiteConfig::default(),
    };

    let (width, height) = std::env::var("FX_SIZE")
        .ok()
        .and_then(|s| parse_size(&s))
        .unwrap_or((1280.0, 720.0));
    let frame_limit: Option<u64> = std::env::var("FX_FRAMES").ok().and_then(|s| s.parse().ok());

    let presence = Presence::at_unix_ms(unix_millis(), &config.presence);
    info!(status = presence.status_text(), "Presence right now");

    let mut sim = match std::env::var("FX_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => Simulation::seeded(config.field.clone(), width, height, seed),
        None => Simulation::new(config.field.clone(), width, height),
    };
    let mut surface = RecordingSurface::new(width, height);

    let mut frame_interval = tokio::time::interval(Duration::from_micros(16_667));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let start = now_seconds();
    let mut frames_last_interval = 0u64;

    info!(width, height, limit = ?frame_limit, "Running field");

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                // Pointer sweeps a Lissajous path so repulsion gets exercised
                let t = now_seconds() - start;
                sim.pointer_moved(
                    width / 2.0 + width * 0.4 * (t * 0.7).sin(),
                    height / 2.0 + height * 0.4 * (t * 1.1).sin(),
                );
                let stats = sim.tick(&mut surface);
                frames_last_interval += 1;
                if frame_limit.is_some_and(|limit| stats.frames >= limit) {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                let stats = sim.stats();
                info!(
                    frames = stats.frames,
                    failed = stats.failed_frames,
                    edges = stats.last_edges,
                    fps = frames_last_interval,
                    "stats"
                );
                frames_last_interval = 0;
            }
            _ = &mut shutdown => {
                warn!("Interrupted");
                break;
            }
        }
    }

    let stats = sim.stats();
    info!(
        frames = stats.frames,
        failed = stats.failed_frames,
        elapsed_s = format!("{:.1}", now_seconds() - start),
        "Field stopped"
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_size(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

#[cfg(target_arch = "wasm32")]
fn main() {}
