//! Environment configuration for the `hatdraw` binaries.
//!
//! `HATDRAW_THREADS` (fallback `RAYON_NUM_THREADS`) sizes the rayon global
//! pool; `RUST_LOG` drives the tracing filter.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Thread count from `HATDRAW_THREADS`, falling back to `RAYON_NUM_THREADS`.
/// `None` if neither is set to a positive integer.
pub fn thread_count() -> Option<usize> {
    std::env::var("HATDRAW_THREADS")
        .or_else(|_| std::env::var("RAYON_NUM_THREADS"))
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|&n: &usize| n > 0)
}

/// Build the rayon global pool from [`thread_count`]. Returns the number of
/// threads in use.
pub fn init_rayon_threads() -> Result<usize> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = thread_count() {
        builder = builder.num_threads(n);
    }
    builder
        .build_global()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;
    let threads = rayon::current_num_threads();
    tracing::info!(threads, "rayon pool ready");
    Ok(threads)
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`),
/// writing to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
