//! Walks each eviction strategy through a small capacity-3 scenario.
//!
//! Set `RUST_LOG=debug` to also see the library's eviction events.

use policy_cache::{Cache, Result, StrategyKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn report(cache: &Cache<&'static str, i32>, key: &'static str) {
    match cache.get(&key) {
        Some(value) => info!(strategy = %cache.strategy(), key, value, "found"),
        None => info!(strategy = %cache.strategy(), key, "evicted"),
    }
}

fn fifo_walkthrough() -> Result<()> {
    let cache = Cache::new(3, StrategyKind::Fifo)?;
    for (key, value) in [("X", 10), ("Y", 20), ("Z", 30)] {
        cache.put(key, value)?;
        info!(key, value, "inserted");
    }
    report(&cache, "Y");

    cache.delete(&"X");
    info!(key = "X", "deleted");

    cache.put("W", 40)?;
    info!(key = "W", value = 40, "inserted");
    cache.put("Z", 50)?;
    info!(key = "Z", value = 50, "updated");
    cache.put("V", 60)?;
    info!(key = "V", value = 60, "inserted");

    report(&cache, "Y");
    report(&cache, "Z");
    Ok(())
}

fn lru_walkthrough() -> Result<()> {
    let cache = Cache::new(3, StrategyKind::Lru)?;
    for (key, value) in [("X", 10), ("Y", 20), ("Z", 30)] {
        cache.put(key, value)?;
        info!(key, value, "inserted");
    }
    report(&cache, "Y");

    cache.put("W", 40)?;
    info!(key = "W", value = 40, "inserted");
    report(&cache, "X");
    report(&cache, "W");

    cache.put("S", 50)?;
    info!(key = "S", value = 50, "inserted");
    report(&cache, "Z");
    Ok(())
}

fn lfu_walkthrough() -> Result<()> {
    let cache = Cache::new(3, StrategyKind::Lfu)?;
    for (key, value) in [("X", 10), ("Y", 20), ("Z", 30)] {
        cache.put(key, value)?;
        info!(key, value, "inserted");
    }
    report(&cache, "X");
    report(&cache, "Z");

    cache.put("W", 40)?;
    info!(key = "W", value = 40, "inserted");
    report(&cache, "W");
    report(&cache, "Y");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    fifo_walkthrough()?;
    lru_walkthrough()?;
    lfu_walkthrough()?;
    Ok(())
}
