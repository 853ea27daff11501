//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lushlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("lushlog_core ping={}", lushlog_core::ping());
    println!("lushlog_core version={}", lushlog_core::core_version());
    println!(
        "lushlog_core api={}",
        lushlog_core::ApiConfig::default().releases_url()
    );
}
