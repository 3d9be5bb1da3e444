//! Tracing setup
//!
//! The library only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG` plus the given directive.
///
/// Returns `false` when a global subscriber was already set.
pub fn init(directive: &str) -> bool {
    let filter = match directive.parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let _ = init("school_portal=debug");
        assert!(!init("school_portal=debug"));
    }
}
