#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedding application's call. With the `tracing-json` feature this module
//! offers a one-line JSON subscriber filtered by an `EnvFilter` directive
//! string (for example `"showroom=debug"` or `"showroom.header=trace"`).
//!
//! Targets in use: `showroom.scroll`, `showroom.pointer`, `showroom.header`,
//! `showroom.navigator`, `showroom.effect`, `showroom.form`, `showroom.host`,
//! `showroom.page`.

/// Every target the interaction layer logs under.
pub const TARGETS: &[&str] = &[
    "showroom.scroll",
    "showroom.pointer",
    "showroom.header",
    "showroom.navigator",
    "showroom.effect",
    "showroom.form",
    "showroom.host",
    "showroom.page",
];

/// Install a global JSON subscriber.
///
/// `filter` uses `EnvFilter` syntax; `RUST_LOG` overrides it when set.
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(
    filter: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(filter))?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_share_prefix() {
        assert!(TARGETS.iter().all(|t| t.starts_with("showroom.")));
    }
}
