use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` is honored; `default_directive` (for example `"debug"`) sets the
/// level for this crate's own targets. Calling it again is a no-op.
pub fn init(default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("open_dj={default_directive}").parse()?);

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(init("debug").is_ok());
        assert!(init("info").is_ok());
    }

    #[test]
    fn test_init_rejects_bad_directive() {
        assert!(init("verbose").is_err());
    }
}
