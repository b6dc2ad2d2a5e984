use tracing_subscriber::EnvFilter;

/// Installs the global diagnostics subscriber.
///
/// Diagnostics go to stderr so report output on stdout stays clean.
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate with `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "dir_squeeze=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // a subscriber may already be installed when embedded in another program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
