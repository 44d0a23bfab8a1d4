//! stderr logging for the binaries.

use tracing::Level;

/// Install the fmt subscriber on stderr. `WARN` by default, `DEBUG` when
/// `verbose`. A second call is a no-op.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
