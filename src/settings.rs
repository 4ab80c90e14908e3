use ctor::ctor;
use tracing::Level;

/// Maps the `DEBUG_SENSEGRAPH` variable to a library log level. Unset,
/// empty, `0`, and `false` leave logging off; `trace` selects TRACE;
/// any other value selects DEBUG.
fn requested_level() -> Option<Level> {
    let value = std::env::var("DEBUG_SENSEGRAPH").ok()?;
    match value.as_str() {
        "" | "0" | "false" => None,
        "trace" => Some(Level::TRACE),
        _ => Some(Level::DEBUG),
    }
}

#[ctor]
fn init_library_logging() {
    if let Some(level) = requested_level() {
        // try_init so a subscriber installed by the driver binaries wins.
        tracing_subscriber::fmt()
            .with_max_level(level)
            .try_init()
            .ok();
    }
}
