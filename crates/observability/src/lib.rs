//! Process-wide logging setup shared by the binaries.

/// Install the default subscriber (JSON lines on stderr).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Json);
}

pub use self::tracing::LogFormat;

/// Subscriber configuration (filter, format).
pub mod tracing;
