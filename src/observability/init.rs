//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "findy.log";

/// Initializes the tracing subscriber with a rotating log file.
///
/// The filter comes from `RUST_LOG` when it is set and valid, otherwise from
/// `config.trace_level`. Output is plain text (no ANSI) in
/// `<data_dir>/findy.log`, so it never interleaves with the interactive
/// screen on stdout.
///
/// Observability is optional: if the data directory cannot be created the
/// function returns without installing anything. Calling it twice is harmless;
/// only the first subscriber takes effect.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.trace_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = Arc::new(FileWriter::new(data_dir.join(LOG_FILE_NAME)));
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
