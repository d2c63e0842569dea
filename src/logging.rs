use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Honors `RUST_LOG` (env_logger filter syntax), defaulting to `info`.
/// Subsequent calls are ignored.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();
    });
}
