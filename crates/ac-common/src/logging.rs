//! Structured logging setup.
//!
//! - `LOG_FORMAT=json` switches to JSON lines for log aggregation
//! - `RUST_LOG` controls filtering (default: info),
//!   e.g. `RUST_LOG=ac_platform=debug,tower_http=info`
//!
//! ```rust,ignore
//! ac_common::logging::init_logging("ac-platform-server");
//! tracing::info!(role_id = id, "Role created");
//! ```

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the global subscriber for `service_name`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(service_name: &str) {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let initialized = if json {
        init_json_logging(default_filter())
    } else {
        init_text_logging(default_filter())
    };

    if initialized {
        tracing::debug!(service = service_name, json, "Logging initialized");
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_json_logging(env_filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .flatten_event(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init()
        .is_ok()
}

fn init_text_logging(env_filter: EnvFilter) -> bool {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init()
        .is_ok()
}
