use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose logs are shown at the requested level; everything else
/// only reports warnings.
const CRATES: [&str; 5] = [
    "enclosure_cli",
    "enclosure_engine",
    "modeling_ops",
    "file_format",
    "geometry_kernel",
];

fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    std::iter::once("warn".to_string())
        .chain(CRATES.iter().map(|c| format!("{c}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` wins when set.
pub fn init_cli_logger(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_party_crates_stay_at_warn() {
        let directives = default_directives(true);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("enclosure_engine=debug"));
        assert!(!directives.contains("=info"));
    }
}
