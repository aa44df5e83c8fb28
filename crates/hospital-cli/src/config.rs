/// Application-level constants
pub const APP_NAME: &str = "Hospital Directory";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use hospital_core::db::DEFAULT_DB_FILE;

/// Predictions shown by the history screen.
pub const HISTORY_LIMIT: usize = 10;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "warn"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_db_file_is_sqlite() {
        assert!(DEFAULT_DB_FILE.ends_with(".db"));
    }

    #[test]
    fn default_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(default_log_filter()).is_ok());
    }
}
