use anyhow::{anyhow, Result};
use shelf_config::PathManager;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Crates whose `debug!` output `-v` turns on; everything else stays at warn
const SHELF_TARGETS: [&str; 5] = ["shelf", "shelf_core", "shelf_sources", "shelf_config", "shelf_models"];

/// `log_file` is the `--log-file` flag: absent logs to stderr, given without
/// a path logs to the default file in the config directory.
pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<Option<PathBuf>>) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose_level)))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let log_path = log_file.map(|path| path.unwrap_or_else(|| PathManager::default().default_log_file()));
    let ansi = log_path.is_none() && io::stderr().is_terminal();
    let writer = match &log_path {
        Some(path) => BoxMakeWriter::new(rolling_appender(path)?),
        None => BoxMakeWriter::new(io::stderr),
    };

    let registry = Registry::default().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_ansi(ansi).with_writer(writer))
            .init();
    }

    if let Some(path) = log_path {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(())
}

/// 0 = warn, 1 = debug for the shelf crates only, 2+ = trace everywhere
fn filter_directives(verbose_level: u8) -> String {
    match verbose_level {
        0 => "warn".to_string(),
        1 => {
            let mut directives = vec!["warn".to_string()];
            directives.extend(SHELF_TARGETS.iter().map(|target| format!("{}=debug", target)));
            directives.join(",")
        }
        _ => "trace".to_string(),
    }
}

fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(log_dir)?;

    let prefix = log_prefix(log_path).ok_or_else(|| anyhow!("Invalid log filename: {}", log_path.display()))?;
    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, prefix))
}

/// "shelf" from "shelf.log"; rotated files become shelf.2026-10-18 etc.
fn log_prefix(log_path: &Path) -> Option<&str> {
    let name = log_path.file_name()?.to_str()?;
    Some(name.rsplit_once('.').map(|(stem, _)| stem).filter(|stem| !stem.is_empty()).unwrap_or(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_scope_debug_to_shelf_crates() {
        assert_eq!(filter_directives(0), "warn");
        let debug = filter_directives(1);
        assert!(debug.starts_with("warn,"));
        assert!(debug.contains("shelf_core=debug"));
        assert!(debug.contains("shelf_sources=debug"));
        assert!(!debug.contains("reqwest"));
        assert_eq!(filter_directives(3), "trace");

        for level in 0..3 {
            assert!(EnvFilter::try_new(filter_directives(level)).is_ok());
        }
    }

    #[test]
    fn test_log_prefix() {
        assert_eq!(log_prefix(Path::new("/var/log/shelf.log")), Some("shelf"));
        assert_eq!(log_prefix(Path::new("merge.debug.log")), Some("merge.debug"));
        assert_eq!(log_prefix(Path::new("shelf")), Some("shelf"));
        assert_eq!(log_prefix(Path::new(".shelf")), Some(".shelf"));
        assert_eq!(log_prefix(Path::new("/")), None);
    }

    #[test]
    fn test_rolling_appender_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("shelf.log");

        rolling_appender(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }
}
