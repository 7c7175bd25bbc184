use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = "taskboard.json";

/// Terminal task board with boards and todo/doing/done columns.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard", version, about)]
pub struct Config {
    /// File holding the persisted key-value entries.
    #[arg(long, env = "TASKBOARD_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Write logs here; filtered by `RUST_LOG`. Logging is off when unset.
    #[arg(long, env = "TASKBOARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Start with an empty collection instead of the default dataset.
    #[arg(long)]
    pub no_seed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["taskboard"]).unwrap();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(!config.no_seed);
    }

    #[test]
    fn explicit_flags() {
        let config = Config::try_parse_from([
            "taskboard",
            "--data-file",
            "/tmp/board.json",
            "--log-file",
            "/tmp/board.log",
            "--no-seed",
        ])
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/board.json"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/board.log")));
        assert!(config.no_seed);
    }
}
