//! Leveled stderr diagnostics gated by `OPENINGS_LOG`.
//!
//! Defaults to `error`; set `OPENINGS_LOG=warn` or `OPENINGS_LOG=debug` to see
//! more. The level is read once per process.

use std::env;
use std::sync::LazyLock;

pub const ENV_LOG: &str = "OPENINGS_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
enum Level {
    Error = 0,
    Warn = 1,
    Debug = 2,
}

impl Level {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Error,
        }
    }
}

static OPENINGS_LOG: LazyLock<Level> = LazyLock::new(|| {
    env::var(ENV_LOG)
        .map(|raw| Level::parse(&raw))
        .unwrap_or(Level::Error)
});

macro_rules! log {
    ($level:expr, $prefix:expr, $msg:expr) => {
        if *OPENINGS_LOG >= $level {
            eprintln!(concat!("openings ", $prefix, ": {}"), $msg.as_ref());
        }
    };
}

pub fn warn(msg: impl AsRef<str>) {
    log!(Level::Warn, "WARN", msg);
}

pub fn debug(msg: impl AsRef<str>) {
    log!(Level::Debug, "DEBUG", msg);
}
