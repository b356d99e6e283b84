//! `env_logger` backend for the `log` facade.
//!
//! Verbosity flags pick the default level; `RUST_LOG` still overrides it.

use std::io::Write;

use env_logger::{Builder, Env, Target, WriteStyle};
use log::LevelFilter;

use crate::CliError;

pub(crate) fn init_logger(verbosity: u8) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for(verbosity))
        .parse_env(Env::default())
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::Logging)
}

pub(crate) const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
