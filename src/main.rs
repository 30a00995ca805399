//! Plays a game of chess at the terminal.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::unwrap_used)]

use std::fs::File;
use std::io;
use std::path::PathBuf;
use clap::{App, Arg, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter};
use chessgame::config::{Config, ConfigError};
use chessgame::console::Console;

fn main() -> Result<(), Error> {
    let matches =
        App::new("Chess Game")
            .version(crate_version!())
            .about("A two-player chess game played from the console")
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.chessgame/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on [default: chessgame.log]"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on [default: info]"))
            .get_matches();

    let mut settings = match matches.value_of_os("config") {
        Some(path) => Config::load(&PathBuf::from(path))?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    if matches.is_present("log") {
        settings.log.enabled = true;
    }
    if let Some(file) = matches.value_of_os("log-file") {
        settings.log.file = PathBuf::from(file);
    }
    if let Some(level) = matches.value_of("log-level") {
        settings.log.level = level.to_owned();
    }

    let log_level = settings.log.level_filter()?;
    let _logger = if settings.log.enabled {
        let log_file = &settings.log.file;
        WriteLogger::init(
            log_level,
            simplelog::Config::default(),
            File::create(log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, simplelog::Config::default(), io::sink())
    };
    info!("starting chess game {}", crate_version!());

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run()?;

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error(err.to_string())
    }
}
