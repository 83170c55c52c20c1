//! Clinic console entry point.
//!
//! # Responsibility
//! - Read configuration, start file logging and load the record stores.
//! - Hand stdin/stdout to the interactive menus.

mod config;
mod console;
mod menu;

use config::CliConfig;
use console::Console;
use log::info;
use menu::Clinic;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CliConfig::from_env().map_err(|err| err.to_string())?;

    // Menus still work without file logs.
    if let Err(err) = clinic_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    std::fs::create_dir_all(&config.data_dir).map_err(|err| {
        format!(
            "cannot create data directory `{}`: {err}",
            config.data_dir.display()
        )
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut console = Console::new(&mut input, &mut output);

    let format = match config.storage_format {
        Some(format) => format,
        None => match menu::choose_storage(&mut console).map_err(console_error)? {
            Some(format) => format,
            None => return Ok(()),
        },
    };

    let mut clinic = Clinic::open(format, &config.data_dir)
        .map_err(|err| format!("failed to load clinic data: {err}"))?;
    info!(
        "event=session_start module=cli status=ok format={} persistent={} data_dir={} version={}",
        format,
        clinic.is_persistent(),
        config.data_dir.display(),
        clinic_core::core_version()
    );

    menu::run_main_menu(&mut console, &mut clinic).map_err(console_error)?;
    info!("event=session_end module=cli status=ok");
    Ok(())
}

fn console_error(err: io::Error) -> String {
    format!("console I/O failed: {err}")
}
