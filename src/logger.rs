//! # Logging
//! src/logger.rs
//!
//! Instala un `TermLogger` de simplelog sobre stderr. El resto del crate
//! solo usa las macros de `log`.

use crate::config::Config;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

fn prepare_logger_config() -> simplelog::Config {
    simplelog::ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Debug)
        .build()
}

/// Inicializa el logger global con el nivel configurado
///
/// Falla si el nivel es inválido o si ya había un logger instalado.
pub fn init_logger(cfg: &Config) -> Result<(), String> {
    let level = cfg.level_filter()?;

    TermLogger::init(
        level,
        prepare_logger_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| format!("Cannot install logger: {}", e))
}
