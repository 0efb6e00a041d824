//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./adhoc_http --directory /tmp/served --port 4221 --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 SERVE_DIR=/tmp/served ./adhoc_http
//! ```

use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "adhoc_http")]
#[command(about = "Servidor HTTP/1.1 minimo sobre sockets TCP")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven los archivos de /files.
    /// Sin este flag, /files siempre responde 404
    #[arg(short, long, env = "SERVE_DIR")]
    pub directory: Option<PathBuf>,

    /// Nivel de log (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use adhoc_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de log ya parseado
    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| format!("Unknown log level: {}", self.log_level))
    }

    /// Timeout de lectura, `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        self.level_filter()?;

        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(format!("Serving directory is not a directory: {}", dir.display()));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto, igual a la del CLI sin flags
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: None,
            log_level: "info".to_string(),
            read_timeout_ms: 0,
        }
    }
}
