//! # adhoc_http - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, inicializa el logger y corre el servidor.
//! Solo las fallas de arranque terminan el proceso.

use adhoc_http::config::Config;
use adhoc_http::logger;
use adhoc_http::server::{Server, ServerError};

fn run() -> Result<(), ServerError> {
    let config = Config::new();

    logger::init_logger(&config).map_err(ServerError::Logger)?;
    config.validate().map_err(ServerError::Config)?;

    let mut server = Server::new(config);
    server.run()
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
