//! # adhoc_http
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado directamente sobre sockets TCP.
//! El parser de requests y el serializador de responses están escritos a mano.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Lectura de requests, construcción de responses y status codes
//! - `router`: Reglas de despacho en orden, la primera que coincide gana
//! - `commands`: Handlers de cada ruta (`/`, `/echo/`, `/user-agent`, `/files`)
//! - `server`: Listener TCP y un thread por conexión
//! - `config`: Argumentos CLI y variables de entorno
//! - `logger`: Inicialización del logger
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use adhoc_http::config::Config;
//! use adhoc_http::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod http;
pub mod logger;
pub mod router;
pub mod server;
