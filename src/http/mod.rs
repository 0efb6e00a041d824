//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que habla el servidor,
//! desde cero, sin usar librerías de alto nivel:
//!
//! - Lectura de requests línea por línea
//! - Construcción y serialización de responses
//! - Manejo de status codes
//!
//! ## Lo que NO soporta
//!
//! - Conexiones persistentes (una request por conexión)
//! - Chunked transfer encoding
//! - Bodies en el request
//!
//! ### Formato de Request
//!
//! ```text
//! GET /user-agent HTTP/1.1\r\n
//! User-Agent: curl/8.0\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 8\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! curl/8.0
//! ```

pub mod request;   // Lectura de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
