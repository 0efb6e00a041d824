//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 3\r\n
//! Content-Type: text/plain\r\n
//! Server: adhoc-http/0.1.0\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use adhoc_http::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("abc");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nabc"));
//! ```

use super::StatusCode;
use log::warn;

/// Versión fija de todas las respuestas
pub const HTTP_VERSION: &str = "HTTP/1.1";

const CONTENT_LENGTH: &str = "Content-Length";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción.
    /// `Content-Length` siempre está presente y lo mantiene el body.
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío o binario)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con body vacío y `Content-Length: 0`
    ///
    /// # Ejemplo
    /// ```
    /// use adhoc_http::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.header("Content-Length"), Some("0"));
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: vec![(CONTENT_LENGTH.to_string(), "0".to_string())],
            body: Vec::new(),
        }
    }

    /// Crea una respuesta `200 OK` con `Content-Type: text/plain`
    ///
    /// El body se copia tal cual, sin exigir UTF-8.
    pub fn text(body: impl AsRef<[u8]>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body_bytes(body.as_ref().to_vec())
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe en su misma posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    ///
    /// `Content-Length` no se puede fijar a mano: se deriva del body.
    pub fn add_header(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            warn!("ignoring manual {} header ({}), it follows the body", name, value);
            return;
        }
        self.set_header(name, value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (archivos servidos tal cual).
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.set_header(CONTENT_LENGTH, length);
        self
    }

    fn set_header(&mut self, name: &str, value: String) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Status line y headers, incluida la línea vacía final
    ///
    /// Es lo que se muestra en los logs; el body queda afuera.
    pub fn head(&self) -> String {
        // 1. Status line
        let mut head = format!("{} {}\r\n", HTTP_VERSION, self.status);

        // 2. Headers
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }

        // 3. Línea vacía que separa headers del body
        head.push_str("\r\n");
        head
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`, en orden de inserción
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario, sin terminador final
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = self.head();
        let mut result = Vec::with_capacity(head.len() + self.body.len());

        result.extend_from_slice(head.as_bytes());

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene la versión de la respuesta
    pub fn version(&self) -> &'static str {
        HTTP_VERSION
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
