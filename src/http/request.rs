//! # Lectura de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el lector de requests desde cero, consumiendo
//! el stream línea por línea.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Start Line**: `METHOD /path VERSION`, exactamente tres tokens separados por un espacio
//! 2. **Headers**: Pares `Name: Value` (uno por línea, separados en el primer `": "`)
//! 3. **Empty Line**: `\r\n` que termina la lectura
//!
//! El path y los valores de los headers se guardan como bytes crudos: no se
//! exige UTF-8 ni se decodifica nada. El método, la versión y los nombres de
//! header sí deben ser texto.
//!
//! El body nunca se consume, aunque el cliente declare `Content-Length`.

use log::{debug, trace};
use std::borrow::Cow;
use std::io::{BufRead, Read};

/// Largo máximo de una línea (sin contar el `\r\n`)
pub const MAX_LINE_LEN: usize = 8192;

/// Cantidad máxima de headers por request
pub const MAX_HEADERS: usize = 100;

/// Errores que pueden ocurrir durante la lectura del request
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// La primera línea llegó vacía
    #[error("Empty start line")]
    EmptyStartLine,

    /// Start line sin exactamente tres tokens no vacíos, o con método/versión que no son texto
    #[error("Invalid start line: {0:?}")]
    InvalidStartLine(String),

    /// Header sin el separador `": "` o con nombre vacío o no textual
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),

    /// Línea terminada en `\n` sin el `\r` previo
    #[error("Line not terminated by CRLF")]
    LineNotTerminated,

    /// Línea más larga que el límite
    #[error("Line exceeds {0} bytes")]
    LineTooLong(usize),

    /// Más headers que el límite
    #[error("More than {0} headers")]
    TooManyHeaders(usize),

    /// El cliente cerró la conexión antes de la línea vacía
    #[error("Connection closed before end of headers")]
    ConnectionClosed,

    /// Falla de lectura en el socket
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Indica si el error es culpa de la sintaxis enviada por el cliente.
    ///
    /// Estos errores se responden con 400. Los demás (conexión cerrada,
    /// falla de I/O) abortan la conexión sin responder.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ParseError::ConnectionClosed | ParseError::Io(_))
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Método HTTP, tal cual llegó (ej: "GET")
    method: String,

    /// Request-target sin decodificar, en bytes (ej: "/echo/abc")
    path: Vec<u8>,

    /// Versión del protocolo (ej: "HTTP/1.1")
    version: String,

    /// Headers en el orden en que llegaron; el valor queda en bytes
    headers: Vec<(String, Vec<u8>)>,

    /// Siempre vacío: los bodies de request no se leen
    body: Vec<u8>,
}

impl Request {
    /// Lee un request completo (start line + headers) desde un stream.
    ///
    /// Se detiene en la línea vacía. Si el stream termina antes, retorna
    /// `ParseError::ConnectionClosed` en vez de un request parcial.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use adhoc_http::http::Request;
    /// use std::io::BufReader;
    ///
    /// let raw: &[u8] = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: test\r\n\r\n";
    /// let request = Request::read_from(&mut BufReader::new(raw)).unwrap();
    ///
    /// assert_eq!(request.path(), b"/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some(&b"test"[..]));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let start_line = Self::next_line(reader)?;
        trace!("start line: {:?}", String::from_utf8_lossy(&start_line));

        let (method, path, version) = Self::parse_start_line(&start_line)?;

        let mut headers = Vec::new();
        loop {
            let line = Self::next_line(reader)?;
            trace!("header line: {:?}", String::from_utf8_lossy(&line));

            if line.is_empty() {
                break;
            }

            if headers.len() == MAX_HEADERS {
                return Err(ParseError::TooManyHeaders(MAX_HEADERS));
            }
            headers.push(Self::parse_header(&line)?);
        }

        let request = Request {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
        };

        debug!("parsed request: {:?}", request);
        Ok(request)
    }

    /// Parsea un request desde un buffer en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use adhoc_http::http::Request;
    ///
    /// let request = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(request.method(), "GET");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Lee una línea terminada en `\r\n` y la retorna sin el terminador
    fn next_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, ParseError> {
        let limit = (MAX_LINE_LEN + 2) as u64;
        let mut raw = Vec::new();
        let read = reader.by_ref().take(limit).read_until(b'\n', &mut raw)?;

        if !raw.ends_with(b"\n") {
            // Se llegó al límite sin ver el '\n', o el stream terminó a mitad de línea
            if read as u64 == limit {
                return Err(ParseError::LineTooLong(MAX_LINE_LEN));
            }
            return Err(ParseError::ConnectionClosed);
        }

        if !raw.ends_with(b"\r\n") {
            return Err(ParseError::LineNotTerminated);
        }
        raw.truncate(raw.len() - 2);

        Ok(raw)
    }

    /// Parsea la start line
    ///
    /// Formato: `GET /path HTTP/1.1`
    fn parse_start_line(line: &[u8]) -> Result<(String, Vec<u8>, String), ParseError> {
        if line.is_empty() {
            return Err(ParseError::EmptyStartLine);
        }

        let invalid = || ParseError::InvalidStartLine(String::from_utf8_lossy(line).into_owned());

        // Separador de un solo espacio: espacios dobles generan tokens vacíos
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        let method = std::str::from_utf8(parts[0]).map_err(|_| invalid())?;
        let version = std::str::from_utf8(parts[2]).map_err(|_| invalid())?;

        Ok((method.to_string(), parts[1].to_vec(), version.to_string()))
    }

    /// Parsea un header `Name: Value`
    fn parse_header(line: &[u8]) -> Result<(String, Vec<u8>), ParseError> {
        let invalid = || ParseError::InvalidHeader(String::from_utf8_lossy(line).into_owned());

        let split = line
            .windows(2)
            .position(|w| w == b": ")
            .ok_or_else(invalid)?;

        let name = std::str::from_utf8(&line[..split]).map_err(|_| invalid())?;
        if name.is_empty() {
            return Err(invalid());
        }

        Ok((name.to_string(), line[split + 2..].to_vec()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request, sin decodificar
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Path para mostrar en logs (bytes inválidos reemplazados)
    pub fn path_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.path)
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers en orden de llegada
    pub fn headers(&self) -> &[(String, Vec<u8>)] {
        &self.headers
    }

    /// Obtiene un header específico.
    ///
    /// La comparación del nombre es exacta. Si el header se repite,
    /// gana el último valor.
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Obtiene el body del request (siempre vacío)
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
