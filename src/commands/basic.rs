//! # Handlers Básicos
//! src/commands/basic.rs
//!
//! Handlers que solo dependen del request:
//! - `/`: Respuesta vacía 200
//! - `/echo/{texto}`: Devuelve el texto tal cual
//! - `/user-agent`: Devuelve el header `User-Agent`

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;

/// Prefijo de la ruta echo
pub const ECHO_PREFIX: &str = "/echo/";

/// Handler para `/`
///
/// 200 OK sin body.
pub fn root_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para `/echo/{texto}`
///
/// El resto del path, sin decodificar, pasa a ser el body byte por byte.
///
/// # Ejemplo
/// ```text
/// GET /echo/abc HTTP/1.1  →  200 OK, Content-Type: text/plain, body "abc"
/// ```
pub fn echo_handler(req: &Request, _ctx: &RouteContext) -> Response {
    let text = req.path().strip_prefix(ECHO_PREFIX.as_bytes()).unwrap_or(&[]);
    Response::text(text)
}

/// Handler para `/user-agent`
///
/// Si el header no viene, el body queda vacío.
pub fn user_agent_handler(req: &Request, _ctx: &RouteContext) -> Response {
    Response::text(req.header("User-Agent").unwrap_or(&[]))
}
