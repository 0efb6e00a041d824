//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el dispatcher que mapea paths HTTP a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las reglas se evalúan en el orden en que se registran y gana la primera
//! que coincide. Si ninguna coincide, retorna 404 Not Found con body vacío.

use crate::http::{Request, Response, StatusCode};
use log::debug;
use std::path::PathBuf;

/// Header de identificación que llevan todas las respuestas
pub const SERVER_NAME: &str = concat!("adhoc-http/", env!("CARGO_PKG_VERSION"));

/// Datos de solo lectura que los handlers pueden consultar
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// Raíz desde la que se sirven los archivos de `/files`
    pub directory: Option<PathBuf>,
}

/// Tipo de función handler
///
/// Un handler recibe un Request y el contexto, y retorna una Response
pub type Handler = fn(&Request, &RouteContext) -> Response;

/// Cómo se compara el path del request contra una regla
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// El path debe ser idéntico
    Exact(String),

    /// El path debe empezar con este prefijo
    Prefix(String),
}

impl Pattern {
    /// El path se compara byte a byte, sin decodificar
    fn matches(&self, path: &[u8]) -> bool {
        match self {
            Pattern::Exact(p) => path == p.as_bytes(),
            Pattern::Prefix(p) => path.starts_with(p.as_bytes()),
        }
    }
}

/// Router que mapea paths a handlers
pub struct Router {
    /// Reglas en orden de evaluación
    routes: Vec<(Pattern, Handler)>,

    context: RouteContext,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new(context: RouteContext) -> Self {
        Self {
            routes: Vec::new(),
            context,
        }
    }

    /// Registra una regla de path exacto
    ///
    /// # Ejemplo
    /// ```
    /// use adhoc_http::router::{Router, RouteContext};
    /// use adhoc_http::http::{Request, Response, StatusCode};
    ///
    /// fn hello_handler(_req: &Request, _ctx: &RouteContext) -> Response {
    ///     Response::text("hello")
    /// }
    ///
    /// let mut router = Router::new(RouteContext::default());
    /// router.register_exact("/hello", hello_handler);
    ///
    /// let request = Request::parse(b"GET /hello HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.route(&request).status(), StatusCode::Ok);
    /// ```
    pub fn register_exact(&mut self, path: &str, handler: Handler) {
        self.routes.push((Pattern::Exact(path.to_string()), handler));
    }

    /// Registra una regla de prefijo
    pub fn register_prefix(&mut self, prefix: &str, handler: Handler) {
        self.routes.push((Pattern::Prefix(prefix.to_string()), handler));
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si ninguna regla coincide, retorna 404 Not Found con body vacío.
    pub fn route(&self, request: &Request) -> Response {
        let path = request.path();

        let mut response = match self.routes.iter().find(|(pattern, _)| pattern.matches(path)) {
            Some((pattern, handler)) => {
                debug!("route {:?} matched {}", pattern, request.path_lossy());
                handler(request, &self.context)
            }
            None => {
                debug!("no route for {}", request.path_lossy());
                Response::new(StatusCode::NotFound)
            }
        };

        add_common_headers(&mut response);
        response
    }
}

/// Agrega headers comunes a todas las respuestas
///
/// El servidor cierra la conexión después de cada respuesta.
pub fn add_common_headers(response: &mut Response) {
    response.add_header("Server", SERVER_NAME);
    response.add_header("Connection", "close");
}
