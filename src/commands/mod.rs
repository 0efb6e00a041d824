//! # Handlers del Servidor
//!
//! Este módulo contiene los handlers de cada ruta y arma el router
//! con las reglas en orden de evaluación:
//!
//! 1. `/` (exacto)
//! 2. `/echo/` (prefijo)
//! 3. `/user-agent` (prefijo)
//! 4. `/files` (prefijo)
//! 5. Cualquier otra cosa: 404
//!
//! Cada handler es una función que recibe un Request y el contexto
//! de solo lectura, y retorna una Response.

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;

use crate::router::{RouteContext, Router};

/// Crea el router con todas las rutas del servidor
pub fn build_router(context: RouteContext) -> Router {
    let mut router = Router::new(context);

    router.register_exact("/", root_handler);
    router.register_prefix(ECHO_PREFIX, echo_handler);
    router.register_prefix("/user-agent", user_agent_handler);
    router.register_prefix("/files", files_handler);

    router
}
