//! # Handler de Archivos
//! src/commands/files.rs
//!
//! Sirve archivos de solo lectura desde la raíz configurada con `--directory`.
//!
//! - Archivo encontrado: 200 con `Content-Type: application/octet-stream`
//! - No existe, no es archivo regular, o intenta salir de la raíz: 404
//! - Cualquier otra falla del filesystem: 500, solo para este request

use crate::http::{Request, Response, StatusCode};
use crate::router::RouteContext;
use log::{debug, error, warn};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

/// Prefijo de la ruta de archivos
pub const FILES_PREFIX: &str = "/files/";

/// Handler para `/files/{nombre}`
pub fn files_handler(req: &Request, ctx: &RouteContext) -> Response {
    let Some(root) = ctx.directory.as_deref() else {
        debug!("/files requested but no directory is configured");
        return Response::new(StatusCode::NotFound);
    };

    // Un nombre que no es UTF-8 se trata como inexistente
    let relative = match req.path().strip_prefix(FILES_PREFIX.as_bytes()).map(std::str::from_utf8) {
        Some(Ok(name)) if !name.is_empty() => name,
        _ => return Response::new(StatusCode::NotFound),
    };

    let Some(candidate) = join_within(root, relative) else {
        warn!("Path traversal attempt blocked: {}", req.path_lossy());
        return Response::new(StatusCode::NotFound);
    };

    file_response(load_file(root, &candidate), &candidate)
}

/// Une `relative` a la raíz si todos sus componentes son nombres simples.
///
/// Rechaza `..`, rutas absolutas y prefijos de unidad.
fn join_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    plain.then(|| root.join(relative))
}

/// Lee el archivo si, con los symlinks resueltos, sigue dentro de la raíz.
///
/// `Ok(None)` significa que existe pero no se debe servir.
fn load_file(root: &Path, candidate: &Path) -> io::Result<Option<Vec<u8>>> {
    let canonical_root = root.canonicalize()?;
    let canonical = candidate.canonicalize()?;

    if !canonical.starts_with(&canonical_root) {
        warn!(
            "Path traversal attempt blocked: {} -> {}",
            candidate.display(),
            canonical.display()
        );
        return Ok(None);
    }

    if !fs::metadata(&canonical)?.is_file() {
        return Ok(None);
    }

    fs::read(&canonical).map(Some)
}

/// Convierte el resultado de la lectura en una respuesta
fn file_response(result: io::Result<Option<Vec<u8>>>, path: &Path) -> Response {
    match result {
        Ok(Some(data)) => {
            debug!("serving {} ({} bytes)", path.display(), data.len());
            Response::new(StatusCode::Ok)
                .with_header("Content-Type", "application/octet-stream")
                .with_body_bytes(data)
        }
        Ok(None) => Response::new(StatusCode::NotFound),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Response::new(StatusCode::NotFound)
        }
        Err(e) => {
            error!("Cannot read {}: {}", path.display(), e);
            Response::new(StatusCode::InternalServerError)
        }
    }
}
