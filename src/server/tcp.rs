//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementacion del servidor TCP que maneja multiples conexiones simultaneas
//! usando threads. Cada conexión se procesa en su propio thread, lee un solo
//! request, escribe una sola respuesta y se cierra.

use crate::commands;
use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::router::{self, RouteContext, Router};
use log::{debug, error, info, warn};
use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Espera máxima por input pendiente antes de cerrar el socket
const DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Bytes sin leer que se descartan como máximo antes de cerrar
const DRAIN_LIMIT: u64 = 64 * 1024;

/// Errores que terminan el proceso (solo durante el arranque)
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Servidor HTTP/1.1 concurrente, un thread por conexión
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let context = RouteContext {
            directory: config.directory.clone(),
        };

        Self {
            router: Arc::new(commands::build_router(context)),
            config,
            listener: None,
        }
    }

    /// Hace el bind del listener sin empezar a aceptar conexiones.
    ///
    /// Retorna la dirección real (útil cuando el puerto configurado es 0).
    pub fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = self.open_listener()?;
        let address = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(address)
    }

    /// Dirección local si ya se hizo el bind
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    fn open_listener(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.address();
        TcpListener::bind(&address).map_err(|source| ServerError::Bind { address, source })
    }

    /// Acepta conexiones para siempre.
    ///
    /// Un error en `accept` se registra y el loop sigue.
    pub fn run(&mut self) -> Result<(), ServerError> {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => self.open_listener()?,
        };

        info!("Servidor escuchando en {}", listener.local_addr()?);
        match &self.config.directory {
            Some(dir) => info!("Sirviendo archivos desde {}", dir.display()),
            None => info!("Ruta /files deshabilitada (sin --directory)"),
        }
        info!("Modo concurrente: un thread por conexion");

        let read_timeout = self.config.read_timeout();

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    debug!("Nueva conexión desde: {} (spawning thread)", peer_addr);

                    let spawned = thread::Builder::new()
                        .name(format!("conn-{}", peer_addr))
                        .spawn(move || {
                            if let Err(e) = Self::handle_connection(stream, &router, read_timeout) {
                                error!("Error en conexión {}: {}", peer_addr, e);
                            }
                        });

                    if let Err(e) = spawned {
                        error!("No se pudo crear el thread de la conexión: {}", e);
                    }
                }
                Err(e) => {
                    error!("Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión: lee un request, responde y cierra.
    ///
    /// Si el cliente cierra (o falla la lectura) antes de terminar los
    /// headers, no se responde nada. Un request malformado recibe 400.
    pub fn handle_connection(
        stream: TcpStream,
        router: &Router,
        read_timeout: Option<Duration>,
    ) -> io::Result<()> {
        let start = Instant::now();
        stream.set_read_timeout(read_timeout)?;

        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let mut reader = BufReader::new(&stream);
        let (response, path) = match Request::read_from(&mut reader) {
            Ok(request) => {
                let path = request.path_lossy().into_owned();
                info!("{} {} {} [{}]", request.method(), path, request.version(), peer);
                (router.route(&request), path)
            }
            Err(e) if e.is_client_error() => {
                warn!("Parse error desde {}: {}", peer, e);
                let mut response = Response::new(StatusCode::BadRequest);
                router::add_common_headers(&mut response);
                (response, "-".to_string())
            }
            Err(e) => {
                warn!("Request abortado desde {}: {}", peer, e);
                return Ok(());
            }
        };

        debug!("Response:\n{}", response.head());

        let bytes = response.to_bytes();
        let mut writer = &stream;
        writer.write_all(&bytes)?;
        writer.flush()?;

        info!(
            "{} -> {} ({:.2}ms)",
            path,
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        // Cerrar con input sin leer manda RST y el cliente puede perder la
        // respuesta: primero FIN, después se descarta lo pendiente.
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            debug!("Shutdown de {} falló: {}", peer, e);
        }
        stream.set_read_timeout(Some(DRAIN_TIMEOUT))?;
        match io::copy(&mut reader.take(DRAIN_LIMIT), &mut io::sink()) {
            Ok(n) if n > 0 => debug!("Descartados {} bytes sin leer de {}", n, peer),
            Ok(_) => {}
            Err(e) => debug!("Drain de {} terminado: {}", peer, e),
        }

        Ok(())
    }
}
