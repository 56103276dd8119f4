//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor HTTP/1.x bloqueante que maneja múltiples conexiones
//! simultáneas usando threads: cada conexión se procesa en su propio
//! thread, con su propio parser, y no comparte estado mutable con las
//! demás. Se atiende un mensaje por conexión (sin keep-alive).

use crate::config::ServeConfig;
use crate::http::{ConsoleObserver, HttpError, HttpParser, Request, Response, StatusCode};
use serde::Serialize;
use std::fs;
use std::io::{self, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Instant;

/// Recibo que el servidor devuelve ante un POST
#[derive(Debug, Serialize)]
struct PostReceipt {
    /// Bytes de body recibidos tras resolver el framing
    received: usize,

    /// Content-Type declarado por el cliente, si vino
    content_type: Option<String>,
}

/// Servidor HTTP/1.x concurrente
pub struct Server {
    config: ServeConfig,
}

impl Server {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Acepta conexiones indefinidamente, una por thread.
    ///
    /// Los errores de accept se registran y el loop sigue; los errores
    /// dentro de una conexión mueren con su thread.
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Modo concurrente: un thread por conexion\n");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    println!(" ✅ Nueva conexión desde: {}", peer_addr);

                    let config = self.config.clone();
                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &config) {
                            eprintln!("   ❌ Error en thread: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión ya aceptada: parsea un request del stream y
    /// escribe la respuesta.
    ///
    /// Un error de formato se responde con `400 Bad Request`; un error de
    /// E/S se propaga al caller, que decide cerrar y registrar.
    pub fn handle_connection(stream: TcpStream, config: &ServeConfig) -> Result<(), HttpError> {
        let start = Instant::now();
        let request_id = Self::request_id(&start);

        let parser = HttpParser::new();
        let mut observer = ConsoleObserver;
        let mut reader = BufReader::new(&stream);

        let response = match parser.read_request(&mut reader, &mut observer) {
            Ok(None) => {
                println!("   ✅ Conexión cerrada sin request");
                return Ok(());
            }
            Ok(Some(request)) => {
                println!(
                    "   ✅ {} {} [req_id: {}]",
                    request.method(),
                    request.target(),
                    &request_id[..8]
                );
                Self::respond(&request, config)
            }
            Err(HttpError::Format(e)) => {
                println!("   ❌ Parse error: {}", e);
                Response::error(StatusCode::BadRequest, &e.to_string())
            }
            Err(e) => return Err(e),
        };

        let mut response = response;
        response.add_header("X-Request-Id", &request_id);

        let mut writer = &stream;
        writer.write_all(&response.to_bytes())?;
        writer.flush()?;

        let latency = start.elapsed();
        println!(
            "   ✅ {} {} ({:.2}ms)\n",
            response.code(),
            response.reason(),
            latency.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    /// Decide la respuesta para un request ya parseado.
    ///
    /// El método se compara en minúsculas; los no reconocidos caen en la
    /// página por defecto, igual que un GET.
    fn respond(request: &Request, config: &ServeConfig) -> Response {
        match request.method().to_lowercase().as_str() {
            "post" => {
                // El body ya fue delimitado y leído por el motor de framing
                println!("   post begin");
                if let Some(text) = request.body_string() {
                    println!("   {}", text);
                }
                println!("   post end");

                let receipt = PostReceipt {
                    received: request.body().len(),
                    content_type: request.header("Content-Type").map(|s| s.to_string()),
                };
                let body = serde_json::to_string(&receipt)
                    .unwrap_or_else(|_| "{}".to_string());

                Response::new(StatusCode::Ok)
                    .with_version(request.version())
                    .with_header("Content-Type", "application/json")
                    .with_body(&body)
            }
            method => {
                if method == "get" && !request.query_params().is_empty() {
                    println!("   uri: {}", request.path());
                    println!("   get-query: {} parámetros", request.query_params().len());
                }
                Self::page_response(request.version(), config)
            }
        }
    }

    /// Respuesta con la página configurada; la status-line refleja la
    /// versión que vino en el request
    fn page_response(version: &str, config: &ServeConfig) -> Response {
        match fs::read(&config.page) {
            Ok(contents) => Response::new(StatusCode::Ok)
                .with_version(version)
                .with_header("Content-Type", "text/html; charset=utf-8")
                .with_body_bytes(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Response::error(
                StatusCode::NotFound,
                &format!("page not found: {}", config.page),
            )
            .with_version(version),
            Err(e) => Response::error(
                StatusCode::InternalServerError,
                &format!("cannot read page: {}", e),
            )
            .with_version(version),
        }
    }

    /// Identificador único del request para los logs y el header
    /// `X-Request-Id`
    fn request_id(start: &Instant) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        start.elapsed().as_nanos().hash(&mut hasher);
        thread::current().id().hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}
