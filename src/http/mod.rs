//! # Módulo HTTP
//!
//! Implementa el intercambio de mensajes HTTP/1.x desde cero, sin
//! librerías de protocolo de alto nivel. El corazón del módulo es el
//! motor de framing: el código que convierte un byte-stream crudo en
//! start-line + headers + body, y que determina dónde empieza y termina
//! el body bajo las dos estrategias que define HTTP/1.1
//! (`Content-Length` y `Transfer-Encoding: chunked`).
//!
//! ## Pipeline de lectura
//!
//! ```text
//! lector de líneas → parser de start-line → parser de headers
//!                  → resolución de framing → lector de body
//! ```
//!
//! Cada etapa consume exactamente sus propios bytes: el stream no es
//! seekable, así que ninguna etapa puede leer por adelantado más allá de
//! su límite.
//!
//! ## Submódulos
//!
//! - `stream`: lectura de líneas byte a byte sobre cualquier `Read`
//! - `parser`: start-lines, bloque de headers y mensajes completos
//! - `body`: resolución de framing y lectores de body fijo/chunked
//! - `request` / `response`: tipos de mensaje, builders y encoding
//! - `status`: códigos de estado que emite el servidor
//! - `observer`: colaborador advisory de observabilidad
//! - `error`: la taxonomía de dos errores (formato y E/S)

pub mod body;
pub mod error;
pub mod observer;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod stream;

// Re-exportamos los tipos principales para facilitar su uso
pub use body::{
    read_chunked_body, read_fixed_body, read_message_body, resolve_framing, BodyFraming,
};
pub use error::{FormatError, HttpError};
pub use observer::{ConsoleObserver, NullObserver, ParseObserver};
pub use parser::{HttpParser, RequestLine, StatusLine};
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;

use std::collections::HashMap;

/// Headers de un mensaje: claves sin normalizar (búsqueda por string
/// exacto) y último-valor-gana ante claves repetidas
pub type HeaderMap = HashMap<String, String>;
