//! # http_exchange
//! src/lib.rs
//!
//! Cliente y servidor HTTP/1.x minimalistas construidos sobre un mismo
//! motor de framing de mensajes: el código que convierte un byte-stream
//! en start-line + headers + body y que delimita el body byte-exacto bajo
//! `Content-Length` o `Transfer-Encoding: chunked`.
//!
//! ## Arquitectura
//!
//! El crate está dividido en módulos especializados:
//! - `http`: el protocolo — framing, parsing y tipos de mensaje
//! - `server`: servidor TCP bloqueante, un thread por conexión
//! - `client`: cliente bloqueante de un intercambio por conexión
//! - `config`: configuración CLI/env de ambos modos
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_exchange::config::ServeConfig;
//! use http_exchange::server::Server;
//!
//! let config = ServeConfig::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod client;
pub mod config;
pub mod http;
pub mod server;
