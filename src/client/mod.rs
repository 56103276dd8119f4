//! # Cliente HTTP Bloqueante
//! src/client/mod.rs
//!
//! Cliente mínimo: abre un socket, escribe un request serializado y parsea
//! la respuesta con el mismo motor de framing que usa el servidor. Maneja
//! una conexión y un intercambio por vez; abrir y cerrar la conexión es
//! responsabilidad de quien usa el cliente, nunca del parser.

use crate::http::{HttpError, HttpParser, ParseObserver, Request, Response};
use std::io::{BufReader, Write};
use std::net::TcpStream;

/// Cliente HTTP/1.x sobre una conexión TCP
pub struct Client {
    stream: TcpStream,
    parser: HttpParser,
}

impl Client {
    /// Abre la conexión al host remoto
    pub fn connect(host: &str, port: u16) -> Result<Self, HttpError> {
        let stream = TcpStream::connect((host, port))?;
        Ok(Self {
            stream,
            parser: HttpParser::new(),
        })
    }

    /// Envía un request y parsea la respuesta completa.
    ///
    /// La respuesta debe traer un header de framing (`Content-Length` o
    /// `Transfer-Encoding: chunked`); sin él la lectura falla, porque el
    /// cliente no adivina la longitud a partir del cierre de conexión.
    pub fn fetch(
        &mut self,
        request: &Request,
        observer: &mut dyn ParseObserver,
    ) -> Result<Response, HttpError> {
        self.stream.write_all(&request.to_bytes())?;
        self.stream.flush()?;

        let mut reader = BufReader::new(&self.stream);
        self.parser.read_response(&mut reader, observer)
    }
}
