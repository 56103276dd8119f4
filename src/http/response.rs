//! # Respuestas HTTP/1.x
//! src/http/response.rs
//!
//! Representa una respuesta completa: la que el servidor construye de
//! forma programática y la que el cliente recibe parseada del stream.
//!
//! ## Formato en el wire
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <13 bytes de body>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_exchange::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "application/json")
//!     .with_body(r#"{"ok": true}"#);
//!
//! let bytes = response.to_bytes();
//! // `bytes` está listo para escribirse en el socket
//! ```

use super::status::StatusCode;
use super::HeaderMap;

/// Una respuesta HTTP/1.x completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Versión HTTP de la status-line
    version: String,

    /// Código de estado numérico
    code: u16,

    /// Reason-phrase; al parsear llega como token opaco
    reason: String,

    /// Headers de la respuesta
    headers: HeaderMap,

    /// Body (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta con el código de estado dado, sin headers ni
    /// body, con versión HTTP/1.1
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: "HTTP/1.1".to_string(),
            code: status.as_u16(),
            reason: status.reason_phrase().to_string(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Arma una respuesta desde las piezas ya parseadas del stream
    pub(crate) fn from_parts(
        version: String,
        code: u16,
        reason: String,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            version,
            code,
            reason,
            headers,
            body,
        }
    }

    /// Cambia la versión de la status-line (el servidor refleja la
    /// versión que vino en el request)
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Agrega un header; si ya existe se sobrescribe
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header sobre una respuesta existente
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el body desde un string y calcula `Content-Length`
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Establece el body desde bytes, para contenido binario
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Crea una respuesta de error con body JSON `{"error": "mensaje"}`.
    ///
    /// # Ejemplo
    /// ```
    /// use http_exchange::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::BadRequest, "Illegal header: X");
    /// assert_eq!(response.code(), 400);
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }

    /// Serializa la respuesta al formato de wire:
    /// status-line, headers, línea vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        let status_line = format!("{} {} {}\r\n", self.version, self.code, self.reason);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    // === Accesores ===

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body como String, si es UTF-8 válido
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);

        assert_eq!(response.code(), 200);
        assert_eq!(response.reason(), "OK");
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_header() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Custom", "value");

        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("X-Custom"), Some("value"));
    }

    #[test]
    fn test_with_body_sets_content_length() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.header("Content-Length"), Some("11"));
    }

    #[test]
    fn test_with_version() {
        let response = Response::new(StatusCode::Ok).with_version("HTTP/1.0");
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
    }

    #[test]
    fn test_error_response() {
        let response = Response::error(StatusCode::BadRequest, "Invalid input");

        assert_eq!(response.code(), 400);
        assert_eq!(response.header("Content-Type"), Some("application/json"));

        let body = response.body_string().unwrap();
        assert!(body.contains("Invalid input"));
    }

    #[test]
    fn test_error_response_escapes_message() {
        // El mensaje puede traer comillas (p.ej. una línea malformada)
        let response = Response::error(StatusCode::BadRequest, r#"linea "rara""#);
        let body = response.body_string().unwrap();

        assert!(serde_json::from_str::<serde_json::Value>(&body).is_ok());
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body("Test");

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_to_bytes_empty_body() {
        let response = Response::new(StatusCode::InternalServerError);
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_with_body_bytes() {
        let binary = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::new(StatusCode::Ok).with_body_bytes(binary.clone());

        assert_eq!(response.body(), &binary[..]);
        assert_eq!(response.header("Content-Length"), Some("4"));
    }
}
