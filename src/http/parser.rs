//! # Parser de Mensajes HTTP/1.x
//! src/http/parser.rs
//!
//! Implementa el pipeline completo de lectura de un mensaje sobre un
//! byte-stream: start-line → headers → resolución de framing → body.
//! Cada etapa consume exactamente sus propios bytes y deja el cursor
//! posicionado para la siguiente.
//!
//! ## Formato de un request
//!
//! ```text
//! GET /form.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 12\r\n
//! \r\n
//! <12 bytes de body>
//! ```
//!
//! Los patrones exigen exactamente tres tokens separados por corridas de
//! espacios en blanco. Método, target, versión y reason-phrase se aceptan
//! como tokens opacos: decidir qué hacer con un método desconocido es
//! asunto de la capa de arriba, no del parser.

use super::body::{read_chunked_body, read_fixed_body, read_message_body, resolve_framing};
use super::error::{FormatError, HttpError};
use super::observer::ParseObserver;
use super::request::Request;
use super::response::Response;
use super::stream::read_line;
use super::{BodyFraming, HeaderMap};
use regex::Regex;
use std::io::Read;

const REQUEST_LINE_PATTERN: &str = r"^(?P<method>\S+)\s+(?P<target>\S+)\s+(?P<version>\S+)$";
const STATUS_LINE_PATTERN: &str = r"^(?P<version>\S+)\s+(?P<code>\d+)\s+(?P<reason>\S+)$";
const HEADER_PATTERN: &str = r"^(?P<key>\S+):\s*(?P<value>\S.*)$";

/// Request-line parseada: `METHOD SP TARGET SP VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: String,
}

/// Status-line parseada: `VERSION SP CODE SP REASON`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub code: u16,
    pub reason: String,
}

/// Parser de mensajes HTTP/1.x sobre un stream bloqueante.
///
/// Se construye uno por conexión: compila sus propios matchers y no
/// comparte estado mutable con ningún otro parser ni con el proceso.
pub struct HttpParser {
    request_line: Regex,
    status_line: Regex,
    header_line: Regex,
}

impl HttpParser {
    /// Crea un parser con sus tres matchers compilados
    pub fn new() -> Self {
        Self {
            request_line: Regex::new(REQUEST_LINE_PATTERN).expect("request-line pattern"),
            status_line: Regex::new(STATUS_LINE_PATTERN).expect("status-line pattern"),
            header_line: Regex::new(HEADER_PATTERN).expect("header pattern"),
        }
    }

    /// Parsea una request-line.
    ///
    /// Deben ser exactamente tres tokens no vacíos; una línea vacía, con
    /// tokens de más o de menos es `IllegalStartLine`.
    pub fn parse_request_line(&self, line: &str) -> Result<RequestLine, HttpError> {
        let caps = self
            .request_line
            .captures(line)
            .ok_or_else(|| FormatError::IllegalStartLine(line.to_string()))?;

        Ok(RequestLine {
            method: caps["method"].to_string(),
            target: caps["target"].to_string(),
            version: caps["version"].to_string(),
        })
    }

    /// Parsea una status-line.
    ///
    /// El token del medio debe ser solo dígitos decimales. El
    /// reason-phrase es UN token: una frase con espacios no matchea y es
    /// error de formato, no se fusiona.
    pub fn parse_status_line(&self, line: &str) -> Result<StatusLine, HttpError> {
        let caps = self
            .status_line
            .captures(line)
            .ok_or_else(|| FormatError::IllegalStartLine(line.to_string()))?;

        let code = caps["code"]
            .parse::<u16>()
            .map_err(|_| FormatError::IllegalStartLine(line.to_string()))?;

        Ok(StatusLine {
            version: caps["version"].to_string(),
            code,
            reason: caps["reason"].to_string(),
        })
    }

    /// Parsea el bloque de headers hasta la línea vacía separadora.
    ///
    /// Cada línea debe tener la forma `KEY: VALUE`, con `KEY` sin espacios
    /// y `VALUE` no vacío tras descartar el whitespace inicial. Las claves
    /// se guardan tal como llegan (sin normalizar mayúsculas) y ante una
    /// clave repetida gana el último valor.
    ///
    /// Una línea malformada aborta el parsing: no hay recuperación
    /// parcial del bloque.
    pub fn parse_headers<R: Read>(
        &self,
        reader: &mut R,
        observer: &mut dyn ParseObserver,
    ) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();

        loop {
            let (line, _) = read_line(reader)?;
            if line.is_empty() {
                // Línea en blanco: fin del bloque (y también EOF)
                break;
            }

            let caps = self
                .header_line
                .captures(&line)
                .ok_or_else(|| FormatError::IllegalHeader(line.clone()))?;

            let key = caps["key"].to_string();
            let value = caps["value"].to_string();

            observer.on_header(&key, &value);
            headers.insert(key, value);
        }

        Ok(headers)
    }

    /// Lee un request completo del stream.
    ///
    /// Retorna `Ok(None)` si el stream ya estaba en EOF (el peer cerró sin
    /// enviar nada). Un request sin header de framing no tiene body; con
    /// `Content-Length` o `Transfer-Encoding: chunked` el body se lee
    /// byte-exacto según la estrategia resuelta.
    ///
    /// # Ejemplo
    /// ```
    /// use http_exchange::http::{HttpParser, NullObserver};
    ///
    /// let parser = HttpParser::new();
    /// let mut raw: &[u8] = b"GET /form.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    ///
    /// let request = parser.read_request(&mut raw, &mut NullObserver).unwrap().unwrap();
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_request<R: Read>(
        &self,
        reader: &mut R,
        observer: &mut dyn ParseObserver,
    ) -> Result<Option<Request>, HttpError> {
        let (line, consumed) = read_line(reader)?;
        if consumed == 0 {
            return Ok(None);
        }

        let start = self.parse_request_line(&line)?;
        observer.on_request_line(&start.method, &start.target, &start.version);

        let headers = self.parse_headers(reader, observer)?;

        let body = match resolve_framing(&headers)? {
            BodyFraming::Fixed(length) => read_fixed_body(reader, length)?,
            BodyFraming::Chunked => read_chunked_body(reader)?,
            BodyFraming::Unframed => Vec::new(),
        };

        Ok(Some(Request::from_parts(
            start.method,
            start.target,
            start.version,
            headers,
            body,
        )))
    }

    /// Lee una respuesta completa del stream.
    ///
    /// A diferencia de un request, una respuesta DEBE traer framing: sin
    /// `Content-Length` ni `Transfer-Encoding: chunked` no hay forma
    /// segura de delimitar el body y la lectura falla con
    /// `MissingFraming`.
    pub fn read_response<R: Read>(
        &self,
        reader: &mut R,
        observer: &mut dyn ParseObserver,
    ) -> Result<Response, HttpError> {
        let (line, _) = read_line(reader)?;
        let start = self.parse_status_line(&line)?;
        observer.on_status_line(&start.version, start.code, &start.reason);

        let headers = self.parse_headers(reader, observer)?;
        let body = read_message_body(reader, &headers)?;

        Ok(Response::from_parts(
            start.version,
            start.code,
            start.reason,
            headers,
            body,
        ))
    }
}

impl Default for HttpParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::NullObserver;

    // ==================== request-line ====================

    #[test]
    fn test_request_line_roundtrip() {
        let parser = HttpParser::new();
        let line = parser.parse_request_line("GET / HTTP/1.1").unwrap();

        assert_eq!(line.method, "GET");
        assert_eq!(line.target, "/");
        assert_eq!(line.version, "HTTP/1.1");
    }

    #[test]
    fn test_request_line_multiple_spaces() {
        let parser = HttpParser::new();
        let line = parser.parse_request_line("POST   /submit\t HTTP/1.0").unwrap();

        assert_eq!(line.method, "POST");
        assert_eq!(line.target, "/submit");
    }

    #[test]
    fn test_request_line_opaque_tokens() {
        // Método y versión no se validan semánticamente
        let parser = HttpParser::new();
        let line = parser.parse_request_line("BREW /pot COFFEE/1.0").unwrap();

        assert_eq!(line.method, "BREW");
        assert_eq!(line.version, "COFFEE/1.0");
    }

    #[test]
    fn test_request_line_too_few_tokens() {
        let parser = HttpParser::new();
        let result = parser.parse_request_line("GET /");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    #[test]
    fn test_request_line_too_many_tokens() {
        // Un cuarto token no se fusiona en silencio
        let parser = HttpParser::new();
        let result = parser.parse_request_line("GET / HTTP/1.1 extra");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    #[test]
    fn test_request_line_empty() {
        let parser = HttpParser::new();
        let result = parser.parse_request_line("");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    // ==================== status-line ====================

    #[test]
    fn test_status_line_roundtrip() {
        let parser = HttpParser::new();
        let line = parser.parse_status_line("HTTP/1.1 200 OK").unwrap();

        assert_eq!(line.version, "HTTP/1.1");
        assert_eq!(line.code, 200);
        assert_eq!(line.reason, "OK");
    }

    #[test]
    fn test_status_line_non_numeric_code() {
        let parser = HttpParser::new();
        let result = parser.parse_status_line("HTTP/1.1 OK 200");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    #[test]
    fn test_status_line_multiword_reason_rejected() {
        // El reason-phrase es un único token; "Not Found" no matchea
        let parser = HttpParser::new();
        let result = parser.parse_status_line("HTTP/1.1 404 Not Found");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    #[test]
    fn test_status_line_code_overflow() {
        let parser = HttpParser::new();
        let result = parser.parse_status_line("HTTP/1.1 99999 Huge");
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    // ==================== headers ====================

    #[test]
    fn test_headers_basic_block() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"Content-Length: 10\r\nHost: localhost\r\n\r\n";
        let headers = parser.parse_headers(&mut raw, &mut NullObserver).unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Length"), Some(&"10".to_string()));
        assert_eq!(headers.get("Host"), Some(&"localhost".to_string()));
        assert_eq!(raw, b"");
    }

    #[test]
    fn test_headers_value_keeps_inner_spaces() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"User-Agent:   curl/7.68.0 (x86_64)\r\n\r\n";
        let headers = parser.parse_headers(&mut raw, &mut NullObserver).unwrap();

        // Solo se descarta el whitespace inicial del valor
        assert_eq!(
            headers.get("User-Agent"),
            Some(&"curl/7.68.0 (x86_64)".to_string())
        );
    }

    #[test]
    fn test_headers_case_sensitive_keys() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"content-length: 5\r\n\r\n";
        let headers = parser.parse_headers(&mut raw, &mut NullObserver).unwrap();

        // Las claves no se normalizan: la búsqueda es por string exacto
        assert_eq!(headers.get("Content-Length"), None);
        assert_eq!(headers.get("content-length"), Some(&"5".to_string()));
    }

    #[test]
    fn test_headers_duplicate_last_wins() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"X-Tag: uno\r\nX-Tag: dos\r\n\r\n";
        let headers = parser.parse_headers(&mut raw, &mut NullObserver).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Tag"), Some(&"dos".to_string()));
    }

    #[test]
    fn test_headers_missing_colon() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"BadHeader\r\n\r\n";
        let result = parser.parse_headers(&mut raw, &mut NullObserver);
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalHeader(_)))
        ));
    }

    #[test]
    fn test_headers_empty_value() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"X-Empty:\r\n\r\n";
        let result = parser.parse_headers(&mut raw, &mut NullObserver);
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalHeader(_)))
        ));
    }

    #[test]
    fn test_headers_stop_at_blank_line() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"Host: aqui\r\n\r\nNo-Header: body\r\n";
        let headers = parser.parse_headers(&mut raw, &mut NullObserver).unwrap();

        assert_eq!(headers.len(), 1);
        // Lo que sigue a la línea en blanco queda sin consumir
        assert_eq!(raw, b"No-Header: body\r\n");
    }

    #[test]
    fn test_headers_observer_sees_each_header() {
        struct Counter(usize);
        impl crate::http::ParseObserver for Counter {
            fn on_header(&mut self, _key: &str, _value: &str) {
                self.0 += 1;
            }
        }

        let parser = HttpParser::new();
        let mut raw: &[u8] = b"A: 1\r\nB: 2\r\nC: 3\r\n\r\n";
        let mut counter = Counter(0);
        parser.parse_headers(&mut raw, &mut counter).unwrap();

        assert_eq!(counter.0, 3);
    }

    // ==================== read_request ====================

    #[test]
    fn test_read_request_without_body() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"GET /form.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let request = parser
            .read_request(&mut raw, &mut NullObserver)
            .unwrap()
            .unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/form.html");
        assert_eq!(request.version(), "HTTP/1.1");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_read_request_with_fixed_body() {
        let parser = HttpParser::new();
        let mut raw: &[u8] =
            b"POST /submit HTTP/1.1\r\nContent-Length: 10\r\n\r\npost-value";
        let request = parser
            .read_request(&mut raw, &mut NullObserver)
            .unwrap()
            .unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.body(), b"post-value");
        assert_eq!(raw, b"");
    }

    #[test]
    fn test_read_request_with_chunked_body() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n";
        let request = parser
            .read_request(&mut raw, &mut NullObserver)
            .unwrap()
            .unwrap();

        assert_eq!(request.body(), b"Wikipedia");
    }

    #[test]
    fn test_read_request_peer_closed() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"";
        let request = parser.read_request(&mut raw, &mut NullObserver).unwrap();

        assert!(request.is_none());
    }

    #[test]
    fn test_read_request_blank_start_line() {
        // Una línea en blanco enviada como start-line sí es un error:
        // el peer mandó bytes pero no un request
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"\r\n";
        let result = parser.read_request(&mut raw, &mut NullObserver);
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }

    #[test]
    fn test_read_request_bare_lf_lines() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"GET / HTTP/1.1\nHost: localhost\n\n";
        let request = parser
            .read_request(&mut raw, &mut NullObserver)
            .unwrap()
            .unwrap();

        assert_eq!(request.header("Host"), Some("localhost"));
    }

    // ==================== read_response ====================

    #[test]
    fn test_read_response_fixed() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhola!resto";
        let response = parser.read_response(&mut raw, &mut NullObserver).unwrap();

        assert_eq!(response.version(), "HTTP/1.1");
        assert_eq!(response.code(), 200);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.body(), b"hola!");
        // El cursor queda tras el body
        assert_eq!(raw, b"resto");
    }

    #[test]
    fn test_read_response_chunked() {
        let parser = HttpParser::new();
        let mut raw: &[u8] =
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n";
        let response = parser.read_response(&mut raw, &mut NullObserver).unwrap();

        assert_eq!(response.body(), b"Wikipedia");
    }

    #[test]
    fn test_read_response_without_framing_fails() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"HTTP/1.1 200 OK\r\nServer: x\r\n\r\n";
        let result = parser.read_response(&mut raw, &mut NullObserver);
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::MissingFraming))
        ));
    }

    #[test]
    fn test_read_response_empty_stream() {
        let parser = HttpParser::new();
        let mut raw: &[u8] = b"";
        let result = parser.read_response(&mut raw, &mut NullObserver);
        assert!(matches!(
            result,
            Err(HttpError::Format(FormatError::IllegalStartLine(_)))
        ));
    }
}
