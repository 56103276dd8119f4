//! # Requests HTTP/1.x
//! src/http/request.rs
//!
//! Representa un request completo, tanto el que el servidor recibe ya
//! parseado del stream como el que el cliente construye y serializa.
//!
//! ## Formato en el wire
//!
//! ```text
//! POST /submit?modo=rapido HTTP/1.1\r\n
//! Content-Length: 10\r\n
//! \r\n
//! post-value
//! ```
//!
//! El request-target se conserva como token opaco, pero además se expone
//! una vista derivada `path` + `query_params` (separación en `?`, pares
//! `clave=valor` unidos por `&`, decodificación mínima de `%20` y `+`).

use super::HeaderMap;
use std::collections::HashMap;

/// Un request HTTP/1.x completo
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP como token opaco (no se valida contra una lista)
    method: String,

    /// Request-target tal como vino en la start-line
    target: String,

    /// Path del target, sin query string (ej: "/submit")
    path: String,

    /// Query parameters parseados (ej: {"modo": "rapido"})
    query_params: HashMap<String, String>,

    /// Versión HTTP como token opaco
    version: String,

    /// Headers del mensaje
    headers: HeaderMap,

    /// Body ya delimitado por la estrategia de framing
    body: Vec<u8>,
}

impl Request {
    /// Crea un request para enviar, con versión HTTP/1.1 por defecto.
    ///
    /// # Ejemplo
    /// ```
    /// use http_exchange::http::Request;
    ///
    /// let request = Request::new("GET", "/form.html");
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.version(), "HTTP/1.1");
    /// ```
    pub fn new(method: &str, target: &str) -> Self {
        let (path, query_params) = Self::parse_path_and_query(target);
        Self {
            method: method.to_string(),
            target: target.to_string(),
            path,
            query_params,
            version: "HTTP/1.1".to_string(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Arma un request desde las piezas ya parseadas del stream
    pub(crate) fn from_parts(
        method: String,
        target: String,
        version: String,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        let (path, query_params) = Self::parse_path_and_query(&target);
        Self {
            method,
            target,
            path,
            query_params,
            version,
            headers,
            body,
        }
    }

    /// Agrega un header; si ya existe se sobrescribe
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Establece el body y calcula el `Content-Length` correspondiente.
    ///
    /// # Ejemplo
    /// ```
    /// use http_exchange::http::Request;
    ///
    /// let request = Request::new("POST", "/submit").with_body("post-value");
    /// assert_eq!(request.header("Content-Length"), Some("10"));
    /// ```
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Separa el path de la query string del target
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        if let Some(query_start) = target.find('?') {
            let path = target[..query_start].to_string();
            let query = &target[query_start + 1..];
            (path, Self::parse_query_string(query))
        } else {
            (target.to_string(), HashMap::new())
        }
    }

    /// Parsea "a=1&b=hola" en un mapa {a: 1, b: hola}
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();

        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }
            if let Some(eq_pos) = param.find('=') {
                let key = &param[..eq_pos];
                let value = Self::url_decode(&param[eq_pos + 1..]);
                params.insert(key.to_string(), value);
            } else {
                // Parámetro sin valor (ej: "?debug")
                params.insert(param.to_string(), String::new());
            }
        }

        params
    }

    /// Decodificación mínima: solo %20 y '+' como espacio
    fn url_decode(s: &str) -> String {
        s.replace("%20", " ").replace('+', " ")
    }

    /// Serializa el request al formato de wire, con terminadores CRLF
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        let request_line = format!("{} {} {}\r\n", self.method, self.target, self.version);
        result.extend_from_slice(request_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    // === Accesores ===

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
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
    fn test_new_request() {
        let request = Request::new("GET", "/");

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/");
        assert_eq!(request.path(), "/");
        assert!(request.query_params().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_path_and_query_split() {
        let request = Request::new("GET", "/buscar?texto=hola&rapido=true");

        assert_eq!(request.path(), "/buscar");
        assert_eq!(request.query_param("texto"), Some("hola"));
        assert_eq!(request.query_param("rapido"), Some("true"));
        assert_eq!(request.query_param("ausente"), None);
    }

    #[test]
    fn test_url_decode() {
        let request = Request::new("GET", "/buscar?texto=hola%20mundo&otro=a+b");

        assert_eq!(request.query_param("texto"), Some("hola mundo"));
        assert_eq!(request.query_param("otro"), Some("a b"));
    }

    #[test]
    fn test_query_param_without_value() {
        let request = Request::new("GET", "/lista?debug");

        assert_eq!(request.query_param("debug"), Some(""));
    }

    #[test]
    fn test_with_body_sets_content_length() {
        let request = Request::new("POST", "/submit").with_body("post-value");

        assert_eq!(request.body(), b"post-value");
        assert_eq!(request.header("Content-Length"), Some("10"));
    }

    #[test]
    fn test_to_bytes_get() {
        let request = Request::new("GET", "/form.html");
        let text = String::from_utf8(request.to_bytes()).unwrap();

        assert_eq!(text, "GET /form.html HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn test_to_bytes_post() {
        let request = Request::new("POST", "/submit").with_body("post-value");
        let text = String::from_utf8(request.to_bytes()).unwrap();

        assert!(text.starts_with("POST /submit HTTP/1.1\r\n"));
        assert!(text.contains("Content-Length: 10\r\n"));
        assert!(text.ends_with("\r\n\r\npost-value"));
    }

    #[test]
    fn test_body_string() {
        let request = Request::new("POST", "/").with_body("hola");
        assert_eq!(request.body_string(), Some("hola".to_string()));
    }
}
