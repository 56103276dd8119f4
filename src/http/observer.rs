//! # Observador de Parsing
//! src/http/observer.rs
//!
//! Colaborador advisory al que el parser le reporta cada campo que va
//! reconociendo (start-line y headers). Es solo observabilidad: el
//! resultado del parsing no depende de lo que haga el observador.

/// Recibe eventos estructurados durante el parsing de un mensaje.
///
/// Todos los hooks tienen implementación vacía por defecto, así que un
/// observador puede interesarse solo en algunos eventos.
pub trait ParseObserver {
    /// Request-line reconocida
    fn on_request_line(&mut self, _method: &str, _target: &str, _version: &str) {}

    /// Status-line reconocida
    fn on_status_line(&mut self, _version: &str, _code: u16, _reason: &str) {}

    /// Header parseado correctamente
    fn on_header(&mut self, _key: &str, _value: &str) {}
}

/// Observador silencioso, útil en tests
pub struct NullObserver;

impl ParseObserver for NullObserver {}

/// Observador que imprime cada evento por consola
pub struct ConsoleObserver;

impl ParseObserver for ConsoleObserver {
    fn on_request_line(&mut self, method: &str, target: &str, version: &str) {
        println!("   method: {}", method);
        println!("   request-target: {}", target);
        println!("   http-version: {}", version);
    }

    fn on_status_line(&mut self, version: &str, code: u16, reason: &str) {
        println!("   http-version: {}", version);
        println!("   status-code: {}", code);
        println!("   reason-phrase: {}", reason);
    }

    fn on_header(&mut self, key: &str, value: &str) {
        println!("   header: {}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observador de prueba que acumula los headers vistos
    struct Recorder {
        headers: Vec<(String, String)>,
    }

    impl ParseObserver for Recorder {
        fn on_header(&mut self, key: &str, value: &str) {
            self.headers.push((key.to_string(), value.to_string()));
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut observer = NullObserver;
        observer.on_request_line("GET", "/", "HTTP/1.1");
        observer.on_status_line("HTTP/1.1", 200, "OK");
        observer.on_header("Host", "localhost");
    }

    #[test]
    fn test_recorder_sees_headers() {
        let mut recorder = Recorder { headers: Vec::new() };
        recorder.on_header("Host", "localhost");
        recorder.on_header("Accept", "*/*");

        assert_eq!(recorder.headers.len(), 2);
        assert_eq!(recorder.headers[0].0, "Host");
    }
}
