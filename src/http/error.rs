//! # Errores del Protocolo HTTP
//! src/http/error.rs
//!
//! Define los dos tipos de error que puede producir el motor de framing:
//!
//! - [`FormatError`]: el mensaje viola el formato del protocolo. Siempre
//!   aborta el mensaje actual — los offsets de bytes ya no son confiables
//!   después del punto de falla, así que no hay recuperación parcial.
//! - [`HttpError::Io`]: falla de lectura/escritura en el stream subyacente
//!   (incluye cierre prematuro del peer). Se propaga al caller, que decide
//!   si cierra la conexión.
//!
//! El motor nunca sustituye un valor por defecto ante un campo malformado.

use std::fmt;
use std::io;

/// Error producido al leer o parsear un mensaje HTTP
#[derive(Debug)]
pub enum HttpError {
    /// El mensaje viola el formato del protocolo (start-line, header,
    /// chunk-size o longitud malformados)
    Format(FormatError),

    /// Falla de E/S en el stream subyacente
    Io(io::Error),
}

/// Violaciones de formato detectadas durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// La start-line no tiene exactamente tres tokens válidos
    IllegalStartLine(String),

    /// Línea de header sin la forma `KEY: VALUE`
    IllegalHeader(String),

    /// `Content-Length` no es un entero decimal no negativo
    IllegalContentLength(String),

    /// Línea de tamaño de chunk que no es hexadecimal
    IllegalChunkSize(String),

    /// Faltó el `\r\n` obligatorio después de los datos de un chunk
    MissingCrlf,

    /// El mensaje no trae ningún header de framing reconocido,
    /// así que el body no puede delimitarse de forma segura
    MissingFraming,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::IllegalStartLine(line) => write!(f, "Illegal start-line: {}", line),
            FormatError::IllegalHeader(line) => write!(f, "Illegal header: {}", line),
            FormatError::IllegalContentLength(value) => {
                write!(f, "Illegal Content-Length: {}", value)
            }
            FormatError::IllegalChunkSize(line) => write!(f, "Illegal chunk size: {}", line),
            FormatError::MissingCrlf => write!(f, "Missing CRLF after chunk data"),
            FormatError::MissingFraming => write!(f, "No framing header to delimit the body"),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Format(e) => write!(f, "{}", e),
            HttpError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Format(_) => None,
            HttpError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        HttpError::Io(e)
    }
}

impl From<FormatError> for HttpError {
    fn from(e: FormatError) -> Self {
        HttpError::Format(e)
    }
}
