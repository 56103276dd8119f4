//! # Framing del Body
//! src/http/body.rs
//!
//! Decide cómo se delimita el body de un mensaje dentro del byte-stream y
//! lo lee byte-exacto. HTTP/1.1 define dos estrategias en competencia:
//!
//! - `Content-Length: N` — exactamente N bytes crudos.
//! - `Transfer-Encoding: chunked` — secuencia de chunks `HEX-SIZE \r\n`
//!   + `SIZE bytes` + `\r\n`, terminada por un chunk de tamaño cero.
//!
//! Un off-by-one aquí cuelga la conexión o desincroniza el siguiente
//! mensaje, así que ningún lector puede pasarse del límite que le dicta
//! el framing resuelto.

use super::error::{FormatError, HttpError};
use super::stream::{read_line, skip_crlf};
use super::HeaderMap;
use std::io::{self, Read};

/// Tamaño del buffer de trabajo acotado para lecturas de body
const BODY_BUF_SIZE: usize = 2048;

/// Estrategia de framing resuelta a partir de los headers de un mensaje.
///
/// Exactamente una variante aplica por mensaje.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// `Content-Length` presente: el body son exactamente N bytes
    Fixed(usize),

    /// `Transfer-Encoding: chunked`: el body es una secuencia de chunks
    Chunked,

    /// Ningún header de framing reconocido; la capa consumidora decide
    /// si eso es fatal (respuestas) o significa body vacío (requests)
    Unframed,
}

/// Resuelve la estrategia de framing a partir de los headers parseados.
///
/// `Content-Length` se consulta antes que `Transfer-Encoding`: si ambos
/// están presentes gana la longitud fija. Un `Transfer-Encoding` distinto
/// de `chunked` (comparado sin distinguir mayúsculas) no se reconoce.
///
/// # Ejemplo
/// ```
/// use http_exchange::http::{resolve_framing, BodyFraming, HeaderMap};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("Content-Length".to_string(), "5".to_string());
///
/// assert_eq!(resolve_framing(&headers).unwrap(), BodyFraming::Fixed(5));
/// assert_eq!(resolve_framing(&HeaderMap::new()).unwrap(), BodyFraming::Unframed);
/// ```
pub fn resolve_framing(headers: &HeaderMap) -> Result<BodyFraming, HttpError> {
    if let Some(value) = headers.get("Content-Length") {
        let length = value
            .parse::<usize>()
            .map_err(|_| FormatError::IllegalContentLength(value.clone()))?;
        return Ok(BodyFraming::Fixed(length));
    }

    if let Some(value) = headers.get("Transfer-Encoding") {
        if value.eq_ignore_ascii_case("chunked") {
            return Ok(BodyFraming::Chunked);
        }
    }

    Ok(BodyFraming::Unframed)
}

/// Lee exactamente `length` bytes del stream.
///
/// Acumula sobre un buffer de trabajo acotado hasta completar `length`;
/// jamás lee un byte de más, porque los bytes siguientes pertenecen al
/// próximo mensaje. Si el stream se cierra antes de completar la longitud
/// el error es de E/S (`UnexpectedEof`), no de formato.
pub fn read_fixed_body<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>, HttpError> {
    let mut body = Vec::with_capacity(length);
    let mut buf = [0u8; BODY_BUF_SIZE];
    let mut remaining = length;

    while remaining > 0 {
        let want = remaining.min(buf.len());
        let n = reader.read(&mut buf[..want])?;
        if n == 0 {
            return Err(HttpError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream closed with {} body bytes still missing", remaining),
            )));
        }
        body.extend_from_slice(&buf[..n]);
        remaining -= n;
    }

    Ok(body)
}

/// Lee un body con `Transfer-Encoding: chunked` completo.
///
/// Por cada chunk: una línea con el tamaño en hexadecimal, `tamaño` bytes
/// de datos y un `\r\n` obligatorio. El chunk de tamaño cero termina el
/// body; su propia línea es el último token consumido — no se leen
/// trailers ni un `\r\n` final después de él.
///
/// Los límites entre chunks no se exponen: el resultado es el body lógico
/// concatenado.
///
/// # Ejemplo
/// ```
/// use http_exchange::http::read_chunked_body;
///
/// let mut raw: &[u8] = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n";
/// assert_eq!(read_chunked_body(&mut raw).unwrap(), b"Wikipedia");
/// ```
pub fn read_chunked_body<R: Read>(reader: &mut R) -> Result<Vec<u8>, HttpError> {
    let mut body = Vec::new();

    loop {
        let (line, _) = read_line(reader)?;
        let size = usize::from_str_radix(&line, 16)
            .map_err(|_| FormatError::IllegalChunkSize(line.clone()))?;

        if size == 0 {
            break;
        }

        let data = read_fixed_body(reader, size)?;
        skip_crlf(reader)?;
        body.extend_from_slice(&data);
    }

    Ok(body)
}

/// Resuelve el framing y lee el body de un mensaje que DEBE traer uno.
///
/// Para una respuesta, `Unframed` es fatal: sin header de framing no hay
/// forma segura de delimitar el body, y este motor no trata el cierre de
/// conexión como terminador.
pub fn read_message_body<R: Read>(
    reader: &mut R,
    headers: &HeaderMap,
) -> Result<Vec<u8>, HttpError> {
    match resolve_framing(headers)? {
        BodyFraming::Fixed(length) => read_fixed_body(reader, length),
        BodyFraming::Chunked => read_chunked_body(reader),
        BodyFraming::Unframed => Err(FormatError::MissingFraming.into()),
    }
}
