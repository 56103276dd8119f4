//! # Lectura de Líneas sobre el Byte-Stream
//! src/http/stream.rs
//!
//! Primitivas de lectura sobre cualquier [`std::io::Read`]. Un socket no es
//! seekable, así que cada primitiva consume exactamente los bytes que le
//! corresponden y deja el cursor posicionado para la siguiente etapa:
//! nunca se lee por adelantado más allá del límite propio.
//!
//! ## Formato de línea
//!
//! ```text
//! GET /form.html HTTP/1.1\r\n
//! ```
//!
//! El terminador reconocido es `\n`; cada `\r` se consume y se descarta en
//! cualquier posición de la línea, no solo pegado al `\n`.

use super::error::{FormatError, HttpError};
use std::io::Read;

/// Lee una línea del stream, byte a byte.
///
/// Retorna la línea (sin terminador ni `\r`) y la cantidad total de bytes
/// consumidos, incluyendo el terminador. Si el stream se agota antes de
/// ver un `\n`, retorna lo acumulado hasta ese punto sin error: un retorno
/// con `consumed == 0` significa que el stream ya estaba en EOF.
///
/// Cada byte se ensancha a `char` uno a uno, así que los valores fuera de
/// ASCII se conservan como Latin-1.
///
/// # Ejemplo
/// ```
/// use http_exchange::http::stream::read_line;
///
/// let mut raw: &[u8] = b"Host: localhost\r\nSiguiente";
/// let (line, consumed) = read_line(&mut raw).unwrap();
///
/// assert_eq!(line, "Host: localhost");
/// assert_eq!(consumed, 17); // 15 visibles + \r + \n
/// ```
pub fn read_line<R: Read>(reader: &mut R) -> Result<(String, usize), HttpError> {
    let mut line = String::new();
    let mut consumed = 0usize;
    let mut byte = [0u8; 1];

    loop {
        let n = reader.read(&mut byte)?;
        if n == 0 {
            // EOF: el caller interpreta una línea vacía o incompleta
            break;
        }
        consumed += 1;

        match byte[0] {
            b'\n' => break,
            b'\r' => continue,
            b => line.push(b as char),
        }
    }

    Ok((line, consumed))
}

/// Consume exactamente dos bytes y exige que sean `\r\n`.
///
/// Se usa para el delimitador obligatorio después de los datos de cada
/// chunk. Cualquier otro par de bytes es [`FormatError::MissingCrlf`];
/// un EOF a mitad del par se propaga como error de E/S.
pub fn skip_crlf<R: Read>(reader: &mut R) -> Result<(), HttpError> {
    let mut pair = [0u8; 2];
    reader.read_exact(&mut pair)?;

    if &pair != b"\r\n" {
        return Err(FormatError::MissingCrlf.into());
    }
    Ok(())
}
