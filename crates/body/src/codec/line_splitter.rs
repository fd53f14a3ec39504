//! Splits a buffered body into lines without interpreting their content.

use bytes::Bytes;

/// The line delimiter of multipart bodies.
pub const CRLF: &[u8] = b"\r\n";

/// Splits `bytes` on every occurrence of `delimiter`.
///
/// Lines are zero-copy slices of `bytes` and never contain the delimiter. Bytes after the last
/// delimiter form the final line; when the buffer ends exactly with a delimiter no empty
/// trailing line is produced. An empty delimiter yields the whole buffer as one line.
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use micro_body::codec::{divide, CRLF};
///
/// let lines = divide(&Bytes::from_static(b"a\r\n\r\nb"), CRLF);
/// assert_eq!(lines, vec![Bytes::from_static(b"a"), Bytes::new(), Bytes::from_static(b"b")]);
/// ```
pub fn divide(bytes: &Bytes, delimiter: &[u8]) -> Vec<Bytes> {
    if delimiter.is_empty() {
        return if bytes.is_empty() { vec![] } else { vec![bytes.clone()] };
    }

    let mut lines = Vec::new();
    let mut cut = 0;
    let mut cursor = 0;

    while cursor + delimiter.len() <= bytes.len() {
        if &bytes[cursor..cursor + delimiter.len()] == delimiter {
            lines.push(bytes.slice(cut..cursor));
            cursor += delimiter.len();
            cut = cursor;
        } else {
            cursor += 1;
        }
    }

    if cut < bytes.len() {
        lines.push(bytes.slice(cut..));
    }

    lines
}
