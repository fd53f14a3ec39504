//! Recognizes the header lines of a multipart part.
//!
//! Labels are matched case-insensitively at the start of the line. A missing parameter or a
//! missing closing quote is never an error.

use crate::protocol::HeaderKind;

const CONTENT_TYPE: &str = "content-type:";
const CONTENT_DISPOSITION: &str = "content-disposition:";
const CONTENT_TRANSFER_ENCODING: &str = "content-transfer-encoding:";

const NAME_PARAM: &str = "name=";
const FILENAME_PARAM: &str = "filename=";

/// A recognized part header, together with the original line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartHeader {
    ContentType { line: String, content_type: String },
    Disposition { line: String, name: Option<String>, filename: Option<String> },
    TransferEncoding { line: String },
}

impl PartHeader {
    pub fn kind(&self) -> HeaderKind {
        match self {
            PartHeader::ContentType { .. } => HeaderKind::ContentType,
            PartHeader::Disposition { .. } => HeaderKind::Disposition,
            PartHeader::TransferEncoding { .. } => HeaderKind::TransferEncoding,
        }
    }

    pub fn line(&self) -> &str {
        match self {
            PartHeader::ContentType { line, .. }
            | PartHeader::Disposition { line, .. }
            | PartHeader::TransferEncoding { line } => line,
        }
    }
}

/// Classifies one line of a part.
///
/// Returns `None` when the line is not a header the multipart decoder understands, including
/// every line that is not valid utf8: such a line is body data.
pub fn classify(line: &[u8]) -> Option<PartHeader> {
    let line = std::str::from_utf8(line).ok()?;

    if let Some(value) = strip_label(line, CONTENT_TYPE) {
        return Some(PartHeader::ContentType { line: line.to_string(), content_type: value.trim().to_string() });
    }

    if let Some(value) = strip_label(line, CONTENT_DISPOSITION) {
        return Some(PartHeader::Disposition {
            line: line.to_string(),
            name: find_param(value, NAME_PARAM),
            filename: find_param(value, FILENAME_PARAM),
        });
    }

    if strip_label(line, CONTENT_TRANSFER_ENCODING).is_some() {
        return Some(PartHeader::TransferEncoding { line: line.to_string() });
    }

    None
}

/// Returns what follows `label` if `line` starts with it, ignoring ascii case.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let prefix = line.get(..label.len())?;
    if prefix.eq_ignore_ascii_case(label) { line.get(label.len()..) } else { None }
}

/// Finds `param` (e.g. `name=`) in a header value and returns its value.
///
/// Only occurrences at a parameter boundary count, so looking up `name=` never matches inside
/// `filename=`.
fn find_param(value: &str, param: &str) -> Option<String> {
    // ascii lowercasing keeps byte offsets unchanged
    let lowercase = value.to_ascii_lowercase();
    let mut from = 0;

    while let Some(offset) = lowercase[from..].find(param) {
        let start = from + offset;
        let at_boundary =
            lowercase[..start].chars().next_back().is_none_or(|c| c == ';' || c.is_ascii_whitespace());
        if at_boundary {
            return Some(param_value(&value[start + param.len()..]));
        }
        from = start + param.len();
    }

    None
}

/// Reads a parameter value: the text between quotes, up to the end of the line if the closing
/// quote is missing, or the bare token up to the next `;`.
fn param_value(rest: &str) -> String {
    let rest = rest.trim_start();
    match rest.strip_prefix('"') {
        Some(quoted) => {
            let end = quoted.find('"').unwrap_or(quoted.len());
            quoted[..end].to_string()
        }
        None => {
            let end = rest.find(';').unwrap_or(rest.len());
            rest[..end].trim_end().to_string()
        }
    }
}
