//! Content-type classification by file extension.

use std::path::Path;

/// Extensions served as raw bytes, without a `Charset` header.
pub const BINARY_TYPES: &[&str] = &["PNG", "JPEG", "JPG"];

/// Fallback for extensions missing from the table.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Upper-cased extension of `path`, or an empty string when it has none.
pub fn file_type(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_uppercase())
        .unwrap_or_default()
}

pub fn content_type(file_type: &str) -> &'static str {
    match file_type {
        "HTML" | "HTM" => "text/html",
        "CSS" => "text/css",
        "JS" => "text/javascript",
        "TXT" => "text/plain",
        "PHP" => "text/php",
        "PNG" => "image/png",
        "JPEG" | "JPG" => "image/jpeg",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

pub fn is_binary(file_type: &str) -> bool {
    BINARY_TYPES.contains(&file_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_last_extension() {
        assert_eq!(file_type(Path::new("root/archive.tar.png")), "PNG");
        assert_eq!(file_type(Path::new("root/style.css")), "CSS");
        assert_eq!(file_type(Path::new("root/README")), "");
        assert!(is_binary("JPG"));
        assert!(!is_binary("PHP"));
        assert_eq!(content_type("PHP"), "text/php");
        assert_eq!(content_type("WEBM"), "text/plain");
    }
}
