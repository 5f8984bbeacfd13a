// File validation for the upload path
//
// A file is only eligible for submission once it passes the same rules the
// service enforces on its side: an allow-listed format and a 16 MiB size
// ceiling. Validation happens at staging time, before any request is built,
// so a bad pick is rejected immediately.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest file the service accepts: 16 MiB.
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Why a candidate file was rejected.
///
/// The `Display` strings are shown verbatim in the error notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported file format. Use .txt or .pdf")]
    UnsupportedFormat,

    #[error("File too large. The maximum size is 16MB")]
    TooLarge,

    #[error("Could not read file: {0}")]
    Unreadable(String),
}

/// A user-selected file staged for submission.
///
/// Holds only what the upload needs: display name, size for the info line,
/// the MIME type the service expects, and the path to read bytes from at
/// submission time. Replaced wholesale on re-selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime: &'static str,
    pub path: PathBuf,
}

impl SelectedFile {
    /// One-line summary for the file-info display: name plus readable size.
    pub fn info_line(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size_bytes))
    }
}

/// Map a path to the MIME type the service accepts, by extension.
///
/// A terminal client has no browser-reported content type to trust, so the
/// extension is the gate - the same accept set the service applies to
/// uploaded filenames. Unknown extensions return `None`.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Validate a candidate file against the format and size rules.
///
/// Checks the format first, then the size, so each failure mode produces
/// its own distinct error. On success the returned `SelectedFile` is ready
/// to stage; the caller refreshes the file-info display and clears any
/// visible error.
pub fn validate(path: &Path, size_bytes: u64) -> Result<SelectedFile, ValidationError> {
    let mime = mime_for_path(path).ok_or(ValidationError::UnsupportedFormat)?;

    if size_bytes > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile {
        name,
        size_bytes,
        mime,
        path: path.to_path_buf(),
    })
}

/// Stat a candidate path and validate it in one step.
///
/// This is the filesystem-facing entry point; `validate` stays pure so the
/// rules are testable without touching disk.
pub fn validate_path(path: &Path) -> Result<SelectedFile, ValidationError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ValidationError::Unreadable(format!("{}: {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(ValidationError::Unreadable(format!(
            "{}: not a regular file",
            path.display()
        )));
    }

    validate(path, metadata.len())
}

/// Human-readable file size.
///
/// Unit is chosen by `floor(log(bytes)/log(1024))`, value rounded to two
/// decimal places with trailing zeros dropped - "1.5 KB", not "1.50 KB".
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    // Anything past MB stays in MB; the size ceiling keeps real values well below that.
    let exponent = exponent.min(UNITS.len() - 1);

    let scaled = (bytes as f64 / 1024_f64.powi(exponent as i32) * 100.0).round() / 100.0;
    format!("{} {}", scaled, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_allowed_extensions() {
        assert_eq!(mime_for_path(Path::new("mail.txt")), Some("text/plain"));
        assert_eq!(mime_for_path(Path::new("mail.PDF")), Some("application/pdf"));
    }

    #[test]
    fn test_mime_for_unknown_extension() {
        assert_eq!(mime_for_path(Path::new("mail.docx")), None);
        assert_eq!(mime_for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_validate_rejects_unsupported_format() {
        let err = validate(Path::new("mail.docx"), 100).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedFormat);
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        // One byte over the 16 MiB ceiling
        let err = validate(Path::new("big.pdf"), MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge);
    }

    #[test]
    fn test_validate_accepts_file_at_ceiling() {
        let file = validate(Path::new("inbox/mail.txt"), MAX_FILE_SIZE).unwrap();
        assert_eq!(file.name, "mail.txt");
        assert_eq!(file.mime, "text/plain");
        assert_eq!(file.size_bytes, MAX_FILE_SIZE);
    }

    #[test]
    fn test_format_check_runs_before_size_check() {
        // A file that is both oversized and the wrong format reports the format error
        let err = validate(Path::new("big.docx"), MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedFormat);
    }

    #[test]
    fn test_info_line_includes_name_and_size() {
        let file = validate(Path::new("mail.txt"), 1536).unwrap();
        assert_eq!(file.info_line(), "mail.txt (1.5 KB)");
    }

    #[test]
    fn test_format_file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_file_size_bytes() {
        assert_eq!(format_file_size(512), "512 Bytes");
    }

    #[test]
    fn test_format_file_size_rounds_to_two_decimals() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        // 1234567 / 1024^2 = 1.17738... -> 1.18 MB
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_format_file_size_ceiling() {
        assert_eq!(format_file_size(MAX_FILE_SIZE), "16 MB");
    }
}
