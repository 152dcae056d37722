//! Upload validation for invoice files.
//!
//! All checks here run before any decode or OCR work and cost one metadata
//! lookup plus a 1 KiB read at most.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::ValidationError;
use crate::models::config::FileConfig;

/// Supported invoice file kinds, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Jpeg,
    Png,
}

impl FileKind {
    /// Map a lowercase extension to its kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// The MIME type this kind must carry when one is declared.
    pub fn expected_mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Human-readable name used in error messages.
    fn display_name(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Jpeg => "JPEG image",
            Self::Png => "PNG image",
        }
    }

    /// Check the leading bytes against this kind's magic signature.
    fn matches_magic(self, leading: &[u8]) -> bool {
        match self {
            Self::Pdf => leading.starts_with(b"%PDF"),
            Self::Jpeg => leading.starts_with(&[0xff, 0xd8, 0xff]),
            Self::Png => leading.starts_with(&[0x89, 0x50, 0x4e, 0x47]),
        }
    }
}

/// Lowercase extension of a file name, without the dot.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Validate a declared upload without touching the filesystem.
///
/// `declared_mime` is the transport Content-Type when the caller has one;
/// mismatch against the fixed extension mapping is rejected.
pub fn validate_upload(
    name: &str,
    size: u64,
    declared_mime: Option<&str>,
    leading_bytes: &[u8],
    config: &FileConfig,
) -> Result<FileKind, ValidationError> {
    let ext = extension_of(name);

    if !config.supported_formats.iter().any(|f| f == &ext) {
        return Err(ValidationError::UnsupportedFormat {
            extension: ext,
            supported: config.supported_formats.join(", "),
        });
    }

    let kind = FileKind::from_extension(&ext).ok_or(ValidationError::UnsupportedFormat {
        extension: ext.clone(),
        supported: config.supported_formats.join(", "),
    })?;

    if let Some(mime) = declared_mime {
        if mime != kind.expected_mime() {
            return Err(ValidationError::MimeMismatch {
                mime: mime.to_string(),
                extension: ext,
            });
        }
    }

    if size > config.max_file_size {
        return Err(ValidationError::TooLarge {
            actual_mb: size as f64 / (1024.0 * 1024.0),
            max_mb: config.max_file_size as f64 / (1024.0 * 1024.0),
        });
    }

    if size == 0 || leading_bytes.is_empty() {
        return Err(ValidationError::Empty);
    }

    if !kind.matches_magic(leading_bytes) {
        return Err(ValidationError::BadMagic {
            kind: kind.display_name(),
        });
    }

    Ok(kind)
}

/// Validate a file on disk: existence, extension, size, and magic bytes.
pub fn validate_file(path: &Path, config: &FileConfig) -> Result<FileKind, ValidationError> {
    if !path.exists() {
        return Err(ValidationError::Missing);
    }

    let size = fs::metadata(path).map_err(|_| ValidationError::Missing)?.len();

    let mut leading = [0u8; 1024];
    let read = fs::File::open(path)
        .and_then(|mut f| f.read(&mut leading))
        .unwrap_or(0);

    let name = path.to_string_lossy();
    let kind = validate_upload(&name, size, None, &leading[..read], config)?;

    debug!("Validated {} as {:?} ({} bytes)", path.display(), kind, size);
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> FileConfig {
        FileConfig::default()
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = validate_upload("invoice.docx", 10, None, b"PK\x03\x04", &config());
        assert!(matches!(err, Err(ValidationError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_mime_mismatch_rejected() {
        let err = validate_upload(
            "invoice.pdf",
            10,
            Some("image/png"),
            b"%PDF-1.7",
            &config(),
        );
        assert!(matches!(err, Err(ValidationError::MimeMismatch { .. })));
    }

    #[test]
    fn test_matching_mime_accepted() {
        let kind = validate_upload(
            "invoice.pdf",
            10,
            Some("application/pdf"),
            b"%PDF-1.7",
            &config(),
        )
        .unwrap();
        assert_eq!(kind, FileKind::Pdf);
    }

    #[test]
    fn test_oversize_rejected() {
        let size = 11 * 1024 * 1024;
        let err = validate_upload("scan.jpg", size, None, &[0xff, 0xd8, 0xff, 0xe0], &config());
        assert!(matches!(err, Err(ValidationError::TooLarge { .. })));
    }

    #[test]
    fn test_empty_rejected() {
        let err = validate_upload("scan.png", 0, None, b"", &config());
        assert!(matches!(err, Err(ValidationError::Empty)));
    }

    #[test]
    fn test_magic_bytes_per_kind() {
        assert!(validate_upload("a.pdf", 8, None, b"%PDF-1.4", &config()).is_ok());
        assert!(validate_upload("a.jpg", 4, None, &[0xff, 0xd8, 0xff, 0xdb], &config()).is_ok());
        assert!(
            validate_upload("a.png", 8, None, &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a], &config())
                .is_ok()
        );

        // JPEG bytes declared as PNG
        let err = validate_upload("a.png", 4, None, &[0xff, 0xd8, 0xff, 0xdb], &config());
        assert!(matches!(err, Err(ValidationError::BadMagic { .. })));
    }

    #[test]
    fn test_validate_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.7 fake body").unwrap();

        assert_eq!(validate_file(&path, &config()).unwrap(), FileKind::Pdf);

        let missing = dir.path().join("nope.pdf");
        assert!(matches!(
            validate_file(&missing, &config()),
            Err(ValidationError::Missing)
        ));
    }
}
