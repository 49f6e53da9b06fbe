//! Input gating: validate an uploaded manuscript path before any decoding.
//!
//! Rejections happen in cheapest-first order — extension string, then file
//! metadata, then the four magic bytes — so an oversized or mislabeled
//! upload is bounced without reading its content. A gate failure leaves
//! the session untouched; the caller may retry with another file.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The only accepted manuscript extension, compared case-insensitively.
const ACCEPTED_EXTENSION: &str = "docx";

/// ZIP local-file-header magic: every .docx starts with `PK\x03\x04`.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Validate path, extension, size and magic bytes; return the canonical
/// path on success.
pub async fn gate_manuscript(
    path: impl AsRef<Path>,
    max_file_size: u64,
) -> Result<PathBuf, ConvertError> {
    let path = path.as_ref().to_path_buf();

    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false);
    if !extension_ok {
        return Err(ConvertError::UnsupportedExtension { path });
    }

    let meta = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConvertError::FileNotFound { path: path.clone() },
        std::io::ErrorKind::PermissionDenied => {
            ConvertError::PermissionDenied { path: path.clone() }
        }
        _ => ConvertError::Io(e),
    })?;
    if meta.len() > max_file_size {
        return Err(ConvertError::FileTooLarge {
            size: meta.len(),
            limit: max_file_size,
        });
    }

    let magic = read_magic(&path).await?;
    if magic != ZIP_MAGIC {
        return Err(ConvertError::NotADocx { path, magic });
    }

    debug!("Accepted manuscript: {} ({} bytes)", path.display(), meta.len());
    Ok(path)
}

async fn read_magic(path: &Path) -> Result<[u8; 4], ConvertError> {
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ConvertError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    let mut magic = [0u8; 4];
    // A file shorter than four bytes cannot be a ZIP archive either way.
    if file.read_exact(&mut magic).await.is_err() {
        return Err(ConvertError::NotADocx {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(magic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn rejects_wrong_extension() {
        let (_dir, path) = write_temp("paper.pdf", b"%PDF-1.7");
        let err = gate_manuscript(&path, u64::MAX).await.unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedExtension { .. }));
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let (_dir, path) = write_temp("paper.DOCX", b"PK\x03\x04rest");
        gate_manuscript(&path, u64::MAX).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_missing_file() {
        let err = gate_manuscript("/nonexistent/paper.docx", u64::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let (_dir, path) = write_temp("paper.docx", &vec![0u8; 64]);
        let err = gate_manuscript(&path, 16).await.unwrap_err();
        match err {
            ConvertError::FileTooLarge { size, limit } => {
                assert_eq!(size, 64);
                assert_eq!(limit, 16);
            }
            other => panic!("expected FileTooLarge, got {other}"),
        }
    }

    #[tokio::test]
    async fn rejects_wrong_magic() {
        let (_dir, path) = write_temp("paper.docx", b"%PDF-1.7 disguised");
        let err = gate_manuscript(&path, u64::MAX).await.unwrap_err();
        assert!(matches!(err, ConvertError::NotADocx { .. }));
    }

    #[tokio::test]
    async fn rejects_truncated_file() {
        let (_dir, path) = write_temp("paper.docx", b"PK");
        let err = gate_manuscript(&path, u64::MAX).await.unwrap_err();
        assert!(matches!(err, ConvertError::NotADocx { .. }));
    }

    #[tokio::test]
    async fn accepts_zip_magic() {
        let (_dir, path) = write_temp("paper.docx", b"PK\x03\x04whatever");
        let accepted = gate_manuscript(&path, u64::MAX).await.unwrap();
        assert_eq!(accepted, path);
    }
}
