//! Input validation: both inputs present, bytes look like a PDF.
//!
//! These checks run before any parsing or network I/O, so a missing file or
//! credential never costs a remote call.

use crate::error::{ContractError, MissingInput};
use secrecy::{ExposeSecret, SecretString};
use std::path::Path;
use tracing::debug;

/// The document must have been supplied.
pub fn require_document(document: Option<&[u8]>) -> Result<&[u8], ContractError> {
    document.ok_or(ContractError::MissingInput(MissingInput::Document))
}

/// The credential must have been supplied and must not be blank.
pub fn require_credential(
    credential: Option<&SecretString>,
) -> Result<&SecretString, ContractError> {
    match credential {
        Some(c) if !c.expose_secret().trim().is_empty() => Ok(c),
        _ => Err(ContractError::MissingInput(MissingInput::Credential)),
    }
}

/// Reject empty buffers and anything that does not start with `%PDF`.
pub fn check_pdf_magic(bytes: &[u8]) -> Result<(), ContractError> {
    if bytes.is_empty() {
        return Err(ContractError::parse("the file is empty"));
    }
    if !bytes.starts_with(b"%PDF") {
        let head: Vec<u8> = bytes.iter().take(4).copied().collect();
        return Err(ContractError::parse(format!(
            "not a PDF file (first bytes: {:?})",
            String::from_utf8_lossy(&head)
        )));
    }
    Ok(())
}

/// Read a local file into memory.
pub async fn read_local(path: &Path) -> Result<Vec<u8>, ContractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ContractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document() {
        let err = require_document(None).unwrap_err();
        assert!(matches!(
            err,
            ContractError::MissingInput(MissingInput::Document)
        ));
        assert_eq!(require_document(Some(b"%PDF")).unwrap(), b"%PDF");
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let blank = SecretString::from("   ");
        for c in [None, Some(&blank)] {
            assert!(matches!(
                require_credential(c).unwrap_err(),
                ContractError::MissingInput(MissingInput::Credential)
            ));
        }
        let key = SecretString::from("sk-test");
        assert!(require_credential(Some(&key)).is_ok());
    }

    #[test]
    fn magic_bytes() {
        assert!(check_pdf_magic(b"%PDF-1.7\n").is_ok());

        let err = check_pdf_magic(b"Hello, this is a text file").unwrap_err();
        assert!(matches!(err, ContractError::DocumentParse { .. }));
        assert!(err.to_string().contains("Hell"), "got: {err}");

        let err = check_pdf_magic(b"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn read_local_missing_file_is_io_error() {
        let err = read_local(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::Io { .. }));
    }
}
