use bytes::Bytes;

use crate::errors::AppError;

/// Hard cap on accepted uploads: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Document formats accepted by the analysis endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl FileKind {
    /// Detects the kind from the filename extension, ignoring case.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "doc" => Some(FileKind::Doc),
            "docx" => Some(FileKind::Docx),
            "txt" => Some(FileKind::Txt),
            _ => None,
        }
    }
}

/// One submitted file. Lives only as long as the request that carried it.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Applies the upload rules in order; the first failure wins.
pub fn validate_upload(upload: &Upload) -> Result<FileKind, AppError> {
    let kind = FileKind::from_filename(&upload.filename).ok_or(AppError::InvalidFileType)?;

    if upload.bytes.is_empty() {
        return Err(AppError::EmptyFile);
    }

    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge);
    }

    Ok(kind)
}
