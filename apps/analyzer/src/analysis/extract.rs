use bytes::Bytes;

use crate::analysis::upload::FileKind;
use crate::errors::AppError;

/// Turns an accepted upload into plain text.
///
/// PDFs go through `pdf-extract` on the blocking pool. Every other kind,
/// DOC and DOCX included, is decoded as UTF-8 as-is; binary Word files will
/// usually fail here with `Decode`.
pub async fn extract_text(kind: FileKind, bytes: Bytes) -> Result<String, AppError> {
    match kind {
        FileKind::Pdf => extract_pdf(bytes).await,
        FileKind::Doc | FileKind::Docx | FileKind::Txt => decode_utf8(&bytes),
    }
}

async fn extract_pdf(bytes: Bytes) -> Result<String, AppError> {
    // pdf-extract can panic on malformed input; a panicked task counts as a
    // failed extraction.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Extraction(format!("PDF extractor aborted: {e}")))?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    // Scanned or image-only PDFs parse fine but carry no text layer.
    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "PDF has no extractable text layer".to_string(),
        ));
    }

    Ok(text)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, AppError> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// One-page PDF whose only content is "Hello World" in Helvetica.
    pub(crate) const SAMPLE_PDF: &[u8] = include_bytes!("../../tests/fixtures/resume.pdf");

    #[tokio::test]
    async fn test_plain_text_is_returned_unchanged() {
        let text = extract_text(FileKind::Txt, Bytes::from_static(b"Hello World"))
            .await
            .unwrap();
        assert_eq!(text, "Hello World");
    }

    #[tokio::test]
    async fn test_multibyte_utf8_survives_decode() {
        let text = extract_text(FileKind::Txt, Bytes::from("Zoë Müller — 東京"))
            .await
            .unwrap();
        assert_eq!(text, "Zoë Müller — 東京");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let bytes = Bytes::from_static(&[0x48, 0xff, 0xfe, 0x49]);
        let result = extract_text(FileKind::Txt, bytes).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_docx_is_decoded_as_text() {
        let text = extract_text(FileKind::Docx, Bytes::from_static(b"plain words"))
            .await
            .unwrap();
        assert_eq!(text, "plain words");

        // A real DOCX is a zip archive and is not valid UTF-8.
        let zip_header = Bytes::from_static(&[
            0x50, 0x4b, 0x03, 0x04, 0x14, 0x00, 0x06, 0x00, 0x08, 0x00, 0x00, 0x00, 0xc3, 0x28,
        ]);
        let result = extract_text(FileKind::Docx, zip_header).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_passed_through() {
        let text = extract_text(FileKind::Txt, Bytes::from_static(b"   \n "))
            .await
            .unwrap();
        assert_eq!(text, "   \n ");
    }

    #[tokio::test]
    async fn test_pdf_text_layer_is_extracted() {
        let text = extract_text(FileKind::Pdf, Bytes::from_static(SAMPLE_PDF))
            .await
            .unwrap();
        assert!(text.contains("Hello"), "extracted: {text:?}");
        assert!(text.contains("World"), "extracted: {text:?}");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_extraction_error() {
        let bytes = Bytes::from_static(b"%PDF-1.4 definitely not a pdf");
        let result = extract_text(FileKind::Pdf, bytes).await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
