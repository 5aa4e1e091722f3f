use crate::extraction::{ExtractionError, TextExtractor};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// `TextExtractor` backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
        if pdf.is_empty() {
            return Err(ExtractionError::Empty);
        }
        if !has_pdf_header(pdf) {
            return Err(ExtractionError::InvalidPdf(
                "missing %PDF- header".to_string(),
            ));
        }

        // Pages are extracted separately and newline-joined so the last word of
        // one page never fuses with the first word of the next.
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf)
            .map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;
        let text = pages.join("\n");

        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextLayer);
        }

        tracing::debug!(
            "Extracted {} chars from {} page, {} byte PDF",
            text.len(),
            pages.len(),
            pdf.len()
        );
        Ok(text)
    }
}

/// The header may be preceded by a few junk bytes; readers accept it within the first 1024.
fn has_pdf_header(pdf: &[u8]) -> bool {
    let window = &pdf[..pdf.len().min(1024)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a minimal PDF with one Helvetica text line per page.
    /// An empty string produces a page with an empty content stream.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let page_count = pages.len();
        // 1: catalog, 2: pages, 3: font, then (page, contents) pairs
        let page_id = |i: usize| 4 + i * 2;
        let contents_id = |i: usize| 5 + i * 2;

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
                (0..page_count)
                    .map(|i| format!("{} 0 R", page_id(i)))
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let stream = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET")
            };
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                contents_id(i)
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert_eq!(
            PdfTextExtractor.extract_text(&[]),
            Err(ExtractionError::Empty)
        );
    }

    #[test]
    fn test_non_pdf_bytes_rejected_without_parsing() {
        let err = PdfTextExtractor
            .extract_text(b"Just a plain text resume")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPdf(_)));
    }

    #[test]
    fn test_header_detected_after_leading_junk() {
        assert!(has_pdf_header(b"\r\n%PDF-1.7\n..."));
        assert!(!has_pdf_header(b"%PD"));
    }

    #[test]
    fn test_pages_extracted_in_order() {
        let pdf = build_pdf(&["alpha python", "omega docker"]);
        let text = PdfTextExtractor.extract_text(&pdf).unwrap();

        let first = text.find("alpha").expect("page 1 text");
        let second = text.find("omega").expect("page 2 text");
        assert!(first < second, "pages out of order: {text:?}");
    }

    #[test]
    fn test_page_boundary_separates_words() {
        // Same baseline on both pages.
        let pdf = build_pdf(&["alpha python", "omega docker"]);
        let text = PdfTextExtractor.extract_text(&pdf).unwrap();

        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["alpha", "python", "omega", "docker"]);
    }

    #[test]
    fn test_blank_page_has_no_text_layer() {
        let pdf = build_pdf(&[""]);
        assert_eq!(
            PdfTextExtractor.extract_text(&pdf),
            Err(ExtractionError::NoTextLayer)
        );
    }

    #[test]
    fn test_header_followed_by_garbage_is_invalid() {
        let err = PdfTextExtractor
            .extract_text(b"%PDF-1.4 fake")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPdf(_)));
    }
}
