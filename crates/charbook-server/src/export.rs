//! In-memory `.docx` generation for the download endpoint.
//!
//! The document layout mirrors the HTML view: a title followed by a
//! single-column table with a "Characters" header and one row per character
//! in extractor order.  The whole document is packed into a byte buffer and
//! returned in the same request, nothing touches the filesystem.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::error::ServerError;

/// MIME type of the generated document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Fixed attachment filename.
pub const DOCX_FILENAME: &str = "unique_characters.docx";

/// Build the download document for a character sequence.
pub fn unique_characters_docx(characters: &[char]) -> Result<Vec<u8>, ServerError> {
    let mut rows = vec![header_row("Characters")];
    for ch in characters {
        rows.push(text_row(&ch.to_string()));
    }

    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("Unique characters").bold().size(32)),
        )
        .add_table(Table::new(rows));

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ServerError::Export(e.to_string()))?;

    Ok(buf.into_inner())
}

fn header_row(text: &str) -> TableRow {
    TableRow::new(vec![TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))])
}

fn text_row(text: &str) -> TableRow {
    TableRow::new(vec![
        TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_zip_container() {
        let bytes = unique_characters_docx(&['狗', '猫']).unwrap();
        // .docx is a ZIP archive; check the local-file-header magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn empty_sequence_still_builds_a_document() {
        let bytes = unique_characters_docx(&[]).unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
