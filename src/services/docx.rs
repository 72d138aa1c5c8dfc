use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{AppError, AppResult};
use crate::services::extractor::{join_units, TextExtractor};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the body paragraphs of a Word document.
///
/// A .docx file is a ZIP archive; the paragraphs live in `word/document.xml`.
/// Paragraphs nested in tables, text boxes or content controls are not
/// direct children of the body and are skipped, so the output matches a
/// plain walk over top-level paragraphs.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn paragraphs<R: Read + Seek>(source: R) -> AppResult<Vec<String>> {
        let mut archive = ZipArchive::new(source)?;
        let document = archive.by_name(DOCUMENT_PART)?;
        parse_paragraphs(BufReader::new(document))
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> AppResult<String> {
        let file = File::open(path)?;
        let paragraphs = Self::paragraphs(file)?;
        debug!(path = %path.display(), paragraphs = paragraphs.len(), "Read docx paragraphs");
        Ok(join_units(paragraphs))
    }
}

fn parse_paragraphs<R: BufRead>(source: R) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::with_capacity(1024);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // depth inside w:tbl / w:txbxContent / w:sdt
    let mut nested = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" | b"sdt" => nested += 1,
                b"p" if nested == 0 => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if nested == 0 => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if in_run => push_char(&mut current, '\t'),
                b"br" | b"cr" if in_run => push_char(&mut current, '\n'),
                _ => {}
            },
            Event::Text(e) if in_text && nested == 0 => {
                if let Some(paragraph) = current.as_mut() {
                    let raw = String::from_utf8_lossy(&e);
                    let text = quick_xml::escape::unescape(&raw)
                        .map_err(|err| AppError::extraction(err.to_string()))?;
                    paragraph.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" | b"sdt" => nested = nested.saturating_sub(1),
                b"p" if nested == 0 => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_char(current: &mut Option<String>, ch: char) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(ch);
    }
}
