//! WordprocessingML (.docx) packaging for [`Document`].
//!
//! Static package parts are embedded from `data/docx/`. `word/document.xml`
//! and `docProps/core.xml` are generated per document.

use crate::config::DOCUMENT_TITLE;
use crate::document::{Block, Document};
use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES_XML: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../data/docx/content_types.xml"
));
const PACKAGE_RELS_XML: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../data/docx/package_rels.xml"
));
const DOCUMENT_RELS_XML: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../data/docx/document_rels.xml"
));
const STYLES_XML: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/docx/styles.xml"));

const NS_WORDPROCESSING: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const APPLICATION_NAME: &str = "dirdoc";

pub fn render_docx(doc: &Document) -> Result<Vec<u8>> {
    let document_xml = document_xml(doc)?;
    let core_xml = core_properties_xml(doc.title().unwrap_or(DOCUMENT_TITLE))?;
    let app_xml = app_properties_xml(doc.paragraphs().count());

    let parts: [(&str, &[u8]); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("word/document.xml", document_xml.as_slice()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("docProps/core.xml", core_xml.as_slice()),
        ("docProps/app.xml", app_xml.as_bytes()),
    ];

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        log::trace!("Adding docx part {} ({} bytes)", name, bytes.len());
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", NS_WORDPROCESSING)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in doc.blocks() {
        match block {
            Block::Heading { text, level } => {
                let style = format!("Heading{}", level);
                write_paragraph(&mut writer, text, Some(&style))?;
            }
            Block::Paragraph(text) => write_paragraph(&mut writer, text, None)?,
            Block::PageBreak => write_page_break(&mut writer)?,
        }
    }

    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:pgSz").with_attributes([("w:w", "12240"), ("w:h", "15840")]),
    ))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pgMar").with_attributes([
        ("w:top", "1440"),
        ("w:right", "1440"),
        ("w:bottom", "1440"),
        ("w:left", "1440"),
        ("w:header", "720"),
        ("w:footer", "720"),
        ("w:gutter", "0"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, text: &str, style: Option<&str>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    if let Some(style) = style {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        writer.write_event(Event::Empty(
            BytesStart::new("w:pStyle").with_attributes([("w:val", style)]),
        ))?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }
    if !text.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        for piece in run_pieces(text) {
            match piece {
                RunPiece::Text(t) => {
                    writer.write_event(Event::Start(
                        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
                    ))?;
                    writer.write_event(Event::Text(BytesText::new(&t)))?;
                    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
                }
                RunPiece::Break => writer.write_event(Event::Empty(BytesStart::new("w:br")))?,
                RunPiece::Tab => writer.write_event(Event::Empty(BytesStart::new("w:tab")))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_page_break(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:br").with_attributes([("w:type", "page")]),
    ))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum RunPiece {
    Text(String),
    Break,
    Tab,
}

/// Splits paragraph text into run content. `\n`, `\r\n` and lone `\r` each
/// become one line break; tabs become tab elements; characters XML 1.0
/// cannot carry become U+FFFD.
fn run_pieces(text: &str) -> Vec<RunPiece> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let control = match c {
            '\n' => Some(RunPiece::Break),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                Some(RunPiece::Break)
            }
            '\t' => Some(RunPiece::Tab),
            _ => None,
        };
        match control {
            Some(piece) => {
                if !current.is_empty() {
                    pieces.push(RunPiece::Text(std::mem::take(&mut current)));
                }
                pieces.push(piece);
            }
            None if is_xml_char(c) => current.push(c),
            None => current.push(char::REPLACEMENT_CHARACTER),
        }
    }
    if !current.is_empty() {
        pieces.push(RunPiece::Text(current));
    }
    pieces
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn core_properties_xml(title: &str) -> Result<Vec<u8>> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(BytesStart::new("cp:coreProperties").with_attributes([
        (
            "xmlns:cp",
            "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
        ),
        ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
        ("xmlns:dcterms", "http://purl.org/dc/terms/"),
        ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
        ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ])))?;

    write_text_element(&mut writer, BytesStart::new("dc:title"), title)?;
    write_text_element(&mut writer, BytesStart::new("dc:creator"), APPLICATION_NAME)?;
    write_text_element(
        &mut writer,
        BytesStart::new("cp:lastModifiedBy"),
        APPLICATION_NAME,
    )?;
    for name in ["dcterms:created", "dcterms:modified"] {
        write_text_element(
            &mut writer,
            BytesStart::new(name).with_attributes([("xsi:type", "dcterms:W3CDTF")]),
            &now,
        )?;
    }

    writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
    Ok(writer.into_inner())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn app_properties_xml(paragraphs: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>{}</Application><Paragraphs>{}</Paragraphs></Properties>"
        ),
        APPLICATION_NAME, paragraphs
    )
}
