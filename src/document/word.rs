use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::Result;
use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::app_config::Config;
use crate::errors::ConversionError;
use crate::timecode::TimecodeEngine;
use crate::transcript::TranscriptRow;

use super::model::{DocumentLine, DocumentModel};

// @module: Word (.docx) document emitter

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Write transcript rows as a Word document.
///
/// The package is a minimal OOXML archive: content types, package
/// relationships and the document part itself. The first block is the title
/// as a centered heading; every row then renders as a bold timecode
/// paragraph, an optional body paragraph, and a blank separator paragraph
/// between rows.
pub fn write_word_document<P: AsRef<Path>>(
    rows: &[TranscriptRow],
    output_path: P,
    title: &str,
    include_title_prefix: bool,
    config: &Config,
) -> Result<(), ConversionError> {
    let output_path = output_path.as_ref();
    let engine = TimecodeEngine::new(config);
    let model = DocumentModel::from_rows(rows, title, include_title_prefix, &engine);

    let document_xml =
        render_document_xml(&model).map_err(|e| ConversionError::Generation(e.to_string()))?;

    write_package(output_path, &document_xml)
        .map_err(|e| ConversionError::Generation(e.to_string()))?;

    debug!("Wrote Word document: {}", output_path.display());
    Ok(())
}

fn write_package(output_path: &Path, document_xml: &[u8]) -> Result<()> {
    let file = File::create(output_path)?;
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(CONTENT_TYPES_XML.as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(PACKAGE_RELS_XML.as_bytes())?;

    archive.start_file("word/document.xml", options)?;
    archive.write_all(document_xml)?;

    archive.finish()?;
    Ok(())
}

/// Render the document part for the shared line sequence
pub fn render_document_xml(model: &DocumentModel) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Cursor::new(Vec::new()));

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDML_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("w:body")))?;

    write_title_paragraph(&mut xml, &model.title)?;
    // Blank line between the heading and the first timecode
    write_empty_paragraph(&mut xml)?;

    for line in &model.lines {
        match line {
            DocumentLine::Timecode { raw, .. } => {
                write_text_paragraph(&mut xml, &model.timecode_text(raw), true)?;
            }
            DocumentLine::Body { text } => {
                write_text_paragraph(&mut xml, text, false)?;
            }
            DocumentLine::Spacer => write_empty_paragraph(&mut xml)?,
        }
    }

    write_section_properties(&mut xml)?;

    xml.write_event(Event::End(BytesEnd::new("w:body")))?;
    xml.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(xml.into_inner().into_inner())
}

fn write_title_paragraph(xml: &mut Writer<Cursor<Vec<u8>>>, title: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:p")))?;

    xml.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    let mut justify = BytesStart::new("w:jc");
    justify.push_attribute(("w:val", "center"));
    xml.write_event(Event::Empty(justify))?;
    xml.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    xml.write_event(Event::Start(BytesStart::new("w:r")))?;
    xml.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    xml.write_event(Event::Empty(BytesStart::new("w:b")))?;
    let mut size = BytesStart::new("w:sz");
    // Half-point units
    size.push_attribute(("w:val", "48"));
    xml.write_event(Event::Empty(size))?;
    xml.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    write_text_run_body(xml, title)?;
    xml.write_event(Event::End(BytesEnd::new("w:r")))?;

    xml.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_text_paragraph(
    xml: &mut Writer<Cursor<Vec<u8>>>,
    text: &str,
    bold: bool,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:p")))?;
    xml.write_event(Event::Start(BytesStart::new("w:r")))?;

    if bold {
        xml.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        xml.write_event(Event::Empty(BytesStart::new("w:b")))?;
        xml.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    write_text_run_body(xml, text)?;
    xml.write_event(Event::End(BytesEnd::new("w:r")))?;
    xml.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_text_run_body(xml: &mut Writer<Cursor<Vec<u8>>>, text: &str) -> Result<()> {
    let mut element = BytesStart::new("w:t");
    element.push_attribute(("xml:space", "preserve"));
    xml.write_event(Event::Start(element))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("w:t")))?;
    Ok(())
}

fn write_empty_paragraph(xml: &mut Writer<Cursor<Vec<u8>>>) -> Result<()> {
    xml.write_event(Event::Empty(BytesStart::new("w:p")))?;
    Ok(())
}

fn write_section_properties(xml: &mut Writer<Cursor<Vec<u8>>>) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    let mut page_size = BytesStart::new("w:pgSz");
    // A4 in twentieths of a point
    page_size.push_attribute(("w:w", "11906"));
    page_size.push_attribute(("w:h", "16838"));
    xml.write_event(Event::Empty(page_size))?;
    xml.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}
