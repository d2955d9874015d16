use crate::config::{DOCUMENT_TITLE, OutputFormat};
use crate::error::{AppError, Result};
use crate::output_formats;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { text: String, level: u8 },
    Paragraph(String),
    PageBreak,
}

/// Append-only target for the walker.
pub trait DocumentSink {
    fn add_heading(&mut self, text: &str, level: u8);
    fn add_paragraph(&mut self, text: &str);
    fn add_page_break(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document that starts with the level-1 title heading.
    pub fn with_title() -> Self {
        let mut doc = Self::new();
        doc.add_heading(DOCUMENT_TITLE, 1);
        doc
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Heading text, if the document opens with one.
    pub fn title(&self) -> Option<&str> {
        match self.blocks.first() {
            Some(Block::Heading { text, .. }) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Docx => crate::docx::render_docx(self),
            OutputFormat::Text => Ok(output_formats::render_text(self).into_bytes()),
            OutputFormat::Html => Ok(output_formats::render_html(self).into_bytes()),
        }
    }

    /// Renders fully in memory, then writes `path` in one step, replacing any
    /// existing file.
    pub fn save(&self, path: &Path, format: OutputFormat) -> Result<()> {
        log::debug!(
            "Rendering {} blocks as {} for {}",
            self.blocks.len(),
            format,
            path.display()
        );
        let bytes = self.render(format)?;
        fs::write(path, &bytes).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl DocumentSink for Document {
    fn add_heading(&mut self, text: &str, level: u8) {
        self.blocks.push(Block::Heading {
            text: text.to_string(),
            level: level.clamp(1, 3),
        });
    }

    fn add_paragraph(&mut self, text: &str) {
        self.blocks.push(Block::Paragraph(text.to_string()));
    }

    fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }
}
