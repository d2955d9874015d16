use crate::document::{Block, Document};
use quick_xml::escape::escape;

const PAGE_BREAK_TEXT: &str = "\u{c}";

pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        match block {
            Block::Heading { text, level } => {
                let underline = if *level == 1 { '=' } else { '-' };
                out.push_str(text);
                out.push('\n');
                out.extend(std::iter::repeat_n(underline, text.chars().count()));
                out.push_str("\n\n");
            }
            Block::Paragraph(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Block::PageBreak => {
                out.push_str(PAGE_BREAK_TEXT);
                out.push('\n');
            }
        }
    }
    out
}

pub fn render_html(doc: &Document) -> String {
    let title = escape(doc.title().unwrap_or_default());
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", title));
    out.push_str("<style>p { white-space: pre-wrap; }</style>\n</head>\n<body>\n");
    for block in doc.blocks() {
        match block {
            Block::Heading { text, level } => {
                out.push_str(&format!("<h{0}>{1}</h{0}>\n", level, escape(text.as_str())));
            }
            Block::Paragraph(text) => {
                out.push_str(&format!("<p>{}</p>\n", escape(text.as_str())));
            }
            Block::PageBreak => {
                out.push_str("<div style=\"page-break-after: always\"></div>\n");
            }
        }
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentSink;

    fn sample() -> Document {
        let mut doc = Document::with_title();
        doc.add_paragraph("File Path: a/<b>.txt");
        doc.add_paragraph("Content:");
        doc.add_paragraph("line one\nline two");
        doc.add_page_break();
        doc
    }

    #[test]
    fn text_keeps_content_verbatim() {
        let text = render_text(&sample());
        assert!(text.starts_with("File Paths and Contents\n=======================\n\n"));
        assert!(text.contains("File Path: a/<b>.txt\nContent:\nline one\nline two\n\u{c}\n"));
    }

    #[test]
    fn html_escapes_paragraphs() {
        let html = render_html(&sample());
        assert!(html.contains("<h1>File Paths and Contents</h1>"));
        assert!(html.contains("<p>File Path: a/&lt;b&gt;.txt</p>"));
        assert!(html.contains("page-break-after: always"));
    }
}
