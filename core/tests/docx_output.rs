use dirdoc_core::{ExclusionConfig, OutputFormat, ScanConfig, generate_document};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use zip::ZipArchive;

/// Paragraph texts of `word/document.xml`, with `<w:br/>` read back as `\n`.
fn docx_paragraphs(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();

    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"w:p" => current.clear(),
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
            Event::End(e) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current))
            }
            Event::Empty(e) if e.name().as_ref() == b"w:br" => {
                let is_page = e
                    .attributes()
                    .flatten()
                    .any(|a| a.key.as_ref() == b"w:type" && a.value.as_ref() == b"page");
                if is_page {
                    paragraphs.push("<page>".to_string());
                } else {
                    current.push('\n');
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Event::Text(t) if in_text => current.push_str(&t.unescape().unwrap()),
            Event::Eof => break,
            _ => {}
        }
    }
    paragraphs.retain(|p| !p.is_empty());
    paragraphs
}

#[test]
fn saves_docx_next_to_the_scanned_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/b.txt"), "world").unwrap();

    let mut config = ScanConfig::new(root);
    config.exclusions = ExclusionConfig::from_names(root, ["sub"], Vec::<&str>::new());
    let (output, summary) = generate_document(&config).unwrap();

    assert_eq!(output, root.join("file_contents.docx"));
    assert_eq!(summary.files_recorded, 1);

    let paragraphs = docx_paragraphs(&output);
    assert_eq!(
        paragraphs,
        vec![
            "File Paths and Contents".to_string(),
            format!("File Path: {}", root.join("a.txt").display()),
            "Content:".to_string(),
            "hello".to_string(),
            "<page>".to_string(),
        ]
    );
}

#[test]
fn multiline_content_survives_the_package() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("code.rs"), "fn main() {\n\tprintln!(\"<&>\");\n}").unwrap();

    let (output, _) = generate_document(&ScanConfig::new(root)).unwrap();
    let paragraphs = docx_paragraphs(&output);
    assert!(paragraphs.contains(&"fn main() {\n\tprintln!(\"<&>\");\n}".to_string()));
}

#[test]
fn empty_tree_still_saves_heading() {
    let dir = tempdir().unwrap();
    let (output, _) = generate_document(&ScanConfig::new(dir.path())).unwrap();
    assert_eq!(docx_paragraphs(&output), vec!["File Paths and Contents".to_string()]);
}

#[test]
fn rerun_overwrites_previous_output() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("first.txt"), "1").unwrap();

    let mut config = ScanConfig::new(&root);
    config.output = Some(dir.path().join("snapshot.docx"));
    generate_document(&config).unwrap();

    fs::remove_file(root.join("first.txt")).unwrap();
    fs::write(root.join("second.txt"), "2").unwrap();
    let (output, _) = generate_document(&config).unwrap();

    let text = docx_paragraphs(&output).join("\n");
    assert!(text.contains("second.txt"));
    assert!(!text.contains("first.txt"));
}

#[test]
fn text_format_uses_txt_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.md"), "# x").unwrap();

    let mut config = ScanConfig::new(dir.path());
    config.format = OutputFormat::Text;
    let (output, _) = generate_document(&config).unwrap();

    assert_eq!(output, dir.path().join("file_contents.txt"));
    let saved = fs::read_to_string(output).unwrap();
    assert!(saved.contains("Content:\n# x\n\u{c}\n"));
}

#[test]
fn save_failure_is_reported() {
    let dir = tempdir().unwrap();
    let mut config = ScanConfig::new(dir.path());
    config.output = Some(dir.path().join("missing-dir").join("out.docx"));
    let err = generate_document(&config).unwrap_err();
    assert!(matches!(err, dirdoc_core::AppError::FileWrite { .. }));
}
