//! Integration tests for item sources.
//!
//! Page trees are written to temporary files and read back through a
//! `PdfReader`, then routed into a rule processor.

use bytes::Bytes;
use pdf_rules::config::ReaderOptions;
use pdf_rules::item::{FileMarker, Item};
use pdf_rules::reader::{JsonDocumentParser, PdfReader};
use pdf_rules::rules::{Rule, RuleOutput, RuleProcessor};
use pdf_rules::Error;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::tempdir;

const INVOICE: &str = r#"{
    "Pages": [
        {
            "Width": 38.25,
            "Height": 49.5,
            "Texts": [
                {"x": 2, "y": 2, "w": 6, "R": [{"T": "Invoice%20INV-7", "TS": [0, 14, 1, 0]}]},
                {"x": 2, "y": 4, "w": 4, "R": [{"T": "Total%3A", "TS": [0, 12, 0, 0]}]},
                {"x": 9, "y": 4, "w": 3, "R": [{"T": "99.90", "TS": [0, 12, 0, 0]}]}
            ]
        },
        {
            "Width": 38.25,
            "Height": 49.5,
            "Texts": [
                {"x": 2, "y": 2, "w": 8, "R": [{"T": "Thank%20you", "TS": [0, 12, 0, 1]}]}
            ]
        }
    ]
}"#;

fn reader() -> PdfReader<JsonDocumentParser> {
    PdfReader::new(ReaderOptions::new(), JsonDocumentParser)
}

#[test]
fn test_parse_file_items_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("invoice.json");
    fs::write(&path, INVOICE).unwrap();

    let mut items = Vec::new();
    reader()
        .parse_file_items(&path, |item| items.push(item.clone()))
        .unwrap();

    assert_eq!(items.len(), 8);
    assert_eq!(items[0], Item::File(FileMarker::Path(path.clone())));
    match &items[1] {
        Item::Page(page) => {
            assert_eq!(page.number, 1);
            assert_eq!(page.width, 38.25);
        },
        other => panic!("expected page marker, got {:?}", other),
    }
    assert_eq!(items[2].text(), Some("Invoice INV-7"));
    assert_eq!(items[3].text(), Some("Total:"));
    assert!(matches!(&items[5], Item::Page(page) if page.number == 2));
    assert_eq!(items[6].text(), Some("Thank you"));
    assert!(items[7].is_end());
}

#[test]
fn test_reader_feeds_rule_processor() {
    let outputs = Rc::new(RefCell::new(Vec::new()));
    let invoice = Rc::clone(&outputs);
    let total = Rc::clone(&outputs);
    let mut processor = RuleProcessor::new(vec![
        Rule::on(r"^Invoice (\S+)$")
            .unwrap()
            .extract_regexp_values()
            .then(move |output| invoice.borrow_mut().push(output)),
        Rule::on("^Total:$")
            .unwrap()
            .parse_next_item_value()
            .then(move |output| total.borrow_mut().push(output)),
    ]);

    reader()
        .parse_buffer(Bytes::from_static(INVOICE.as_bytes()), |item| {
            processor.process_item(item)
        })
        .unwrap();

    assert!(processor.is_finished());
    assert_eq!(
        *outputs.borrow(),
        vec![
            RuleOutput::Values(vec!["INV-7".to_string()]),
            RuleOutput::Value(Some("99.90".to_string())),
        ]
    );
}

#[test]
fn test_missing_file_stops_after_file_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let mut items = Vec::new();
    let result = reader().parse_file_items(&path, |item| items.push(item.clone()));

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(items, vec![Item::File(FileMarker::Path(path))]);
}

#[test]
fn test_malformed_buffer_stops_after_file_marker() {
    let mut items = Vec::new();
    let result = reader().parse_buffer(Bytes::from_static(b"{\"Pages\": ["), |item| {
        items.push(item.clone())
    });

    assert!(matches!(result, Err(Error::Json(_))));
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Item::File(FileMarker::Buffer(_))));
}

#[test]
fn test_password_is_passed_through() {
    let reader = PdfReader::new(
        ReaderOptions::new().with_password("secret").with_debug(true),
        JsonDocumentParser,
    );
    assert_eq!(reader.options().password.as_deref(), Some("secret"));

    let mut count = 0;
    reader
        .parse_buffer(Bytes::from_static(INVOICE.as_bytes()), |_| count += 1)
        .unwrap();
    assert_eq!(count, 8);
}
