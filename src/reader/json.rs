//! pdf2json page trees.
//!
//! Two layouts are accepted: the current one, with `Pages` at the root, and
//! the legacy one, where pages and the page width live under `formImage`.
//! Each text element carries its runs in `R`; only the first run is read.
//! Its `T` field is percent-encoded and its `TS` field holds
//! `[font face, font size, bold, italic]`.

use super::{DocumentInput, DocumentParser, ParsedDocument, ParsedPage};
use crate::config::ReaderOptions;
use crate::error::{Error, Result};
use crate::item::{TextItem, TextStyle};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(rename = "Pages")]
    pages: Option<Vec<JsonPage>>,
    #[serde(rename = "formImage")]
    form_image: Option<FormImage>,
}

#[derive(Debug, Deserialize)]
struct FormImage {
    #[serde(rename = "Width")]
    width: Option<f32>,
    #[serde(rename = "Pages", default)]
    pages: Vec<JsonPage>,
}

#[derive(Debug, Deserialize)]
struct JsonPage {
    #[serde(rename = "Width")]
    width: Option<f32>,
    #[serde(rename = "Height")]
    height: Option<f32>,
    #[serde(rename = "Texts", default)]
    texts: Vec<JsonText>,
}

#[derive(Debug, Deserialize)]
struct JsonText {
    x: f32,
    y: f32,
    #[serde(default)]
    w: f32,
    #[serde(default)]
    h: f32,
    clr: Option<u32>,
    #[serde(rename = "A")]
    alignment: Option<String>,
    #[serde(rename = "R", default)]
    runs: Vec<JsonRun>,
}

#[derive(Debug, Deserialize)]
struct JsonRun {
    #[serde(rename = "T")]
    text: String,
    #[serde(rename = "TS", default)]
    style: Vec<f32>,
}

/// Reads the JSON page tree written by pdf2json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentParser;

impl JsonDocumentParser {
    /// Parse a page tree from its JSON bytes.
    pub fn parse_slice(&self, data: &[u8]) -> Result<ParsedDocument> {
        let document: JsonDocument = serde_json::from_slice(data)?;
        convert(document)
    }
}

impl DocumentParser for JsonDocumentParser {
    fn parse(&self, input: DocumentInput<'_>, options: &ReaderOptions) -> Result<ParsedDocument> {
        if options.password.is_some() {
            log::debug!("page trees are not encrypted, password ignored");
        }
        let document = match input {
            DocumentInput::Path(path) => self.parse_slice(&std::fs::read(path)?)?,
            DocumentInput::Buffer(data) => self.parse_slice(data)?,
        };
        if options.debug {
            let fragments: usize = document.pages.iter().map(|page| page.items.len()).sum();
            log::debug!(
                "page tree: {} pages, {} fragments",
                document.pages.len(),
                fragments
            );
        }
        Ok(document)
    }
}

fn convert(document: JsonDocument) -> Result<ParsedDocument> {
    let (pages, default_width) = match (document.pages, document.form_image) {
        (Some(pages), form_image) => (pages, form_image.and_then(|form| form.width)),
        (None, Some(form_image)) => (form_image.pages, form_image.width),
        (None, None) => {
            return Err(Error::MalformedDocument(
                "neither Pages nor formImage found".to_string(),
            ))
        },
    };

    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            let items = page
                .texts
                .into_iter()
                .map(|text| convert_text(index + 1, text))
                .collect::<Result<Vec<_>>>()?;
            Ok(ParsedPage {
                width: page.width.or(default_width).unwrap_or(0.0),
                height: page.height.unwrap_or(0.0),
                items,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ParsedDocument { pages })
}

fn convert_text(page: usize, text: JsonText) -> Result<TextItem> {
    let run = text.runs.into_iter().next().ok_or_else(|| {
        Error::MalformedDocument(format!(
            "text at ({}, {}) on page {} has no run",
            text.x, text.y, page
        ))
    })?;
    let decoded = urlencoding::decode(&run.text).map_err(|err| Error::TextDecode {
        text: run.text.clone(),
        reason: err.to_string(),
    })?;

    let flag = |index: usize| run.style.get(index).is_some_and(|value| *value != 0.0);
    let style = TextStyle {
        font_face: run.style.first().map(|value| *value as u32),
        font_size: run.style.get(1).copied(),
        bold: flag(2),
        italic: flag(3),
        color: text.clr,
        alignment: text.alignment,
    };

    Ok(TextItem::new(decoded.into_owned(), text.x, text.y)
        .with_size(text.w, text.h)
        .with_style(style))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "Pages": [
            {
                "Width": 38.25,
                "Height": 49.5,
                "Texts": [
                    {"x": 2.1, "y": 3.4, "w": 5.5, "clr": 0, "A": "left",
                     "R": [{"T": "Hello%20%22World%22", "S": -1, "TS": [0, 15, 1, 0]}]},
                    {"x": 2.1, "y": 4.4, "w": 3.0,
                     "R": [{"T": "%C3%A9t%C3%A9", "TS": [1, 12, 0, 1]}]}
                ]
            },
            {"Width": 38.25, "Height": 49.5, "Texts": []}
        ]
    }"#;

    #[test]
    fn test_current_layout() {
        let document = JsonDocumentParser.parse_slice(CURRENT.as_bytes()).unwrap();
        assert_eq!(document.pages.len(), 2);

        let page = &document.pages[0];
        assert_eq!(page.width, 38.25);
        assert_eq!(page.height, 49.5);
        assert_eq!(page.items.len(), 2);

        let hello = &page.items[0];
        assert_eq!(hello.text, "Hello \"World\"");
        assert_eq!(hello.x, 2.1);
        assert_eq!(hello.width, 5.5);
        assert_eq!(hello.style.font_face, Some(0));
        assert_eq!(hello.style.font_size, Some(15.0));
        assert!(hello.style.bold);
        assert!(!hello.style.italic);
        assert_eq!(hello.style.color, Some(0));
        assert_eq!(hello.style.alignment.as_deref(), Some("left"));

        let accented = &page.items[1];
        assert_eq!(accented.text, "été");
        assert!(accented.style.italic);
        assert_eq!(accented.style.color, None);
    }

    #[test]
    fn test_legacy_layout_width_fallback() {
        let legacy = r#"{
            "formImage": {
                "Width": 42,
                "Pages": [{"Height": 50, "Texts": [{"x": 1, "y": 2, "R": [{"T": "a"}]}]}]
            }
        }"#;
        let document = JsonDocumentParser.parse_slice(legacy.as_bytes()).unwrap();
        assert_eq!(document.pages[0].width, 42.0);
        assert_eq!(document.pages[0].height, 50.0);
        assert_eq!(document.pages[0].items[0].text, "a");
        assert_eq!(document.pages[0].items[0].style, TextStyle::default());
    }

    #[test]
    fn test_missing_pages() {
        let err = JsonDocumentParser.parse_slice(b"{}").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_text_without_run() {
        let data = r#"{"Pages": [{"Texts": [{"x": 1, "y": 2, "R": []}]}]}"#;
        let err = JsonDocumentParser.parse_slice(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn test_undecodable_text() {
        let data = r#"{"Pages": [{"Texts": [{"x": 1, "y": 2, "R": [{"T": "%FF"}]}]}]}"#;
        let err = JsonDocumentParser.parse_slice(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::TextDecode { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = JsonDocumentParser.parse_slice(b"not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
