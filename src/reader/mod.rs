//! Item sources.
//!
//! A [`PdfReader`] turns a document into the item stream consumed by the
//! rule engine. The actual decoding is delegated to a [`DocumentParser`];
//! [`JsonDocumentParser`] reads the page tree produced by pdf2json.
//!
//! The stream always starts with a [`FileMarker`]. When the parser fails,
//! the error is returned right after that marker and no other item is
//! emitted. Otherwise every page is emitted as a [`PageMarker`] followed by
//! its fragments, and the stream ends with [`Item::EndOfStream`].
//!
//! # Examples
//!
//! ```no_run
//! use pdf_rules::config::ReaderOptions;
//! use pdf_rules::reader::{JsonDocumentParser, PdfReader};
//! use pdf_rules::rules::{Rule, RuleProcessor};
//!
//! # fn main() -> pdf_rules::Result<()> {
//! let rules = vec![Rule::on("^Total:")?.parse_next_item_value().then(|output| {
//!     println!("total = {:?}", output.as_value());
//! })];
//! let mut processor = RuleProcessor::new(rules);
//!
//! let reader = PdfReader::new(ReaderOptions::new(), JsonDocumentParser);
//! reader.parse_file_items("invoice.json", |item| processor.process_item(item))?;
//! # Ok(())
//! # }
//! ```

mod json;

pub use json::JsonDocumentParser;

use crate::config::ReaderOptions;
use crate::error::Result;
use crate::item::{FileMarker, Item, PageMarker, TextItem};
use bytes::Bytes;
use std::path::Path;

/// Document handed to a [`DocumentParser`].
#[derive(Debug, Clone, Copy)]
pub enum DocumentInput<'a> {
    /// A file on disk.
    Path(&'a Path),
    /// An in-memory document.
    Buffer(&'a [u8]),
}

/// A page of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
    /// Fragments in document order, with decoded text
    pub items: Vec<TextItem>,
}

/// Pages of a parsed document, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Pages, the first one being page 1
    pub pages: Vec<ParsedPage>,
}

impl ParsedDocument {
    /// Flatten the pages into the stream items following the file marker.
    pub fn into_items(self) -> impl Iterator<Item = Item> {
        self.pages
            .into_iter()
            .zip(1u32..)
            .flat_map(|(page, number)| {
                let marker = Item::Page(PageMarker {
                    number,
                    width: page.width,
                    height: page.height,
                });
                std::iter::once(marker).chain(page.items.into_iter().map(Item::Text))
            })
            .chain(std::iter::once(Item::EndOfStream))
    }
}

/// Decoder producing the pages of a document.
pub trait DocumentParser {
    /// Parse `input` into pages.
    fn parse(&self, input: DocumentInput<'_>, options: &ReaderOptions) -> Result<ParsedDocument>;
}

/// Reads documents and delivers their items to a handler.
#[derive(Debug, Clone)]
pub struct PdfReader<P> {
    options: ReaderOptions,
    parser: P,
}

impl<P: DocumentParser> PdfReader<P> {
    /// Create a reader passing `options` to `parser`.
    pub fn new(options: ReaderOptions, parser: P) -> Self {
        Self { options, parser }
    }

    /// The options handed to the parser.
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Deliver every item of the document at `path` to `handler`.
    ///
    /// # Errors
    ///
    /// Returns the parser error after the file marker was delivered.
    pub fn parse_file_items<F>(&self, path: impl AsRef<Path>, mut handler: F) -> Result<()>
    where
        F: FnMut(&Item),
    {
        let path = path.as_ref();
        handler(&Item::File(FileMarker::Path(path.to_path_buf())));
        let document = self.parser.parse(DocumentInput::Path(path), &self.options)?;
        Self::emit(document, handler);
        Ok(())
    }

    /// Deliver every item of the in-memory document `buffer` to `handler`.
    ///
    /// # Errors
    ///
    /// Returns the parser error after the file marker was delivered.
    pub fn parse_buffer<F>(&self, buffer: Bytes, mut handler: F) -> Result<()>
    where
        F: FnMut(&Item),
    {
        handler(&Item::File(FileMarker::Buffer(buffer.clone())));
        let document = self.parser.parse(DocumentInput::Buffer(&buffer), &self.options)?;
        Self::emit(document, handler);
        Ok(())
    }

    fn emit<F>(document: ParsedDocument, mut handler: F)
    where
        F: FnMut(&Item),
    {
        log::debug!("emitting {} pages", document.pages.len());
        for item in document.into_items() {
            handler(&item);
        }
    }
}

impl Default for PdfReader<JsonDocumentParser> {
    fn default() -> Self {
        Self::new(ReaderOptions::default(), JsonDocumentParser)
    }
}
