//! The item stream consumed by the rule engine.
//!
//! A document is delivered as a flat sequence of [`Item`]s:
//!
//! ```text
//! File → Page(1) → Text* → Page(2) → Text* → ... → EndOfStream
//! ```
//!
//! Page numbers start at 1 and increase by one. Text fragments of a page
//! always sit between that page's marker and the next marker.

use crate::geometry::Rect;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One element of a parsed document stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    /// A document is being opened. Emitted once, before any page.
    File(FileMarker),
    /// A new page starts.
    Page(PageMarker),
    /// A positioned text fragment.
    Text(TextItem),
    /// The last page was delivered. Emitted exactly once.
    EndOfStream,
}

impl Item {
    /// Text of a fragment, `None` for markers.
    pub fn text(&self) -> Option<&str> {
        match self {
            Item::Text(item) => Some(&item.text),
            _ => None,
        }
    }

    /// The fragment, if this item is one and carries non-empty text.
    ///
    /// Empty fragments are treated like markers by the engine.
    pub fn as_text(&self) -> Option<&TextItem> {
        match self {
            Item::Text(item) if !item.text.is_empty() => Some(item),
            _ => None,
        }
    }

    /// Whether this is the end-of-stream sentinel.
    pub fn is_end(&self) -> bool {
        matches!(self, Item::EndOfStream)
    }
}

impl From<TextItem> for Item {
    fn from(item: TextItem) -> Self {
        Item::Text(item)
    }
}

/// Where the document came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileMarker {
    /// Loaded from a file on disk.
    Path(PathBuf),
    /// Loaded from an in-memory buffer.
    Buffer(Bytes),
}

/// Start of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMarker {
    /// Page number, starting at 1
    pub number: u32,
    /// Page width in page units
    pub width: f32,
    /// Page height in page units
    pub height: f32,
}

/// Style information reported by the document parser for a fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font face identifier
    pub font_face: Option<u32>,
    /// Font size
    pub font_size: Option<f32>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Color index
    pub color: Option<u32>,
    /// Horizontal alignment hint ("left", "center", ...)
    pub alignment: Option<String>,
}

/// A positioned text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// Decoded text
    pub text: String,
    /// Left position
    pub x: f32,
    /// Top position
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Style information
    #[serde(default)]
    pub style: TextStyle,
}

impl TextItem {
    /// Create an unstyled fragment with zero size.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            style: TextStyle::default(),
        }
    }

    /// Set the fragment size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the fragment style.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Bounding box of the fragment.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.bbox().right()
    }
}
