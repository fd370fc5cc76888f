//! Nearest-header column builder.
//!
//! Header fragments are located by name first; every later fragment is
//! assigned to the column whose header is horizontally closest.

use crate::item::TextItem;
use crate::layout::clustering::nearest_anchor;

/// A column anchored at the left position of its header.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text
    pub name: String,
    /// Left position of the header
    pub x: f32,
    /// Fragments classified into this column
    pub items: Vec<TextItem>,
}

/// Classifies fragments into columns, nearest to the left position of
/// their corresponding header.
///
/// The same header name may appear several times in the name list; each
/// occurrence anchors its own column, in the order the headers are found.
#[derive(Debug, Clone)]
pub struct ColumnsParser {
    pending: Vec<String>,
    slots: Vec<Option<Column>>,
    ready: bool,
}

impl ColumnsParser {
    /// Create a parser expecting the given header names.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            pending: names.iter().map(|name| name.as_ref().to_string()).collect(),
            slots: vec![None; names.len()],
            ready: names.is_empty(),
        }
    }

    /// Feed one fragment.
    ///
    /// In header mode, fragments that are not a pending header are ignored.
    pub fn process_item(&mut self, item: &TextItem) {
        if !self.ready {
            self.locate_header(item);
            return;
        }

        let anchors: Vec<f32> = self.slots.iter().flatten().map(|column| column.x).collect();
        if let Some(index) = nearest_anchor(&anchors, item.x) {
            if let Some(column) = self.slots[index].as_mut() {
                column.items.push(item.clone());
            }
        }
    }

    fn locate_header(&mut self, item: &TextItem) {
        let Some(index) = self
            .pending
            .iter()
            .position(|name| !name.is_empty() && *name == item.text)
        else {
            return;
        };

        log::debug!("ColumnsParser header {} {:?} => x: {}", index, item.text, item.x);
        self.slots[index] = Some(Column {
            name: item.text.clone(),
            x: item.x,
            items: Vec::new(),
        });
        // blank instead of removing, so duplicate names keep their own slot
        self.pending[index].clear();
        self.ready = self.slots.iter().all(Option::is_some);
    }

    /// Whether every header was located.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Columns located so far, in header-list order.
    pub fn columns(&self) -> Vec<&Column> {
        self.slots.iter().flatten().collect()
    }

    /// Consume the parser, returning the located columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str, x: f32, y: f32) -> TextItem {
        TextItem::new(text, x, y)
    }

    fn parser_with_headers() -> ColumnsParser {
        let mut parser = ColumnsParser::new(&["A", "B", "C"]);
        parser.process_item(&item("A", 0.0, 1.0));
        parser.process_item(&item("B", 10.0, 1.0));
        parser.process_item(&item("C", 20.0, 1.0));
        parser
    }

    #[test]
    fn test_headers_switch_to_data_mode() {
        let mut parser = ColumnsParser::new(&["A", "B", "C"]);
        parser.process_item(&item("A", 0.0, 1.0));
        parser.process_item(&item("noise", 5.0, 1.0));
        parser.process_item(&item("B", 10.0, 1.0));
        assert!(!parser.is_ready());
        parser.process_item(&item("C", 20.0, 1.0));
        assert!(parser.is_ready());
        assert!(parser.columns().iter().all(|column| column.items.is_empty()));
    }

    #[test]
    fn test_item_goes_to_nearest_header() {
        let mut parser = parser_with_headers();
        parser.process_item(&item("x11", 11.0, 2.0));
        parser.process_item(&item("x1", 1.0, 2.0));
        parser.process_item(&item("x25", 25.0, 2.0));

        let columns = parser.into_columns();
        assert_eq!(columns[0].items[0].text, "x1");
        assert_eq!(columns[1].items[0].text, "x11");
        assert_eq!(columns[2].items[0].text, "x25");
    }

    #[test]
    fn test_duplicate_header_names() {
        let mut parser = ColumnsParser::new(&["Qty", "Qty"]);
        parser.process_item(&item("Qty", 0.0, 1.0));
        assert!(!parser.is_ready());
        parser.process_item(&item("Qty", 30.0, 1.0));
        assert!(parser.is_ready());

        parser.process_item(&item("7", 29.0, 2.0));
        let columns = parser.columns();
        assert_eq!(columns[0].x, 0.0);
        assert_eq!(columns[1].x, 30.0);
        assert_eq!(columns[1].items[0].text, "7");
    }

    #[test]
    fn test_headers_out_of_order() {
        let mut parser = ColumnsParser::new(&["A", "B"]);
        parser.process_item(&item("B", 10.0, 1.0));
        assert!(!parser.is_ready());
        parser.process_item(&item("A", 0.0, 1.0));
        assert!(parser.is_ready());
        assert_eq!(parser.columns()[0].name, "A");
    }
}
