//! Configuration for item sources and table strategies.
//!
//! The rule engine itself takes no configuration beyond its ordered rule
//! list. Options here either pass through to the document parser
//! ([`ReaderOptions`]) or tune the geometric table heuristics.

/// Default quantization multiplier applied to coordinates by grid tables.
pub const DEFAULT_GRID_SCALE: f32 = 3.0;

/// Default offset, in bucket widths, subtracted from the minimum y by the
/// row floor classifier.
pub const DEFAULT_ROW_OFFSET: f32 = 0.5;

/// Options handed untouched to the document parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReaderOptions {
    /// Password for encrypted documents.
    pub password: Option<String>,

    /// Ask the parser for verbose diagnostics.
    pub debug: bool,
}

impl ReaderOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decryption password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Enable parser diagnostics.
    pub fn with_debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }
}

/// Options of the row/column-cluster table (`parse_table`).
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Expected number of rows.
    pub rows: usize,

    /// Index of the row whose cells define the column boundaries.
    pub header_row: usize,

    /// Shift of the minimum y, in bucket widths, before bucketing rows.
    pub row_offset: f32,
}

impl TableOptions {
    /// Create options for a table of `rows` rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            header_row: 0,
            row_offset: DEFAULT_ROW_OFFSET,
        }
    }

    /// Use another row as column header.
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    /// Override the row bucketing offset.
    pub fn with_row_offset(mut self, row_offset: f32) -> Self {
        self.row_offset = row_offset;
        self
    }
}

/// Options of the right-edge clustering grid (`parse_grid`).
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Expected number of columns.
    pub columns: usize,

    /// Quantization multiplier for coordinates.
    pub scale: f32,
}

impl GridOptions {
    /// Create options for a grid of `columns` columns.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            scale: DEFAULT_GRID_SCALE,
        }
    }

    /// Override the quantization multiplier.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Options of the header-relative grid (`parse_header_grid`).
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderGridOptions {
    /// Number of leading rows to discard before the header row.
    pub skip_rows: usize,

    /// Quantization multiplier for coordinates.
    pub scale: f32,
}

impl Default for HeaderGridOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HeaderGridOptions {
    /// Create options discarding `skip_rows` leading rows.
    pub fn new(skip_rows: usize) -> Self {
        Self {
            skip_rows,
            scale: DEFAULT_GRID_SCALE,
        }
    }

    /// Override the quantization multiplier.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}
