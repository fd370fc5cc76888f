//! Dump the items of a document
//!
//! Prints every item read from a pdf2json page tree, one per line:
//! fragments as `x  y  width  text`, markers as `file = ...` / `page = ...`.
//!
//! Usage:
//!   cargo run --release --bin dump_items -- document.json
//!   cargo run --release --bin dump_items -- document.json --table

use pdf_rules::config::ReaderOptions;
use pdf_rules::item::{FileMarker, Item};
use pdf_rules::layout::TableParser;
use pdf_rules::reader::{JsonDocumentParser, PdfReader};
use std::path::PathBuf;
use std::process::ExitCode;

struct DumpConfig {
    path: Option<PathBuf>,
    password: Option<String>,
    table: bool,
    verbose: bool,
}

impl DumpConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut path = None;
        let mut password = None;
        let mut table = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--password" => {
                    i += 1;
                    if i < args.len() {
                        password = Some(args[i].clone());
                    }
                },
                "--table" | "-t" => {
                    table = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    path = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        Self {
            path,
            password,
            table,
            verbose,
        }
    }
}

fn print_item(item: &Item) {
    match item {
        Item::File(FileMarker::Path(path)) => println!("file = {}", path.display()),
        Item::File(FileMarker::Buffer(buffer)) => println!("file = <{} bytes>", buffer.len()),
        Item::Page(page) => println!("page = {}", page.number),
        Item::Text(text) => println!("{}\t{}\t{}\t{}", text.x, text.y, text.width, text.text),
        Item::EndOfStream => {},
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let config = DumpConfig::from_args();

    let Some(path) = config.path else {
        eprintln!("Usage: dump_items <document.json> [--table] [--password <password>]");
        return ExitCode::FAILURE;
    };

    let mut options = ReaderOptions::new().with_debug(config.verbose);
    if let Some(password) = config.password {
        options = options.with_password(password);
    }
    let reader = PdfReader::new(options, JsonDocumentParser);

    // rows of each page, keyed by y then x
    let mut table = TableParser::new();
    let result = reader.parse_file_items(&path, |item| {
        if config.table {
            match item {
                Item::Page(page) => {
                    if !table.is_empty() {
                        println!("{}", table.render_rows());
                    }
                    table = TableParser::new();
                    println!("page = {}", page.number);
                },
                Item::Text(text) => table.process_item(text, text.x),
                Item::EndOfStream if !table.is_empty() => println!("{}", table.render_rows()),
                _ => {},
            }
        } else {
            print_item(item);
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
