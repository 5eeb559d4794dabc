//! tally-ingest: statement ingestion (delimited text and pre-extracted
//! table rows) with one parser per source format.

mod accumulator;
pub mod parsers;

pub use parsers::{
    CellRow, CellTable, PdfPage, PdfRow, PdfTable, StatementSource, parse_delimited_text,
    parse_docx_tables, parse_pdf_extraction, parse_pdf_tables, parse_statement,
};
