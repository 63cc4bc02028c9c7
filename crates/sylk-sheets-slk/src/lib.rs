//! # sylk-sheets-slk
//!
//! SYLK (`.slk`) writer for sylk-sheets.
//!
//! A document is a header block, one `C` record per non-empty cell and an
//! `E` terminator. Formula coordinates are written as offsets from the cell
//! that holds them (`R[-1]C`), which is what spreadsheet applications expect.

mod error;
mod header;
mod options;
mod writer;

pub use error::{SlkError, SlkResult};
pub use header::header_records;
pub use options::{LineTerminator, SlkWriteOptions};
pub use writer::{relativize, SlkWriter};
