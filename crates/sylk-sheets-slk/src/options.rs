//! SYLK options

/// Options for writing SYLK documents
#[derive(Debug, Clone)]
pub struct SlkWriteOptions {
    /// Line terminator (default: CRLF)
    pub line_terminator: LineTerminator,
    /// Write the header block before the cell records
    pub write_header: bool,
    /// Write the `E` terminator record
    pub write_footer: bool,
    /// Program identifier written into the `ID` record
    pub program_id: String,
}

impl SlkWriteOptions {
    /// Options for a bare record list, without header or footer
    pub fn records_only() -> Self {
        Self {
            write_header: false,
            write_footer: false,
            ..Self::default()
        }
    }
}

impl Default for SlkWriteOptions {
    fn default() -> Self {
        Self {
            line_terminator: LineTerminator::CRLF,
            write_header: true,
            write_footer: true,
            program_id: "WXL".to_string(),
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::LF => "\n",
            LineTerminator::CRLF => "\r\n",
            LineTerminator::CR => "\r",
        }
    }
}
