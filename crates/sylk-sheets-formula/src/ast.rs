//! Parsed (unresolved) formula types

/// Formula expression as written, before references are resolved
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Function call, `NAME(arg;arg;...)`
    Call { name: String, args: Vec<FormulaExpr> },
    /// Unquoted operand text (address, range, number or bare string)
    Operand(String),
    /// Double-quoted text literal
    Quoted(String),
}
