//! Dead store finder for a tiny imperative language
//!
//! Programs use the variables `a`..`z`, integer constants, assignment,
//! `if <expr> ... end`, `while <expr> ... end` and the operators
//! `+ - * / < >`. The analysis reports every assignment whose value is never
//! read before it is overwritten or the program ends.
//!
//! ## Examples
//! ```rust
//! let source = "
//! a = 1
//! b = 2
//! a = b
//! x = 1
//! while ( x < 10 )
//!     x = x + 1
//! end
//! ";
//!
//! let report = deadstore::analyze(source).unwrap();
//!
//! assert_eq!(report.lines().collect::<Vec<_>>(), ["a = 1", "a = b"]);
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod liveness;
pub mod location;
pub mod operator;
pub mod parser;
pub mod report;
pub mod token;
pub mod var;

pub use crate::error::{AnalysisError, AnalysisResult, SyntaxError};
pub use crate::report::{Assignment, DeadStoreReport, LogicalTime};

use crate::cursor::Cursor;

/// Finds the dead stores of a program given as source text.
pub fn analyze(source: &str) -> AnalysisResult<DeadStoreReport> {
    analyze_words(Cursor::new(lexer::lex(source)))
}

/// Finds the dead stores of an already split program.
pub fn analyze_words(cursor: Cursor<'_>) -> AnalysisResult<DeadStoreReport> {
    parser::parse(cursor)
}
