//! Syntax and runtime model for tag-annotated command functions.
//!
//! A source file marks functions with a search term (a tag such as
//! `CONSOLE_COMMAND`) placed on the line before the declaration:
//!
//! ```text
//! CONSOLE_COMMAND // Squares the second parameter.
//! int multiply(int a, double b = 2.1 /* B defaults to 2.1 */)
//! ```
//!
//! [`scan::scan_source`] finds those declarations and turns each into a
//! [`FunctionDecl`]. The `cmdscan` binary renders them into a C++ dispatcher;
//! [`runtime::Registry`] offers the same validate-then-invoke calling
//! convention in-process.

pub mod args;
pub mod decl;
pub mod error;
pub mod lexer;
pub mod model;
pub mod runtime;
pub mod scan;
pub mod value;

pub use error::ParseError;
pub use model::{Argument, FunctionDecl};
pub use runtime::{CallError, CallStatus, Command, Registry};
pub use scan::{scan_source, ScanFailure, ScanReport};
pub use value::{Value, ValueType};
