//! Lossless concrete syntax trees for EBNF grammars.
//!
//! ```
//! let tree = ebnf_cst::parse_str("digit = '0' | '1' ;").unwrap();
//! assert_eq!(tree.to_string(), "digit = '0' | '1' ;");
//! ```

pub mod cst;
pub mod error;
pub mod parser;
mod reader;
mod result;
pub mod source;

pub use cst::{Node, NodeId, NodeKind, ParseTree, Position, Primary, Span};
pub use error::{DetachedLiteral, ErrorKind, ParseError, Result, TreeError};
pub use parser::{
    parse, parse_file, parse_reader, parse_str, parse_with_options, ParseOptions, Parser,
};
pub use source::{IoSource, Source, StrSource};
