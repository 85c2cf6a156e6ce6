//! Message parser.
//!
//! This module turns message source into an AST. The grammar lives in
//! `message`, inline HTML handling and the sanitizing allowlist in `html`.
//! The AST is public so tooling can inspect messages without evaluating
//! them.

pub mod ast;
pub mod error;
mod html;
mod message;

pub use ast::Node;
pub use error::ParseError;
pub use html::{
    ALLOWED_ELEMENTS, COMMON_ATTRIBUTES, escape_html, is_allowed_element, is_dangerous_style,
};
pub use message::{ParseOptions, parse_message};
