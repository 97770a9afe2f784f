//! PDF content stream parsing and execution.
//!
//! This module handles parsing and processing of PDF content streams,
//! which contain sequences of operators that define page appearance.
//!
//! Phase 4

pub mod graphics_state;
pub mod interpreter;
pub mod objects;
pub mod operators;
pub mod page;
pub mod parser;

pub use graphics_state::{GraphicsState, GraphicsStateStack, Matrix};
pub use interpreter::Interpreter;
pub use objects::{Bbox, ContentObject, MarkedContentFrame, ObjectType, PathSegment, TextState};
pub use operators::{Operator, TextElement};
pub use page::Page;
pub use parser::parse_content_stream;
