pub mod errors;
pub mod span;

pub use errors::{Diagnostic, DiagnosticBag};
pub use span::{Position, Span};
