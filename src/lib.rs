//! perlrt: runtime support for mechanically translated Perl programs
//!
//! Translated code calls into this crate for the primitives its source
//! language had for free: pattern-match and substitution directives
//! (`m//`, `s///` literals) with the correlated last-match state, the
//! `<>` multi-source line reader, `print`/`printf`, and the list
//! builtins. The binary at src/main.rs wraps the same core as a
//! one-liner driver.

pub mod cli;
pub mod directive;
pub mod engine;
pub mod list;
pub mod logger;
pub mod matcher;
pub mod output;
pub mod reader;
pub mod substitute;

// Re-export commonly used types for convenience
pub use directive::{Directive, DirectiveSyntaxError, MatchDirective, parse_match, parse_substitution};
pub use matcher::{MatchOp, MatchOutcome, MatchRegister, NoActiveMatchError};
pub use output::{Scalar, print_to, printf_to, sprintf};
pub use reader::{LineReader, Source};
pub use substitute::execute;
