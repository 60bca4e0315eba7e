//! Substitution executor
//!
//! Applies a parsed [`Directive`] to a subject string. The `g` flag selects
//! replace-all versus replace-first; the replacement text goes to the engine
//! as-is, since the parser already normalized the literal-dollar marker.
//! Substitution never touches the match-state register: in the legacy
//! semantics only match/search operations update it.

use anyhow::Result;

use crate::directive::Directive;
use crate::engine;

/// Apply `directive` to `subject`, returning the resulting string.
pub fn execute(directive: &Directive, subject: &str) -> Result<String> {
    let re = engine::compile(&directive.pattern, directive.case_insensitive())?;

    let result = if directive.global {
        re.replace_all(subject, directive.replacement.as_str())
    } else {
        re.replace(subject, directive.replacement.as_str())
    };

    Ok(result.into_owned())
}
