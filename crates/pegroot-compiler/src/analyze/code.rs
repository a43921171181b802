//! Action code validation.

use pegroot_core::{CodeAnnotations, CodeBlock};

use crate::diagnostics::Finding;
use crate::host::{HostFrontEnd, ImplicitParams};

/// Result of validating one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Absent or identity code, nothing to check.
    Unchanged,
    /// Valid code, returned with its annotations.
    Annotated(CodeBlock),
    /// Invalid code. The block itself stays as it was.
    Failed(Finding),
}

pub struct CodeValidator<'a> {
    front_end: &'a dyn HostFrontEnd,
    implicit_params: &'a ImplicitParams,
}

impl<'a> CodeValidator<'a> {
    pub fn new(front_end: &'a dyn HostFrontEnd, implicit_params: &'a ImplicitParams) -> Self {
        Self {
            front_end,
            implicit_params,
        }
    }

    pub fn validate(&self, code: Option<&CodeBlock>) -> Outcome {
        let Some(block) = code else {
            return Outcome::Unchanged;
        };
        if block.identity {
            return Outcome::Unchanged;
        }

        let parsed = match self.front_end.tokenize_and_parse(&block.code, block.index) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(at = %block.index, error = %err, "action code rejected");
                return Outcome::Failed(err.into_finding());
            }
        };

        let annotations = CodeAnnotations {
            used_args: self.implicit_params.used_in(&parsed.tokens),
            comments: self.front_end.scan_comments(&block.code, block.index),
            parsed: parsed.forms,
        };
        tracing::trace!(
            at = %block.index,
            forms = annotations.parsed.len(),
            comments = annotations.comments.len(),
            "action code annotated"
        );

        Outcome::Annotated(block.clone().with_annotations(annotations))
    }
}
