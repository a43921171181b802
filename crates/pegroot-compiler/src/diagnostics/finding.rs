use std::fmt;

use pegroot_core::Position;
use serde::Serialize;

/// What went wrong, with the payload each kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// A referenced nonterminal has no rule. One finding per name,
    /// listing every occurrence in ascending order.
    NoReduction {
        name: String,
        occurrences: Vec<Position>,
    },
    /// A rule other than the entry point is never referenced.
    UnusedRule { name: String, index: Position },
    /// Action code failed to tokenize.
    HostSyntaxError { info: String, location: Position },
    /// Action code tokenized but is not a valid statement list.
    HostParseError { reason: String, location: Position },
}

impl FindingKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnusedRule { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable tag for tooling.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NoReduction { .. } => "no_reduction",
            Self::UnusedRule { .. } => "unused_rule",
            Self::HostSyntaxError { .. } => "host_syntax_error",
            Self::HostParseError { .. } => "host_parse_error",
        }
    }

    /// Where the finding points in the grammar source.
    pub fn location(&self) -> Position {
        match self {
            Self::NoReduction { occurrences, .. } => {
                occurrences.first().copied().unwrap_or_default()
            }
            Self::UnusedRule { index, .. } => *index,
            Self::HostSyntaxError { location, .. } | Self::HostParseError { location, .. } => {
                *location
            }
        }
    }

    /// Width of the primary span in chars, used when rendering.
    pub(crate) fn span_width(&self) -> usize {
        match self {
            Self::NoReduction { name, .. } | Self::UnusedRule { name, .. } => {
                name.chars().count().max(1)
            }
            Self::HostSyntaxError { .. } | Self::HostParseError { .. } => 1,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoReduction { name, .. } => format!("no reduction for nonterminal `{name}`"),
            Self::UnusedRule { name, .. } => format!("rule `{name}` is never used"),
            Self::HostSyntaxError { info, .. } => format!("invalid action code: {info}"),
            Self::HostParseError { reason, .. } => {
                format!("action code does not parse: {reason}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One error or warning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(kind: FindingKind) -> Self {
        Self {
            severity: kind.default_severity(),
            kind,
        }
    }

    pub fn no_reduction(name: impl Into<String>, occurrences: Vec<Position>) -> Self {
        Self::new(FindingKind::NoReduction {
            name: name.into(),
            occurrences,
        })
    }

    pub fn unused_rule(name: impl Into<String>, index: Position) -> Self {
        Self::new(FindingKind::UnusedRule {
            name: name.into(),
            index,
        })
    }

    pub fn host_syntax_error(info: impl Into<String>, location: Position) -> Self {
        Self::new(FindingKind::HostSyntaxError {
            info: info.into(),
            location,
        })
    }

    pub fn host_parse_error(reason: impl Into<String>, location: Position) -> Self {
        Self::new(FindingKind::HostParseError {
            reason: reason.into(),
            location,
        })
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    pub fn location(&self) -> Position {
        self.kind.location()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.severity,
            self.location(),
            self.message()
        )?;
        if let FindingKind::NoReduction { occurrences, .. } = &self.kind {
            for pos in occurrences.iter().skip(1) {
                write!(f, " (also at {pos})")?;
            }
        }
        Ok(())
    }
}
