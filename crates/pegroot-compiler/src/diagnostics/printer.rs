//! Builder-pattern printer for rendering findings.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use pegroot_core::Position;

use super::collection::Findings;
use super::finding::{FindingKind, Severity};

/// Builder for rendering findings with various options.
pub struct FindingsPrinter<'d, 's> {
    findings: &'d Findings,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> FindingsPrinter<'d, 's> {
    pub fn new(findings: &'d Findings) -> Self {
        Self {
            findings,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Grammar source the finding positions refer to.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, finding) in self.findings.iter().enumerate() {
            let message = finding.message();
            let width = finding.kind.span_width();
            let range = span_range(source, finding.location(), width);

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&message));

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            if let FindingKind::NoReduction { occurrences, .. } = &finding.kind {
                for pos in occurrences.iter().skip(1) {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(span_range(source, *pos, width))
                            .label("also referenced here"),
                    );
                }
            }

            let level = severity_to_level(finding.severity);
            let report: Vec<Group> = vec![level.primary_title(&message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", finding)?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Byte range covering `width` chars from `pos`, clamped to the line.
fn span_range(source: &str, pos: Position, width: usize) -> Range<usize> {
    let Some(start) = byte_offset(source, pos) else {
        let end = source.len();
        return end.saturating_sub(1)..end;
    };

    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |n| start + n);
    let end = source[start..line_end]
        .char_indices()
        .nth(width)
        .map_or(line_end, |(n, _)| start + n);

    if start == end {
        return start..(start + 1).min(source.len());
    }

    start..end
}

/// Byte offset of a 1-based line/column position, `None` past the end.
pub(crate) fn byte_offset(source: &str, pos: Position) -> Option<usize> {
    let line = pos.line.max(1) as usize;
    let column = pos.column.max(1) as usize;

    let mut line_start = 0;
    for _ in 1..line {
        line_start += source[line_start..].find('\n')? + 1;
    }

    let rest = &source[line_start..];
    let line_text = &rest[..rest.find('\n').unwrap_or(rest.len())];
    let col = line_text
        .char_indices()
        .nth(column - 1)
        .map_or(line_text.len(), |(n, _)| n);

    Some(line_start + col)
}

impl Findings {
    pub fn printer(&self) -> FindingsPrinter<'_, '_> {
        FindingsPrinter::new(self)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }
}
