//! Mapping offsets inside a code block back to grammar source positions.

use pegroot_core::Position;

/// Position of byte `offset` of `source`, where `source` starts at `start`.
pub fn position_at(source: &str, offset: usize, start: Position) -> Position {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count(),
        None => before.chars().count(),
    };
    start.offset_by(line as u32, column as u32)
}

/// Position just past the last char of `source`.
pub fn end_position(source: &str, start: Position) -> Position {
    position_at(source, source.len(), start)
}
