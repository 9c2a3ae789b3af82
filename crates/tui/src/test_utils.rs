//! Rendering helpers shared by the test modules.

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Rect};

/// Converts a ratatui [`Buffer`] to text, one line per row, with trailing
/// spaces trimmed.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        let mut row = String::new();
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        result.push_str(row.trim_end_matches(' '));
        result.push('\n');
    }
    result
}

/// Renders into a fresh buffer of `width` x `height` and returns its text.
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    render: impl FnOnce(Rect, &mut Buffer),
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Creates a [`TestBackend`] terminal of the given size.
pub(crate) fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).expect("test terminal")
}
