//! # Plain-Text Preview
//!
//! Replays an IR [`Program`] the way the printer would lay it out and
//! returns the result as text. Useful for checking a ticket in a terminal
//! or a browser before sending it to paper.
//!
//! Alignment pads lines to the column width. Double-size text takes two
//! columns per character, so it is spaced out (`T O T A L`). Bold has no
//! plain-text rendition and is ignored. `Raw` ops are skipped.

use crate::ir::{Op, Program};
use crate::protocol::text::{Alignment, CharSize};

/// Marker printed where the paper is cut.
pub const CUT_MARKER: &str = "- - - - - - ✂ - - - - - -";

/// Render a program as plain text, `columns` characters wide.
///
/// ## Example
///
/// ```
/// use ticketera::components::{ComponentExt, Receipt, Text};
/// use ticketera::preview::render_text;
///
/// let program = Receipt::new().child(Text::new("HOLA").center()).compile();
/// assert_eq!(render_text(&program, 8), "  HOLA\n");
/// ```
pub fn render_text(program: &Program, columns: usize) -> String {
    let mut renderer = Renderer::new(columns);
    for op in program {
        renderer.apply(op);
    }
    renderer.finish()
}

struct Renderer {
    columns: usize,
    align: Alignment,
    size: CharSize,
    line: String,
    line_width: usize,
    out: String,
}

impl Renderer {
    fn new(columns: usize) -> Self {
        Self {
            columns,
            align: Alignment::Left,
            size: CharSize::Normal,
            line: String::new(),
            line_width: 0,
            out: String::new(),
        }
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Init => {
                self.align = Alignment::Left;
                self.size = CharSize::Normal;
            }
            Op::SetAlign(align) => self.align = *align,
            Op::SetSize(size) => self.size = *size,
            Op::SetBold(_) | Op::Raw(_) => {}
            Op::Text(text) => self.push_text(text),
            Op::Newline => self.flush_line(),
            Op::Cut => {
                if !self.line.is_empty() {
                    self.flush_line();
                }
                self.out.push_str(CUT_MARKER);
                self.out.push('\n');
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.flush_line();
                continue;
            }
            if self.size == CharSize::Double && !self.line.is_empty() {
                self.line.push(' ');
            }
            self.line.push(ch);
            // Columns the printer uses, not characters in the spaced-out text
            self.line_width += self.size.width_factor();
        }
    }

    fn flush_line(&mut self) {
        let pad = self.columns.saturating_sub(self.line_width);
        let left = match self.align {
            Alignment::Left => 0,
            Alignment::Center => pad / 2,
            Alignment::Right => pad,
        };
        if !self.line.is_empty() {
            self.out.extend(std::iter::repeat_n(' ', left));
            self.out.push_str(&self.line);
        }
        self.out.push('\n');
        self.line.clear();
        self.line_width = 0;
    }

    fn finish(mut self) -> String {
        if !self.line.is_empty() {
            self.flush_line();
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentExt, Divider, Receipt, Text, Total};

    #[test]
    fn test_left_text() {
        let program = Receipt::new().child(Text::new("abc")).compile();
        assert_eq!(render_text(&program, 10), "abc\n");
    }

    #[test]
    fn test_center_and_right() {
        let program = Receipt::new()
            .child(Text::new("ab").center())
            .child(Text::new("ab").right())
            .compile();
        assert_eq!(render_text(&program, 6), "  ab\n    ab\n");
    }

    #[test]
    fn test_double_size_spaced() {
        let program = Receipt::new().child(Total::new(1.0)).compile();
        let text = render_text(&program, 40);
        assert!(text.starts_with("T O T A L :"));
    }

    #[test]
    fn test_double_size_centering_uses_printer_width() {
        // "AB" at double width takes 4 of 11 columns: 3 columns of padding
        let program = Receipt::new()
            .child(Text::new("AB").center().double_size())
            .compile();
        assert_eq!(render_text(&program, 11), "   A B\n");
    }

    #[test]
    fn test_mixed_sizes_on_one_line() {
        let program = Receipt::new()
            .child(Text::inline("ab").double_size())
            .child(Text::new("c").right())
            .compile();
        // a b (4 columns) + c (1 column) = 5 of 8, right-aligned
        assert_eq!(render_text(&program, 8), "   a bc\n");
    }

    #[test]
    fn test_cut_marker() {
        let program = Receipt::new().child(Divider::dashed().width(3)).cut().compile();
        assert_eq!(render_text(&program, 3), format!("---\n{}\n", CUT_MARKER));
    }

    #[test]
    fn test_blank_line_stays_blank() {
        let mut program = Program::with_init();
        program.push(Op::SetAlign(Alignment::Center));
        program.push(Op::Newline);
        assert_eq!(render_text(&program, 10), "\n");
    }
}
