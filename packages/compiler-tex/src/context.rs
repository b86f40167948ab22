use crate::error::{CompileError, CompileResult};
use crate::escape::escape_text;
use gotex_board::{Color, Overlay, Point};

/// Name of the psgo diagram environment
pub const BOARD_ENV: &str = "psgoboard";

/// Output buffer for psgo markup.
///
/// Each method writes one diagram primitive as a line of markup.
#[derive(Debug, Default)]
pub struct TexContext {
    buffer: String,
    in_board: bool,
}

impl TexContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        self.add(text);
        self.add("\n");
    }

    pub fn in_board(&self) -> bool {
        self.in_board
    }

    pub fn begin(&mut self, size: usize) -> CompileResult<()> {
        if self.in_board {
            return Err(CompileError::BoardState(format!(
                "{} already open",
                BOARD_ENV
            )));
        }
        self.add_line(&format!("\\begin{{{}}}[{}]", BOARD_ENV, size));
        self.in_board = true;
        Ok(())
    }

    pub fn end(&mut self) -> CompileResult<()> {
        if !self.in_board {
            return Err(CompileError::BoardState(format!(
                "{} closed before it was opened",
                BOARD_ENV
            )));
        }
        self.add_line(&format!("\\end{{{}}}", BOARD_ENV));
        self.in_board = false;
        Ok(())
    }

    pub fn place_stone(&mut self, color: Color, point: Point, overlay: Option<&Overlay>) {
        let marks = overlay.map(marks).unwrap_or_default();
        let options = if marks.is_empty() {
            String::new()
        } else {
            format!("[{}]", marks)
        };
        self.add_line(&format!(
            "\\stone{}{{{}}}{}",
            options,
            color.name(),
            coordinates(point)
        ));
    }

    pub fn mark_empty(&mut self, point: Point, overlay: &Overlay) {
        self.add_line(&format!(
            "\\markpos{{{}}}{}",
            marks(overlay),
            coordinates(point)
        ));
    }

    pub fn reset_move_counter(&mut self) {
        self.add_line("\\setcounter{gomove}{0}");
    }

    pub fn numbered_move(&mut self, point: Point) {
        self.add_line(&format!("\\move{}", coordinates(point)));
    }

    /// Flip the expected color without drawing anything or advancing the
    /// move counter
    pub fn toggle_expectation(&mut self) {
        self.add_line("\\toggleblackmove");
    }

    /// Use up one move number without drawing a stone. The expected color
    /// flips and the counter advances, like a `\pass`.
    pub fn skip_move(&mut self, comment: Option<&str>) {
        let directive = "\\toggleblackmove\\addtocounter{gomove}{1}";
        match comment {
            Some(comment) => self.add_line(&format!("{} % {}", directive, comment)),
            None => self.add_line(directive),
        }
    }

    pub fn pass_directive(&mut self) {
        self.add_line("\\pass");
    }

    pub fn raw(&mut self, text: &str) {
        self.add_line(text);
    }

    pub fn get_output(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

/// Coordinate token: lowercase column letter, then row number
pub fn coordinates(point: Point) -> String {
    let name = point.to_string();
    let mut chars = name.chars();
    let column: String = chars.next().map(|c| c.to_ascii_lowercase()).into_iter().collect();
    format!("{{{}}}{{{}}}", column, chars.as_str())
}

fn marks(overlay: &Overlay) -> String {
    let mut out = String::new();
    if let Some(label) = overlay.label.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("\\marklb{{{}}}", escape_text(label)));
    }
    if overlay.square {
        out.push_str("\\marksq");
    }
    if overlay.select {
        out.push_str("\\markma");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates() {
        assert_eq!(coordinates(Point::new(3, 3)), "{d}{4}");
        assert_eq!(coordinates(Point::new(8, 18)), "{j}{19}");
        assert_eq!(coordinates(Point::new(0, 0)), "{a}{1}");
    }

    #[test]
    fn test_begin_end_state() {
        let mut ctx = TexContext::new();
        assert!(ctx.end().is_err());
        ctx.begin(19).unwrap();
        assert!(ctx.in_board());
        assert!(ctx.begin(19).is_err());
        ctx.end().unwrap();
        assert!(!ctx.in_board());
        assert_eq!(
            ctx.get_output(),
            "\\begin{psgoboard}[19]\n\\end{psgoboard}\n"
        );
    }

    #[test]
    fn test_stone_with_overlay() {
        let mut ctx = TexContext::new();
        ctx.place_stone(Color::White, Point::new(2, 1), None);
        let overlay = Overlay {
            label: Some("A".to_string()),
            square: true,
            select: true,
        };
        ctx.place_stone(Color::Black, Point::new(3, 3), Some(&overlay));
        ctx.mark_empty(Point::new(4, 4), &Overlay::square());

        assert_eq!(
            ctx.get_output(),
            "\\stone{white}{c}{2}\n\
             \\stone[\\marklb{A}\\marksq\\markma]{black}{d}{4}\n\
             \\markpos{\\marksq}{e}{5}\n"
        );
    }

    #[test]
    fn test_move_directives() {
        let mut ctx = TexContext::new();
        ctx.reset_move_counter();
        ctx.numbered_move(Point::new(15, 15));
        ctx.toggle_expectation();
        ctx.skip_move(None);
        ctx.skip_move(Some("pass"));
        ctx.pass_directive();

        assert_eq!(
            ctx.into_output(),
            "\\setcounter{gomove}{0}\n\
             \\move{q}{16}\n\
             \\toggleblackmove\n\
             \\toggleblackmove\\addtocounter{gomove}{1}\n\
             \\toggleblackmove\\addtocounter{gomove}{1} % pass\n\
             \\pass\n"
        );
    }

    #[test]
    fn test_label_is_escaped() {
        let mut ctx = TexContext::new();
        ctx.mark_empty(Point::new(0, 0), &Overlay::label("#1"));
        assert_eq!(ctx.get_output(), "\\markpos{\\marklb{\\#1}}{a}{1}\n");
    }
}
