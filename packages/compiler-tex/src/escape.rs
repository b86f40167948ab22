const BACKSLASH: &str = "\u{E000}";
const TILDE: &str = "\u{E001}";
const CARET: &str = "\u{E002}";

/// Substitutions applied to free text placed in the document, in order.
///
/// Characters escaped with a text command are first parked on private-use
/// placeholders, and expanded only after the brace rules have run, so the
/// `{}` that ends each command is never escaped. The placeholders are
/// stripped from the input before anything else.
pub const TEXT_ESCAPES: &[(&str, &str)] = &[
    (BACKSLASH, ""),
    (TILDE, ""),
    (CARET, ""),
    ("\\", BACKSLASH),
    ("~", TILDE),
    ("^", CARET),
    ("#", "\\#"),
    ("$", "\\$"),
    ("%", "\\%"),
    ("&", "\\&"),
    ("_", "\\_"),
    ("{", "\\{"),
    ("}", "\\}"),
    (BACKSLASH, "\\textbackslash{}"),
    (TILDE, "\\textasciitilde{}"),
    (CARET, "\\textasciicircum{}"),
];

/// Escape text for use in LaTeX body text
pub fn escape_text(text: &str) -> String {
    TEXT_ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}
