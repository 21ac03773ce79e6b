//! LaTeX escaping for user-supplied text.
//!
//! Titles, artists, composers and the other free-text fields of a book end up
//! inside LaTeX macro arguments, so characters that LaTeX treats as syntax must
//! be replaced before embedding. Paths and raw markup fields are never passed
//! through here.

/// Escape special LaTeX characters in text.
///
/// Each input character maps to at most one replacement and replacements are
/// never re-scanned, so `\` becomes `\textbackslash{}` and the braces it
/// introduces stay unescaped.
///
/// | Input | Output |
/// |---|---|
/// | `&` `%` `$` `#` `_` `{` `}` | backslash-prefixed |
/// | `~` | `\textasciitilde{}` |
/// | `^` | `\^{}` |
/// | `\` | `\textbackslash{}` |
/// | newline | `\\` |
/// | `-` | `{-}` |
/// | U+00A0 | `~` |
///
/// # Examples
///
/// ```
/// use songbook::escape_latex;
///
/// assert_eq!(escape_latex("100% & fun_time"), r"100\% \& fun\_time");
/// assert_eq!(escape_latex("plain text"), "plain text");
/// ```
pub fn escape_latex(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '~' => result.push_str(r"\textasciitilde{}"),
            '^' => result.push_str(r"\^{}"),
            '\\' => result.push_str(r"\textbackslash{}"),
            '\n' => result.push_str(r"\\"),
            '-' => result.push_str("{-}"),
            '\u{a0}' => result.push('~'),
            _ => result.push(c),
        }
    }

    result
}
