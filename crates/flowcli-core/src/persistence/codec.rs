//! Field escaping for the line-based record format.
//!
//! Records are `|`-separated and `\n`-terminated, so free text has to be
//! rewritten before it can sit inside a field:
//!
//! | Literal text  | Encoded as             |
//! |---------------|------------------------|
//! | `<PIPE>`      | `<PIPE><PIPE>`         |
//! | `<NEWLINE>`   | `<NEWLINE><NEWLINE>`   |
//! | `\|`          | `<PIPE>`               |
//! | `\n`          | `<NEWLINE>`            |
//! | `\r`          | dropped                |
//!
//! Decoding restores every placeholder to its character, so runs of
//! delimiters or newlines (`a || b`, blank lines between paragraphs) always
//! survive. The scheme is not collision-free: a literal `<PIPE>` encodes
//! exactly like `||` and comes back as `||` (likewise `<NEWLINE>` comes back
//! as two newlines). The doubling step is kept so existing files read the
//! same way.

/// Field separator inside a record.
pub const DELIMITER: char = '|';

pub const PIPE_PLACEHOLDER: &str = "<PIPE>";
pub const NEWLINE_PLACEHOLDER: &str = "<NEWLINE>";

const DOUBLED_PIPE: &str = "<PIPE><PIPE>";
const DOUBLED_NEWLINE: &str = "<NEWLINE><NEWLINE>";

/// Encode `s` so it contains no `|`, `\n` or `\r`.
pub fn escape(s: &str) -> String {
    s.replace(PIPE_PLACEHOLDER, DOUBLED_PIPE)
        .replace(NEWLINE_PLACEHOLDER, DOUBLED_NEWLINE)
        .replace(DELIMITER, PIPE_PLACEHOLDER)
        .replace('\n', NEWLINE_PLACEHOLDER)
        .replace('\r', "")
}

/// Decode a field produced by [`escape`].
///
/// Placeholders go back to `\n` and `|` first; doubled placeholders have
/// already been consumed by then, so literal placeholder text decodes as the
/// characters it collides with.
pub fn unescape(s: &str) -> String {
    s.replace(NEWLINE_PLACEHOLDER, "\n")
        .replace(PIPE_PLACEHOLDER, &DELIMITER.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
