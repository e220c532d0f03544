//! Splitting fixture lines into argument tokens.

use unscanny::Scanner;

/// The separator between a command and its arguments.
pub const FIELD_SEPARATOR: char = ';';

/// The separator between a base field and its modifiers, e.g. `given-informal`.
pub const MODIFIER_SEPARATOR: char = '-';

/// The separator in value lists of `enum` declarations.
pub const LIST_SEPARATOR: char = ',';

/// Split a fixture line on semicolons, trimming each token.
///
/// The line itself is not trimmed first, so a line always yields at least one
/// token and a trailing `;` yields a trailing empty token.
pub fn tokenize(line: &str) -> Vec<&str> {
    split_trimmed(line, FIELD_SEPARATOR)
}

/// Split a single token at `delimiter` without trimming the parts.
pub fn split_subtokens(token: &str, delimiter: char) -> Vec<&str> {
    let mut s = Scanner::new(token);
    let mut parts = vec![];
    loop {
        parts.push(s.eat_until(delimiter));
        if !s.eat_if(delimiter) {
            break;
        }
    }
    parts
}

/// Split a single token at `delimiter`, trimming whitespace around the parts.
pub fn split_trimmed(token: &str, delimiter: char) -> Vec<&str> {
    split_subtokens(token, delimiter).into_iter().map(str::trim).collect()
}

/// Whether a line carries no command: it is blank or a `#` comment.
pub fn is_trivia(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}
