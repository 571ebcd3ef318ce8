// src/core/tokenizer.rs

//! Line-level lexing for rc files.

/// Removes backslash-newline sequences so that logical lines spanning several
/// physical lines are joined before splitting.
pub fn join_continuations(contents: &str) -> String {
    contents.replace("\\\r\n", "").replace("\\\n", "")
}

/// Splits one line into words.
///
/// - An unquoted `comment` character ends the line.
/// - Single or double quotes group text literally until the matching quote.
/// - A backslash takes the next character literally, inside quotes too.
///
/// Unterminated quotes and a dangling backslash are not errors: whatever was
/// collected so far is kept.
pub fn tokenize(line: &str, comment: char) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut escape = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        if escape {
            current.push(c);
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else if let Some(q) = quote {
            if c == q {
                quote = None;
            } else {
                current.push(c);
            }
        } else if c == '"' || c == '\'' {
            quote = Some(c);
        } else if c == comment {
            break;
        } else if c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    log::trace!("Tokenized {:?} into {:?}", line, words);
    words
}
