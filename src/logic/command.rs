//! Command line parsing
//!
//! A small shell-like tokenizer: whitespace separates tokens, single and
//! double quotes group text, and nothing else is special.

/// Split a command line into tokens
///
/// Quote characters are consumed rather than emitted. An unterminated quote
/// keeps accumulating into the current token until the end of input. Empty
/// tokens (such as `""`) are dropped.
///
/// # Examples
/// ```
/// use vfsh::logic::command::tokenize;
///
/// assert_eq!(tokenize(r#"open "my file.txt" here"#), vec!["open", "my file.txt", "here"]);
/// assert!(tokenize("").is_empty());
/// assert_eq!(tokenize(r#"a "b"#), vec!["a", "b"]);
/// assert_eq!(tokenize("echo 'it''s'"), vec!["echo", "its"]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Whether a confirmation answer means "yes"
///
/// Only `y` and `yes` (any case, surrounding whitespace ignored) confirm;
/// everything else, including an empty answer, means no.
///
/// # Examples
/// ```
/// use vfsh::logic::command::is_affirmative;
///
/// assert!(is_affirmative("Y"));
/// assert!(is_affirmative(" yes "));
/// assert!(is_affirmative("YES"));
/// assert!(!is_affirmative("n"));
/// assert!(!is_affirmative(""));
/// assert!(!is_affirmative("maybe"));
/// ```
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  ls   -r\t/demo  "), vec!["ls", "-r", "/demo"]);
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_tokenize_mixed_quotes() {
        assert_eq!(tokenize(r#"say "it's" 'a "b"'"#), vec!["say", "it's", r#"a "b""#]);
    }

    #[test]
    fn test_tokenize_quote_inside_word() {
        assert_eq!(tokenize(r#"ab"c d"e"#), vec!["abc de"]);
    }

    #[test]
    fn test_tokenize_drops_empty_quoted_token() {
        assert_eq!(tokenize(r#"a "" b"#), vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_unterminated_single_quote() {
        assert_eq!(tokenize("write f 'hello world"), vec!["write", "f", "hello world"]);
    }

    #[test]
    fn test_is_affirmative_mixed_case() {
        assert!(is_affirmative("yEs"));
        assert!(!is_affirmative("yess"));
        assert!(!is_affirmative("no"));
    }
}
