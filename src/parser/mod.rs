pub mod wordlist;

pub use wordlist::parse_word_list;

use crate::error::InputError;
use tracing::debug;

/// A parsed correction session: the dictionary followed by the words to check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub dictionary: Vec<String>,
    /// Words to check, case preserved.
    pub queries: Vec<String>,
}

/// Parse session input.
///
/// Blank lines are ignored everywhere. The first remaining line holds the
/// number `N` of dictionary words, the next `N` lines are those words and
/// every line after them is a query. Empty input is an empty session.
pub fn parse_session(content: &str) -> Result<Session, InputError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(line_num, line)| (line_num + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((count_line, count)) = lines.next() else {
        return Ok(Session::default());
    };
    let expected: usize = count.parse().map_err(|_| InputError::InvalidCount {
        line: count_line,
        found: count.to_string(),
    })?;

    let dictionary: Vec<String> = lines
        .by_ref()
        .take(expected)
        .map(|(_, word)| word.to_string())
        .collect();
    if dictionary.len() < expected {
        return Err(InputError::TruncatedDictionary {
            expected,
            found: dictionary.len(),
        });
    }

    let queries: Vec<String> = lines.map(|(_, text)| text.to_string()).collect();

    debug!(
        dictionary = dictionary.len(),
        queries = queries.len(),
        "parsed session"
    );

    Ok(Session {
        dictionary,
        queries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let session = parse_session("3\ncat\ncar\ndog\nCot\nxyz\n").unwrap();
        assert_eq!(session.dictionary, vec!["cat", "car", "dog"]);
        assert_eq!(session.queries, vec!["Cot", "xyz"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let session = parse_session("\n2\n\ncat\r\n\n  dog  \n\nca\n\n").unwrap();
        assert_eq!(session.dictionary, vec!["cat", "dog"]);
        assert_eq!(session.queries, vec!["ca"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_session("").unwrap(), Session::default());
        assert_eq!(parse_session("\n\n").unwrap(), Session::default());
    }

    #[test]
    fn test_zero_words_then_queries() {
        let session = parse_session("0\nhello\n").unwrap();
        assert!(session.dictionary.is_empty());
        assert_eq!(session.queries, vec!["hello"]);
    }

    #[test]
    fn test_invalid_count() {
        let err = parse_session("\nthree\ncat\n").unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidCount {
                line: 2,
                found: "three".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_dictionary() {
        let err = parse_session("4\ncat\ndog\n").unwrap_err();
        assert_eq!(
            err,
            InputError::TruncatedDictionary {
                expected: 4,
                found: 2
            }
        );
    }
}
