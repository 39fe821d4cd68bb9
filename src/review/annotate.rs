//! Building the review-submission comment map from raw CLI tokens.

use std::collections::BTreeMap;

use crate::client::models::CommentInput;
use crate::error::{GerritError, Result};
use crate::review::location::LocationSpec;

/// Group `(file#location, message)` pairs into the comment map the review
/// endpoint expects.
///
/// Tokens are split on the last `#` so file paths may themselves contain `#`.
/// Comments targeting the same file keep their input order.
pub fn build_comments(
    tokens: &[(String, String)],
) -> Result<BTreeMap<String, Vec<CommentInput>>> {
    let mut comments: BTreeMap<String, Vec<CommentInput>> = BTreeMap::new();

    for (token, message) in tokens {
        let (file, location) = token
            .rsplit_once('#')
            .ok_or_else(|| GerritError::MissingFileSeparator(token.clone()))?;

        let spec = LocationSpec::parse(location)?;
        comments
            .entry(file.to_string())
            .or_default()
            .push(CommentInput::new(spec.line(), spec.range(), message.clone()));
    }

    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(location: &str, message: &str) -> (String, String) {
        (location.to_string(), message.to_string())
    }

    #[test]
    fn comments_group_by_file_in_input_order() {
        let tokens = vec![
            token("a.py#1", "m1"),
            token("a.py#2", "m2"),
            token("b.py#1", "m3"),
        ];
        let comments = build_comments(&tokens).unwrap();

        assert_eq!(comments.len(), 2);
        let a = &comments["a.py"];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].message, "m1");
        assert_eq!(a[0].line, Some(1));
        assert_eq!(a[1].message, "m2");
        assert_eq!(comments["b.py"][0].message, "m3");
    }

    #[test]
    fn split_happens_on_last_separator() {
        let comments = build_comments(&[token("weird#path#10", "msg")]).unwrap();
        assert!(comments.contains_key("weird#path"));
        assert_eq!(comments["weird#path"][0].line, Some(10));
    }

    #[test]
    fn missing_separator_is_an_error() {
        let result = build_comments(&[token("src/main.rs", "msg")]);
        assert!(matches!(
            result,
            Err(GerritError::MissingFileSeparator(t)) if t == "src/main.rs"
        ));
    }

    #[test]
    fn invalid_location_propagates() {
        let result = build_comments(&[token("src/main.rs#abc", "msg")]);
        assert!(matches!(result, Err(GerritError::InvalidLocation(_))));
    }

    #[test]
    fn ranges_survive_into_comment_inputs() {
        let comments = build_comments(&[
            token("src/range.py#10-20", "Multi-line comment"),
            token("src/utils.py#L12C13-L12C19", "Char range"),
        ])
        .unwrap();

        let range = comments["src/range.py"][0].range.unwrap();
        assert_eq!(comments["src/range.py"][0].line, Some(20));
        assert_eq!(
            (range.start_line, range.start_character, range.end_line, range.end_character),
            (10, 0, 20, 10000)
        );

        let char_range = comments["src/utils.py"][0].range.unwrap();
        assert_eq!(comments["src/utils.py"][0].line, Some(12));
        assert_eq!(
            (
                char_range.start_line,
                char_range.start_character,
                char_range.end_line,
                char_range.end_character
            ),
            (12, 13, 12, 19)
        );
    }
}
