// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tokenizer for placeholder bodies
//!
//! Splits `path | filter: arg | filter` on top-level pipes. A pipe inside a
//! single- or double-quoted argument does not split.

use super::span::Spanned;

/// Iterator over the pipe-separated parts of a placeholder body
#[derive(Debug, Clone)]
pub struct Tokenizer<'input> {
    input: &'input str,
    position: usize,
    finished: bool,
}

impl<'input> Tokenizer<'input> {
    /// Create a tokenizer over the text between `{{` and `}}`
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            position: 0,
            finished: false,
        }
    }

    /// Next raw part, untrimmed, with its byte span
    pub fn next_token(&mut self) -> Option<Spanned<&'input str>> {
        if self.finished {
            return None;
        }

        let start = self.position;
        let mut quote: Option<char> = None;

        for (offset, c) in self.input[start..].char_indices() {
            match (quote, c) {
                (Some(open), c) if c == open => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, '|') => {
                    let end = start + offset;
                    self.position = end + 1;
                    return Some(Spanned::new(&self.input[start..end], start, end));
                }
                (None, _) => {}
            }
        }

        // An unterminated quote runs to the end of the input.
        self.finished = true;
        self.position = self.input.len();
        Some(Spanned::new(&self.input[start..], start, self.input.len()))
    }
}

impl<'input> Iterator for Tokenizer<'input> {
    type Item = Spanned<&'input str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Split a filter token into its name and optional raw argument
///
/// Only the first `:` separates, so arguments such as `%H:%M` stay whole.
pub fn split_filter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(':') {
        Some((name, argument)) => (name.trim(), Some(argument)),
        None => (token.trim(), None),
    }
}

/// Normalize a raw filter argument
///
/// Surrounding whitespace is trimmed and one pair of matching quotes is
/// stripped. A blank, unquoted argument counts as no argument.
pub fn unquote_argument(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let bytes = trimmed.as_bytes();
    let quoted = bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0];

    if quoted {
        Some(trimmed[1..trimmed.len() - 1].to_string())
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(input: &str) -> Vec<&str> {
        Tokenizer::new(input).map(|token| token.value).collect()
    }

    #[test]
    fn test_split_on_pipes() {
        assert_eq!(parts("name | upcase | truncate: 3"), vec!["name ", " upcase ", " truncate: 3"]);
        assert_eq!(parts("name"), vec!["name"]);
    }

    #[test]
    fn test_quoted_pipe_does_not_split() {
        assert_eq!(parts("tags | join: ' | '"), vec!["tags ", " join: ' | '"]);
        assert_eq!(parts(r#"tags | join: " | " | upcase"#), vec!["tags ", r#" join: " | " "#, " upcase"]);
    }

    #[test]
    fn test_spans() {
        let tokens: Vec<_> = Tokenizer::new("a|bc").collect();
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 1);
        assert_eq!(tokens[1].start, 2);
        assert_eq!(tokens[1].end, 4);
    }

    #[test]
    fn test_trailing_pipe_yields_empty_token() {
        assert_eq!(parts("a |"), vec!["a ", ""]);
    }

    #[test]
    fn test_split_filter() {
        assert_eq!(split_filter(" upcase "), ("upcase", None));
        assert_eq!(split_filter(" date: %H:%M"), ("date", Some(" %H:%M")));
    }

    #[test]
    fn test_unquote_argument() {
        assert_eq!(unquote_argument(" 3 "), Some("3".to_string()));
        assert_eq!(unquote_argument(" 'N/A' "), Some("N/A".to_string()));
        assert_eq!(unquote_argument(r#""""#), Some(String::new()));
        assert_eq!(unquote_argument("   "), None);
        assert_eq!(unquote_argument("'"), Some("'".to_string()));
    }
}
