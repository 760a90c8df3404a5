//! Splitting of `command` strings the way a POSIX shell would for simple
//! words: whitespace separates, quotes group, backslash escapes. [`join`]
//! goes the other way.

use std::borrow::Cow;

use crate::error::CompileDbError;

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

pub fn split(command: &str) -> Result<Vec<String>, CompileDbError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::Single, '\'') => quote = Quote::None,
            (Quote::Single, c) => word.push(c),
            (Quote::Double, '"') => quote = Quote::None,
            (Quote::Double, '\\') => match chars.next() {
                // only these are escapable inside double quotes
                Some(next @ ('"' | '\\' | '$' | '`')) => word.push(next),
                Some(next) => {
                    word.push('\\');
                    word.push(next);
                }
                None => word.push('\\'),
            },
            (Quote::Double, c) => word.push(c),
            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_word = true;
            }
            (Quote::None, '\\') => {
                if let Some(next) = chars.next() {
                    word.push(next);
                }
                in_word = true;
            }
            (Quote::None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (Quote::None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quote != Quote::None {
        return Err(CompileDbError::UnterminatedQuote(command.to_string()));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// One command line that [`split`] turns back into `words`.
///
/// Words holding whitespace, quotes or backslashes are single-quoted, as is
/// the empty word.
pub fn join<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| quote_word(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_word(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && !word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '\\'));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split("  clang++  -c main.cpp ").unwrap(),
            vec!["clang++", "-c", "main.cpp"]
        );
    }

    #[test]
    fn test_split_quotes_and_escapes() {
        assert_eq!(
            split(r#"cc -DNAME="a b" '-I/my dir' -DQ=\"x\" a\ b.c"#).unwrap(),
            vec!["cc", "-DNAME=a b", "-I/my dir", "-DQ=\"x\"", "a b.c"]
        );
    }

    #[test]
    fn test_split_empty_quoted_word_is_kept() {
        assert_eq!(split("cc '' x").unwrap(), vec!["cc", "", "x"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(matches!(
            split("cc \"-DX"),
            Err(CompileDbError::UnterminatedQuote(_))
        ));
    }

    #[test]
    fn test_join_quotes_only_when_needed() {
        assert_eq!(
            join(&["-std=c++17", "-DNAME=a b", "-DQ='x'", ""]),
            r#"-std=c++17 '-DNAME=a b' '-DQ='\''x'\''' ''"#
        );
    }

    #[test]
    fn test_join_survives_split() {
        let words = vec!["-I/my dir", "-DMSG=\"hi there\"", "-DP=C:\\tmp", "it's"];
        assert_eq!(split(&join(&words)).unwrap(), words);
    }
}
