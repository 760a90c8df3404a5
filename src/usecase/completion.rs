use clang_ast::{Ast, FrontEnd, ParseOptions};
use vimson::{List, EMPTY_LIST};

use super::{list_or_none, Queries};
use crate::stringize;

impl<F: FrontEnd> Queries<F> {
    /// Completion candidates at the position, best first.
    ///
    /// Ordered by priority, then by the typed text; truncated to the
    /// configured limit.
    pub fn completion_at(&self, input: &str) -> String {
        let limit = self.config().completion_limit;
        self.with_location("completion_at", input, ParseOptions::default(), EMPTY_LIST, |session, request| {
            let mut candidates = session.unit().complete_at(request.line, request.column);
            candidates.sort_by(|a, b| {
                a.priority
                    .cmp(&b.priority)
                    .then_with(|| a.typed_text.cmp(&b.typed_text))
            });
            if let Some(limit) = limit {
                candidates.truncate(limit);
            }
            let items: List = candidates.iter().map(stringize::completion).collect();
            list_or_none(items)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::usecase::fixture::{queries, queries_with, CURRENT_FUNCTION};

    #[test]
    fn test_completion_sorted_by_priority_then_word() {
        let q = queries();
        let actual = q.completion_at(&format!("{CURRENT_FUNCTION}:-std=c++14:22:14"));
        let words: Vec<&str> = actual
            .match_indices("'word':'")
            .map(|(i, m)| {
                let rest = &actual[i + m.len()..];
                &rest[..rest.find('\'').unwrap()]
            })
            .collect();
        assert_eq!(words, vec!["y", "size", "func", "make"]);
        assert!(actual.starts_with("[{'word':'y','abbr':'y','menu':'int','info':'','kind':'v',},"));
    }

    #[test]
    fn test_completion_limit() {
        let q = queries_with(Config {
            completion_limit: Some(2),
            ..Config::default()
        });
        let actual = q.completion_at(&format!("{CURRENT_FUNCTION}:22:14"));
        assert_eq!(actual.matches("'word':").count(), 2);
        assert!(actual.contains(
            "{'word':'size','abbr':'size() const','menu':'int','info':'Number of parts.','kind':'f',},"
        ));
    }

    #[test]
    fn test_completion_failures_are_empty_lists() {
        let q = queries();
        assert_eq!(q.completion_at(&format!("{CURRENT_FUNCTION}:0:0")), "[]");
        assert_eq!(q.completion_at("qa/data/missing.cpp:1:1"), "[]");
        assert_eq!(q.completion_at("garbage"), "[]");
    }
}
