//! One query per editor capability. Every query decodes its input, parses,
//! navigates and renders, and always answers with parseable text: `{}` or
//! `[]` stand for "nothing found", whatever the reason.

use clang_ast::{Ast, FrontEnd, ParseOptions};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::QueryError;
use crate::location::{FileRequest, LocationRequest};
use crate::session::{parse_file, Session};

mod compile_commands;
mod completion;
mod deduction;
mod diagnostics;
mod extent;
mod info;
mod related;

#[cfg(test)]
mod fixture;

pub use compile_commands::compile_commands;
pub use extent::ExtentKind;
pub use related::Jump;

type CursorOf<F> = <<F as FrontEnd>::Unit as Ast>::Cursor;

/// The query façade over one front-end and a configuration snapshot.
#[derive(Debug)]
pub struct Queries<F> {
    front: F,
    config: Config,
}

impl<F: FrontEnd> Queries<F> {
    pub fn new(front: F, config: Config) -> Self {
        Self { front, config }
    }

    pub fn front(&self) -> &F {
        &self.front
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `render` on the session opened for the position named by
    /// `input`.
    fn with_location<R>(
        &self,
        query: &'static str,
        input: &str,
        options: ParseOptions,
        empty: &'static str,
        render: R,
    ) -> String
    where
        R: FnOnce(&Session<F::Unit>, &LocationRequest) -> Option<String>,
    {
        let outcome = input
            .parse::<LocationRequest>()
            .map_err(QueryError::from)
            .and_then(|request| {
                let session = Session::open(&self.front, &request, &self.config, options)?;
                Ok(render(&session, &request))
            });
        finish(query, outcome, empty)
    }

    /// Run `render` on the cursor at the position named by `input`.
    fn at_location<R>(
        &self,
        query: &'static str,
        input: &str,
        options: ParseOptions,
        empty: &'static str,
        render: R,
    ) -> String
    where
        R: FnOnce(&F::Unit, CursorOf<F>) -> Option<String>,
    {
        self.with_location(query, input, options, empty, |session, _| {
            render(session.unit(), session.cursor())
        })
    }

    /// Run `render` on the unit parsed for the file request in `input`.
    fn on_file<R>(&self, query: &'static str, input: &str, empty: &'static str, render: R) -> String
    where
        R: FnOnce(&F::Unit) -> Option<String>,
    {
        let outcome = input
            .parse::<FileRequest>()
            .map_err(QueryError::from)
            .and_then(|request| {
                let unit = parse_file(&self.front, &request, &self.config, ParseOptions::default())?;
                Ok(render(&unit))
            });
        finish(query, outcome, empty)
    }
}

fn finish(query: &'static str, outcome: Result<Option<String>, QueryError>, empty: &'static str) -> String {
    match outcome {
        Ok(Some(text)) => text,
        Ok(None) => {
            trace!(query, "nothing found");
            empty.to_string()
        }
        Err(e) => {
            debug!(query, "query failed: {}", e);
            empty.to_string()
        }
    }
}

fn list_or_none(list: vimson::List) -> Option<String> {
    (!list.is_empty()).then(|| list.to_string())
}
