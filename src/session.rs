//! Opening a parse for one query.
//!
//! A [`Session`] owns the parsed unit, and with it the index, for exactly the
//! duration of one query. Both are released when the session drops, on every
//! path out of the query.

use clang_ast::{Ast, FrontEnd, ParseOptions, ParseRequest, UnsavedFile};
use tracing::debug;

use crate::config::Config;
use crate::error::QueryError;
use crate::location::{FileRequest, LocationRequest};

/// Build the front-end request for `target`, reading the unsaved buffer if
/// one is named. The buffer is registered under the logical file name.
fn parse_request(
    target: &FileRequest,
    config: &Config,
    mut options: ParseOptions,
) -> Result<ParseRequest, QueryError> {
    let unsaved = match &target.unsaved {
        Some(path) => {
            let contents =
                std::fs::read_to_string(path).map_err(|source| QueryError::UnsavedBuffer {
                    path: path.clone(),
                    source,
                })?;
            Some(UnsavedFile {
                filename: target.file.clone(),
                contents,
            })
        }
        None => None,
    };
    options.detailed_preprocessing_record |= config.detailed_preprocessing_record;

    let mut args = target.args.clone();
    args.extend(config.extra_args.iter().cloned());
    Ok(ParseRequest {
        file: target.file.clone(),
        args,
        unsaved,
        options,
    })
}

/// Parse the file named by `target`.
#[tracing::instrument(level = "debug", skip(front, config), fields(file = %target.file))]
pub fn parse_file<F: FrontEnd>(
    front: &F,
    target: &FileRequest,
    config: &Config,
    options: ParseOptions,
) -> Result<F::Unit, QueryError> {
    let request = parse_request(target, config, options)?;
    let unit = front.parse(&request)?;
    Ok(unit)
}

/// A parsed unit and the cursor at the requested position.
pub struct Session<U: Ast> {
    unit: U,
    cursor: U::Cursor,
}

impl<U: Ast> Session<U> {
    /// Parse `request.target` and resolve the cursor at its position.
    ///
    /// The cursor may be null when nothing sits at the position.
    pub fn open<F>(
        front: &F,
        request: &LocationRequest,
        config: &Config,
        options: ParseOptions,
    ) -> Result<Self, QueryError>
    where
        F: FrontEnd<Unit = U>,
    {
        let unit = parse_file(front, &request.target, config, options)?;
        let cursor = unit.cursor_at(request.line, request.column);
        debug!(
            line = request.line,
            column = request.column,
            kind = %unit.kind_spelling(cursor),
            "resolved cursor"
        );
        Ok(Self { unit, cursor })
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn cursor(&self) -> U::Cursor {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clang_ast::{MemoryAst, MemoryFrontEnd};
    use parking_lot::Mutex;

    use super::*;

    fn recording_front_end() -> (MemoryFrontEnd, Arc<Mutex<Vec<ParseRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let front = MemoryFrontEnd::new(move |request| {
            log.lock().push(request.clone());
            Some(MemoryAst::builder(request.file.clone()).build())
        });
        (front, seen)
    }

    #[test]
    fn test_extra_args_follow_request_args() {
        let (front, seen) = recording_front_end();
        let config = Config {
            extra_args: vec!["-DEXTRA".to_string()],
            ..Config::default()
        };
        let request: LocationRequest = "a.cpp:-std=c++17:1:1".parse().unwrap();
        Session::open(&front, &request, &config, ParseOptions::default()).unwrap();

        let seen = seen.lock();
        assert_eq!(seen[0].args, vec!["-std=c++17", "-DEXTRA"]);
        assert!(seen[0].options.incomplete);
        assert!(!seen[0].options.detailed_preprocessing_record);
    }

    #[test]
    fn test_unsaved_buffer_registered_under_logical_name() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = dir.path().join("buffer.cpp");
        std::fs::write(&buffer, "int main() { return 0; }\n").unwrap();

        let (front, seen) = recording_front_end();
        let request: LocationRequest = format!("src/main.cpp#{}:1:5", buffer.display())
            .parse()
            .unwrap();
        let session = Session::open(&front, &request, &Config::default(), ParseOptions::default())
            .unwrap();
        assert_eq!(session.unit().main_file(), "src/main.cpp");

        let seen = seen.lock();
        let unsaved = seen[0].unsaved.as_ref().unwrap();
        assert_eq!(unsaved.filename, "src/main.cpp");
        assert_eq!(unsaved.contents, "int main() { return 0; }\n");
    }

    #[test]
    fn test_missing_unsaved_buffer() {
        let (front, seen) = recording_front_end();
        let request: LocationRequest = "a.cpp#/nonexistent/buffer.cpp:1:1".parse().unwrap();
        let result = Session::open(&front, &request, &Config::default(), ParseOptions::default());
        assert!(matches!(result, Err(QueryError::UnsavedBuffer { .. })));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_detailed_record_from_config() {
        let (front, seen) = recording_front_end();
        let config = Config {
            detailed_preprocessing_record: true,
            ..Config::default()
        };
        let target: FileRequest = "a.cpp".parse().unwrap();
        parse_file(&front, &target, &config, ParseOptions::default()).unwrap();
        assert!(seen.lock()[0].options.detailed_preprocessing_record);
    }

    #[test]
    fn test_session_releases_handles_on_drop() {
        let (front, _) = recording_front_end();
        let counters = front.counters();
        let request: LocationRequest = "a.cpp:1:1".parse().unwrap();
        {
            let _session =
                Session::open(&front, &request, &Config::default(), ParseOptions::default())
                    .unwrap();
            assert_eq!(counters.live_units(), 1);
            assert_eq!(counters.live_indexes(), 1);
        }
        assert_eq!(counters.live_units(), 0);
        assert_eq!(counters.live_indexes(), 0);
    }
}
