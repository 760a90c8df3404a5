//! Decoding of the `file[#unsaved]:args…:line:column` strings the editor
//! sends with every query.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const UNSAVED_SEPARATOR: char = '#';
const FIELD_SEPARATOR: char = ':';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("no file name in request '{0}'")]
    MissingFile(String),

    #[error("request '{0}' does not end with line and column")]
    MissingPosition(String),

    #[error("{field} '{value}' is not a non-negative integer")]
    InvalidNumber { field: &'static str, value: String },
}

/// The file part of a request: which file to parse, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    /// Logical file name, used when reporting locations
    pub file: String,
    /// File holding the editor's buffer content for `file`
    pub unsaved: Option<PathBuf>,
    /// Compiler arguments, in order
    pub args: Vec<String>,
}

impl FromStr for FileRequest {
    type Err = LocationError;

    /// Parse `file[#unsaved]:arg1:…:argN`. Empty arguments are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(FIELD_SEPARATOR);
        let head = fields.next().unwrap_or_default();
        let (file, unsaved) = match head.split_once(UNSAVED_SEPARATOR) {
            Some((file, unsaved)) => (file, (!unsaved.is_empty()).then(|| PathBuf::from(unsaved))),
            None => (head, None),
        };
        if file.is_empty() {
            return Err(LocationError::MissingFile(s.to_string()));
        }
        Ok(Self {
            file: file.to_string(),
            unsaved,
            args: fields
                .filter(|arg| !arg.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// A position query: the file request plus a 1-based line and column.
///
/// `0` is accepted for either and simply resolves to no cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRequest {
    pub target: FileRequest,
    pub line: u32,
    pub column: u32,
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, LocationError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LocationError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    value.parse().map_err(|_| LocationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl FromStr for LocationRequest {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.rsplitn(3, FIELD_SEPARATOR);
        let (Some(column), Some(line), Some(rest)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(LocationError::MissingPosition(s.to_string()));
        };
        Ok(Self {
            line: parse_number("line", line)?,
            column: parse_number("column", column)?,
            target: rest.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let request: LocationRequest = "qa/data/all-extents.cpp:-std=c++1y:-Iinclude:3:1"
            .parse()
            .unwrap();
        assert_eq!(request.target.file, "qa/data/all-extents.cpp");
        assert_eq!(request.target.unsaved, None);
        assert_eq!(request.target.args, vec!["-std=c++1y", "-Iinclude"]);
        assert_eq!((request.line, request.column), (3, 1));
    }

    #[test]
    fn test_parse_location_without_args() {
        let request: LocationRequest = "main.cpp:10:9".parse().unwrap();
        assert_eq!(request.target.file, "main.cpp");
        assert!(request.target.args.is_empty());
        assert_eq!((request.line, request.column), (10, 9));
    }

    #[test]
    fn test_parse_unsaved_override() {
        let request: LocationRequest = "current-function.cpp#../current-function.cpp:-std=c++1y:11:7"
            .parse()
            .unwrap();
        assert_eq!(request.target.file, "current-function.cpp");
        assert_eq!(
            request.target.unsaved,
            Some(PathBuf::from("../current-function.cpp"))
        );
        assert_eq!(request.target.args, vec!["-std=c++1y"]);
    }

    #[test]
    fn test_empty_args_are_dropped() {
        let request: LocationRequest = "a.c::-Wall::2:3".parse().unwrap();
        assert_eq!(request.target.args, vec!["-Wall"]);
    }

    #[test]
    fn test_zero_position_is_accepted() {
        let request: LocationRequest = "a.c:0:0".parse().unwrap();
        assert_eq!((request.line, request.column), (0, 0));
    }

    #[test]
    fn test_malformed_locations() {
        assert_eq!(
            "a.c".parse::<LocationRequest>(),
            Err(LocationError::MissingPosition("a.c".to_string()))
        );
        assert_eq!(
            "a.c:3".parse::<LocationRequest>(),
            Err(LocationError::MissingPosition("a.c:3".to_string()))
        );
        assert!(matches!(
            "a.c:x:1".parse::<LocationRequest>(),
            Err(LocationError::InvalidNumber { field: "line", .. })
        ));
        assert!(matches!(
            "a.c:1:-2".parse::<LocationRequest>(),
            Err(LocationError::InvalidNumber { field: "column", .. })
        ));
        assert!(matches!(
            "a.c:1:+2".parse::<LocationRequest>(),
            Err(LocationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            ":1:2".parse::<LocationRequest>(),
            Err(LocationError::MissingFile(_))
        ));
    }

    #[test]
    fn test_parse_file_request() {
        let request: FileRequest = "src/a.cpp#/tmp/buf:-std=c++17".parse().unwrap();
        assert_eq!(request.file, "src/a.cpp");
        assert_eq!(request.unsaved, Some(PathBuf::from("/tmp/buf")));
        assert_eq!(request.args, vec!["-std=c++17"]);
    }
}
