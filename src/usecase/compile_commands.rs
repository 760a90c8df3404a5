use std::path::Path;

use compile_db::CompilationDatabase;
use vimson::{Record, EMPTY_RECORD};

use super::finish;
use crate::error::QueryError;

/// Compiler flags recorded for `file` in the nearest
/// `compile_commands.json`, as `{'commands':…,'directory':…,}`. Flags are
/// joined into one shell-quoted line.
pub fn compile_commands(file: &str) -> String {
    finish("compile_commands", lookup(file), EMPTY_RECORD)
}

fn lookup(file: &str) -> Result<Option<String>, QueryError> {
    if file.is_empty() {
        return Err(QueryError::InvalidInput("empty file name"));
    }
    let path = Path::new(file);
    let db = CompilationDatabase::for_file(path)?;
    let Some(command) = db.get(path) else {
        return Ok(None);
    };
    let mut record = Record::new();
    record
        .str("commands", &command.compiler_flags_line())
        .str("directory", &command.directory.to_string_lossy());
    Ok(Some(record.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_commands() {
        let root = tempfile::tempdir().unwrap();
        let dir = canonical(root.path());
        let source = dir.join("main.cpp");
        std::fs::write(&source, "int main() {}").unwrap();
        std::fs::write(
            dir.join("compile_commands.json"),
            format!(
                r#"[{{"directory": {dir:?}, "file": "main.cpp",
                      "command": "clang++ -std=c++17 -DNAME='a b' -c main.cpp -o main.o"}}]"#,
                dir = dir.display().to_string()
            ),
        )
        .unwrap();

        let actual = compile_commands(&source.display().to_string());
        assert_eq!(
            actual,
            format!(
                "{{'commands':'-std=c++17 ''-DNAME=a b''','directory':'{}',}}",
                dir.display()
            )
        );
    }

    #[test]
    fn test_unknown_file_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let dir = canonical(root.path());
        std::fs::write(dir.join("compile_commands.json"), "[]").unwrap();
        assert_eq!(compile_commands(&dir.join("other.cpp").display().to_string()), "{}");
        assert_eq!(compile_commands(""), "{}");
    }

    #[test]
    fn test_lookup_errors() {
        assert!(matches!(lookup(""), Err(QueryError::InvalidInput(_))));
        let root = tempfile::tempdir().unwrap();
        let dir = canonical(root.path());
        std::fs::write(dir.join("compile_commands.json"), "{not json").unwrap();
        assert!(matches!(
            lookup(&dir.join("main.cpp").display().to_string()),
            Err(QueryError::CompileDb(_))
        ));
        assert_eq!(compile_commands(&dir.join("main.cpp").display().to_string()), "{}");
    }

    fn canonical(path: &Path) -> std::path::PathBuf {
        std::fs::canonicalize(path).unwrap()
    }
}
