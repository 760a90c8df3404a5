//! Loading and indexing `compile_commands.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::error::CompileDbError;
use crate::shell;

pub const DATABASE_FILE: &str = "compile_commands.json";

/// One entry as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawEntry {
    directory: String,
    file: String,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    arguments: Option<Vec<String>>,
    #[serde(default)]
    output: Option<String>,
}

/// How one translation unit is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// Working directory of the compiler invocation
    pub directory: PathBuf,
    /// Normalized absolute path of the source file
    pub file: PathBuf,
    /// Full argument vector, compiler executable first
    pub arguments: Vec<String>,
    pub output: Option<String>,
    /// `file` exactly as written in the database
    file_arg: String,
}

impl CompileCommand {
    fn from_raw(raw: RawEntry) -> Result<Self, CompileDbError> {
        let arguments = match (raw.arguments, raw.command) {
            (Some(arguments), _) => arguments,
            (None, Some(command)) => shell::split(&command)?,
            (None, None) => return Err(CompileDbError::MissingCommand(raw.file)),
        };
        let directory = PathBuf::from(&raw.directory);
        Ok(Self {
            file: normalize(&directory, Path::new(&raw.file)),
            directory,
            arguments,
            output: raw.output,
            file_arg: raw.file,
        })
    }

    /// Whether `value`, glued to `-o`, names the output. Without a recorded
    /// output only object files qualify.
    fn is_output(&self, value: &str) -> bool {
        match &self.output {
            Some(output) => value == output,
            None => Path::new(value)
                .extension()
                .is_some_and(|ext| ext == "o" || ext == "obj"),
        }
    }

    fn is_input(&self, arg: &str) -> bool {
        arg == self.file_arg || normalize(&self.directory, Path::new(arg)) == self.file
    }

    /// The arguments a front-end needs to re-parse the file: the compiler
    /// executable, `-c`, the output option and the input file are removed.
    pub fn compiler_flags(&self) -> Vec<String> {
        let mut flags = Vec::with_capacity(self.arguments.len());
        let mut args = self.arguments.iter().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" => {}
                "-o" => {
                    args.next();
                }
                a if a.strip_prefix("-o").is_some_and(|out| self.is_output(out)) => {}
                a if self.is_input(a) => {}
                _ => flags.push(arg.clone()),
            }
        }
        flags
    }

    /// [`compiler_flags`](Self::compiler_flags) as one shell-quoted line.
    pub fn compiler_flags_line(&self) -> String {
        shell::join(&self.compiler_flags())
    }
}

/// Absolute, and canonical when the path exists.
fn normalize(directory: &Path, file: &Path) -> PathBuf {
    let joined = if file.is_absolute() {
        file.to_path_buf()
    } else {
        directory.join(file)
    };
    dunce::canonicalize(&joined).unwrap_or(joined)
}

/// A parsed compilation database indexed by source file.
#[derive(Debug)]
pub struct CompilationDatabase {
    path: PathBuf,
    commands: Vec<CompileCommand>,
    /// normalized file path -> position in `commands`
    index: HashMap<PathBuf, usize>,
}

impl CompilationDatabase {
    /// Find `compile_commands.json` in `start` (or its directory when it is a
    /// file) or the nearest parent.
    pub fn locate(start: &Path) -> Result<PathBuf, CompileDbError> {
        let dir = if start.is_dir() {
            start
        } else {
            start.parent().unwrap_or(start)
        };
        dir.ancestors()
            .map(|d| d.join(DATABASE_FILE))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| CompileDbError::NotFound(start.to_path_buf()))
    }

    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, CompileDbError> {
        let text = std::fs::read_to_string(path).map_err(|source| CompileDbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Locate and load the database responsible for `file`.
    pub fn for_file(file: &Path) -> Result<Self, CompileDbError> {
        let path = Self::locate(file)?;
        debug!(?path, "using compilation database");
        Self::load(&path)
    }

    /// Parse database text; `path` is used for error reporting.
    ///
    /// Entries without a usable command are skipped with a warning. When a
    /// file appears more than once the first entry wins.
    pub fn from_json(path: &Path, text: &str) -> Result<Self, CompileDbError> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(text).map_err(|source| CompileDbError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let mut commands = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        for entry in raw {
            match CompileCommand::from_raw(entry) {
                Ok(command) => {
                    trace!(file = ?command.file, "indexed compile command");
                    index.entry(command.file.clone()).or_insert(commands.len());
                    commands.push(command);
                }
                Err(e) => warn!("skipping compilation database entry: {}", e),
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            commands,
            index,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commands(&self) -> &[CompileCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The command compiling `file`; relative paths are taken relative to
    /// the database's directory.
    pub fn get(&self, file: &Path) -> Option<&CompileCommand> {
        let base = self.path.parent().unwrap_or(Path::new(""));
        self.index
            .get(&normalize(base, file))
            .map(|&i| &self.commands[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_db(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join(DATABASE_FILE);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_compiler_flags_from_command() {
        let db = CompilationDatabase::from_json(
            Path::new("compile_commands.json"),
            r#"[{"directory": "/work", "file": "src/a.cpp",
                 "command": "/usr/bin/clang++ -std=c++17 -I include -c -o build/a.o src/a.cpp"}]"#,
        )
        .unwrap();
        let command = db.get(Path::new("/work/src/a.cpp")).unwrap();
        assert_eq!(command.compiler_flags(), vec!["-std=c++17", "-I", "include"]);
        assert_eq!(command.directory, PathBuf::from("/work"));
    }

    #[test]
    fn test_compiler_flags_from_arguments() {
        let db = CompilationDatabase::from_json(
            Path::new("compile_commands.json"),
            r#"[{"directory": "/work", "file": "/work/b.c",
                 "arguments": ["cc", "-Wall", "-obuild/b.o", "-c", "/work/b.c"],
                 "output": "build/b.o"}]"#,
        )
        .unwrap();
        let command = db.get(Path::new("/work/b.c")).unwrap();
        assert_eq!(command.compiler_flags(), vec!["-Wall"]);
        assert_eq!(command.output.as_deref(), Some("build/b.o"));
    }

    #[test]
    fn test_flags_starting_with_o_are_kept() {
        let db = CompilationDatabase::from_json(
            Path::new("compile_commands.json"),
            r#"[{"directory": "/work", "file": "/work/c.m",
                 "arguments": ["clang", "-objcmt-migrate-literals", "-oc.o", "-c", "/work/c.m"],
                 "output": "c.o"},
                {"directory": "/work", "file": "/work/d.c",
                 "command": "cc -objc-arc -od.o -DNAME='a b' d.c"}]"#,
        )
        .unwrap();
        let with_output = db.get(Path::new("/work/c.m")).unwrap();
        assert_eq!(with_output.compiler_flags(), vec!["-objcmt-migrate-literals"]);

        let without_output = db.get(Path::new("/work/d.c")).unwrap();
        assert_eq!(without_output.compiler_flags(), vec!["-objc-arc", "-DNAME=a b"]);
        assert_eq!(without_output.compiler_flags_line(), "-objc-arc '-DNAME=a b'");
    }

    #[test]
    fn test_entry_without_command_is_skipped() {
        let db = CompilationDatabase::from_json(
            Path::new("compile_commands.json"),
            r#"[{"directory": "/w", "file": "x.c"},
                {"directory": "/w", "file": "y.c", "command": "cc y.c"}]"#,
        )
        .unwrap();
        assert_eq!(db.len(), 1);
        assert!(db.get(Path::new("/w/x.c")).is_none());
        assert!(db.get(Path::new("/w/y.c")).is_some());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let db = CompilationDatabase::from_json(
            Path::new("compile_commands.json"),
            r#"[{"directory": "/w", "file": "x.c", "command": "cc -DFIRST x.c"},
                {"directory": "/w", "file": "x.c", "command": "cc -DSECOND x.c"}]"#,
        )
        .unwrap();
        let command = db.get(Path::new("/w/x.c")).unwrap();
        assert_eq!(command.compiler_flags(), vec!["-DFIRST"]);
    }

    #[test]
    fn test_malformed_json() {
        let err = CompilationDatabase::from_json(Path::new("db.json"), "{not json").unwrap_err();
        assert!(matches!(err, CompileDbError::Json { .. }));
    }

    #[test]
    fn test_locate_walks_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        let db_path = write_db(root.path(), "[]");
        let source = nested.join("main.cpp");
        std::fs::write(&source, "int main() {}").unwrap();

        assert_eq!(CompilationDatabase::locate(&source).unwrap(), db_path);
        assert_eq!(CompilationDatabase::locate(&nested).unwrap(), db_path);
    }

    #[test]
    fn test_for_file_with_relative_entry() {
        let root = tempfile::tempdir().unwrap();
        let dir = dunce::canonicalize(root.path()).unwrap();
        std::fs::write(dir.join("main.cpp"), "int main() {}").unwrap();
        let body = format!(
            r#"[{{"directory": {:?}, "file": "main.cpp", "command": "clang++ -DX=1 -c main.cpp"}}]"#,
            dir.display().to_string()
        );
        write_db(&dir, &body);

        let db = CompilationDatabase::for_file(&dir.join("main.cpp")).unwrap();
        let command = db.get(&dir.join("main.cpp")).unwrap();
        assert_eq!(command.compiler_flags(), vec!["-DX=1"]);
        assert_eq!(command.file, dir.join("main.cpp"));
    }

    #[test]
    fn test_locate_not_found() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("lonely.c");
        // Any database in a parent of the temp dir would be found; only assert
        // the error shape when none is.
        if let Err(e) = CompilationDatabase::locate(&source) {
            assert!(matches!(e, CompileDbError::NotFound(_)));
        }
    }
}
