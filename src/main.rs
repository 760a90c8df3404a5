use std::path::PathBuf;

use anyhow::Context;
use clang_ast::Clang;
use clang_vim::config::{self, initialize_config, UserConfig};
use clang_vim::logging::{self, LOG_ENV};
use clang_vim::usecase::compile_commands;
use clang_vim::{ExtentKind, Jump, Queries};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    ///JSON configuration file, same keys as `vim_clang_configure`
    #[arg(short, long)]
    config: Option<PathBuf>,
    ///log filter directive, defaults to $LIBCLANG_VIM_LOG or "warn"
    #[arg(short, long)]
    log: Option<String>,
    #[command(subcommand)]
    command: Command,
}

/// Location arguments take the form `file[#unsaved]:args…:line:column`.
#[derive(Subcommand, Debug)]
enum Command {
    ///cursor information and canonical type at a location
    Info { location: String },
    ///extents of the node at a location and everything below it
    AllExtents { location: String },
    ///extent of the nearest enclosing node of a kind
    Extent {
        #[arg(value_enum)]
        kind: ExtentKind,
        location: String,
    },
    ///node related to the cursor at a location
    Jump {
        #[arg(value_enum)]
        jump: Jump,
        location: String,
    },
    ///type of the nearest variable declaration, with `auto` deduced
    DeduceVarDecl { location: String },
    ///return type of the nearest function, with `auto` deduced
    DeduceFuncReturn { location: String },
    ///type of the nearest function or variable declaration
    DeduceFuncOrVar { location: String },
    ///type of the expression at a location
    Type { location: String },
    ///declaration of the type at a location
    DeducedDeclaration { location: String },
    ///name of the function enclosing a location
    CurrentFunction { location: String },
    ///documentation comment of the entity at a location
    Comment { location: String },
    ///file included by the directive at a location
    Include { location: String },
    ///completion candidates at a location
    Complete { location: String },
    ///diagnostics of `file[#unsaved]:args…`
    Diagnostics { file: String },
    ///compiler flags from the nearest compile_commands.json
    CompileCommands { file: PathBuf },
    ///libclang version
    Version,
}

fn load_config(path: &PathBuf) -> anyhow::Result<UserConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    UserConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn run(queries: &Queries<Clang>, command: Command) -> String {
    match command {
        Command::Info { location } => queries.location_information(&location),
        Command::AllExtents { location } => queries.all_extents(&location),
        Command::Extent { kind, location } => queries.extent_of(kind, &location),
        Command::Jump { jump, location } => queries.related_node(jump, &location),
        Command::DeduceVarDecl { location } => queries.deduce_var_decl_type(&location),
        Command::DeduceFuncReturn { location } => queries.deduce_func_return_type(&location),
        Command::DeduceFuncOrVar { location } => queries.deduce_func_or_var_decl(&location),
        Command::Type { location } => queries.type_at(&location),
        Command::DeducedDeclaration { location } => queries.deduced_declaration(&location),
        Command::CurrentFunction { location } => queries.current_function(&location),
        Command::Comment { location } => queries.comment_at(&location),
        Command::Include { location } => queries.include_at(&location),
        Command::Complete { location } => queries.completion_at(&location),
        Command::Diagnostics { file } => queries.diagnostics(&file),
        Command::CompileCommands { file } => compile_commands(&file.to_string_lossy()),
        Command::Version => queries.version(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = args
        .log
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| "warn".to_string());
    logging::init(&filter);

    if let Some(path) = &args.config {
        initialize_config(load_config(path)?);
    }
    debug!(command = ?args.command, "running");

    let queries = Queries::new(Clang, config::current());
    println!("{}", run(&queries, args.command));
    Ok(())
}
