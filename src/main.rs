#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # introspect
//!
//! Runs type, method, and constructor queries against a directory of Java
//! sources and prints what matched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use introspect::{
    ConstructorQuery,
    MethodQuery,
    SymbolTable,
    TypeQuery,
    TypeRef,
    java::Project,
};
use tabled::{Table, Tabled, settings::Style};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Arguments of the `classes` subcommand.
#[derive(Debug, Clone)]
struct ClassArgs {
    /// Package to search
    package:    String,
    /// Skip subpackages
    exact:      bool,
    /// Exact simple name
    name:       Option<String>,
    /// Substrings the simple name must contain
    contains:   Vec<String>,
    /// Required supertype
    subtype_of: Option<String>,
    /// Require exactly one match
    unique:     bool,
    /// Source root
    root:       PathBuf,
}

/// Arguments of the `methods` subcommand.
#[derive(Debug, Clone)]
struct MethodArgs {
    /// Owning type
    owner:    String,
    /// Return type
    returns:  Option<String>,
    /// Methods returning void
    void:     bool,
    /// Exact method name
    name:     Option<String>,
    /// Substrings the method name must contain
    contains: Vec<String>,
    /// Argument types, in any order
    args:     Vec<String>,
    /// Require exactly one match
    unique:   bool,
    /// Source root
    root:     PathBuf,
}

/// Arguments of the `constructors` subcommand.
#[derive(Debug, Clone)]
struct ConstructorArgs {
    /// Owning class
    owner:   String,
    /// Argument types, in any order
    args:    Vec<String>,
    /// Only the no-arg constructor
    no_args: bool,
    /// Require exactly one match
    unique:  bool,
    /// Source root
    root:    PathBuf,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Find types in a package
    Classes(ClassArgs),
    /// Find methods of a type
    Methods(MethodArgs),
    /// Find public constructors of a class
    Constructors(ConstructorArgs),
    /// Print the symbol table as JSON
    Dump(PathBuf),
}

/// One matched item.
#[derive(Tabled)]
struct Row {
    /// Where it was found
    #[tabled(rename = "Owner")]
    owner: String,
    /// What was found
    #[tabled(rename = "Match")]
    found: String,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the source root
    fn root() -> impl Parser<PathBuf> {
        positional::<PathBuf>("ROOT").help("Directory containing Java sources")
    }

    /// parses the uniqueness switch
    fn unique() -> impl Parser<bool> {
        long("unique")
            .short('u')
            .help("Fail unless exactly one item matches")
            .switch()
    }

    /// parses name substrings
    fn contains() -> impl Parser<Vec<String>> {
        long("contains")
            .help("Substring the name must contain, repeatable")
            .argument::<String>("TEXT")
            .many()
    }

    /// parses argument types
    fn args() -> impl Parser<Vec<String>> {
        long("arg")
            .help("Argument type, repeatable, matched in any order; simple names are qualified")
            .argument::<String>("TYPE")
            .many()
    }

    /// parses the owning type
    fn owner() -> impl Parser<String> {
        long("type")
            .short('t')
            .help("Qualified or simple name of the owning type")
            .argument::<String>("TYPE")
    }

    let classes = {
        let package = long("package")
            .short('p')
            .help("Package to search")
            .argument::<String>("PACKAGE");
        let exact = long("exact")
            .help("Do not descend into subpackages")
            .switch();
        let name = long("name")
            .short('n')
            .help("Exact simple name")
            .argument::<String>("NAME")
            .optional();
        let contains = contains();
        let subtype_of = long("subtype-of")
            .help("Only types assignable to this type")
            .argument::<String>("TYPE")
            .optional();
        let unique = unique();
        let root = root();
        construct!(ClassArgs {
            package,
            exact,
            name,
            contains,
            subtype_of,
            unique,
            root
        })
    }
    .to_options()
    .command("classes")
    .help("Find types in a package")
    .map(Cmd::Classes);

    let methods = {
        let owner = owner();
        let returns = long("returns")
            .short('r')
            .help("Return type; simple names are qualified")
            .argument::<String>("TYPE")
            .optional();
        let void = long("void").help("Only methods returning void").switch();
        let name = long("name")
            .short('n')
            .help("Exact method name")
            .argument::<String>("NAME")
            .optional();
        let contains = contains();
        let args = args();
        let unique = unique();
        let root = root();
        construct!(MethodArgs {
            owner,
            returns,
            void,
            name,
            contains,
            args,
            unique,
            root
        })
    }
    .to_options()
    .command("methods")
    .help("Find methods of a type")
    .map(Cmd::Methods);

    let constructors = {
        let owner = owner();
        let args = args();
        let no_args = long("no-args")
            .help("Only the no-arg constructor")
            .switch();
        let unique = unique();
        let root = root();
        construct!(ConstructorArgs {
            owner,
            args,
            no_args,
            unique,
            root
        })
    }
    .to_options()
    .command("constructors")
    .help("Find public constructors of a class")
    .map(Cmd::Constructors);

    let dump = root()
        .to_options()
        .command("dump")
        .help("Prints a JSON description of every type found")
        .map(Cmd::Dump);

    let cmd = construct!([classes, methods, constructors, dump]);

    cmd.to_options()
        .descr("Structural queries over Java sources")
        .run()
}

/// Looks a type up by qualified name, then by unique simple name.
fn lookup_type(table: &SymbolTable, name: &str) -> Result<TypeRef> {
    if let Some(ty) = table.get(name) {
        return Ok(ty);
    }
    let mut candidates = table.find_by_simple_name(name);
    match candidates.len() {
        0 => bail!("No type named `{name}` was found"),
        1 => Ok(candidates.remove(0)),
        _ => bail!(
            "`{name}` is ambiguous: {}",
            candidates
                .iter()
                .map(|t| t.qualified_name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Prints matched rows as a table.
fn show(rows: Vec<Row>) {
    if rows.is_empty() {
        println!("{}", "Nothing matched.".yellow());
    } else {
        println!("{}", Table::new(rows).with(Style::modern()));
    }
}

/// Runs a type query.
fn classes(table: &SymbolTable, args: ClassArgs) -> Result<Vec<Row>> {
    let mut query = if args.exact {
        TypeQuery::in_exact_package(&args.package)?
    } else {
        TypeQuery::in_containing_package(&args.package)?
    };
    if let Some(name) = &args.name {
        query = query.with_exact_simple_name(name)?;
    }
    for substring in &args.contains {
        query = query.with_simple_name_containing(substring)?;
    }
    if let Some(supertype) = args.subtype_of {
        query = query.with_sub_type_of(table.qualify(supertype))?;
    }

    let found = if args.unique {
        vec![query.find_class(table)?]
    } else {
        query.find_classes(table)
    };
    Ok(found
        .into_iter()
        .map(|t| Row {
            owner: t.package().to_string(),
            found: t.to_string(),
        })
        .collect())
}

/// Runs a method query.
fn methods(table: &SymbolTable, args: MethodArgs) -> Result<Vec<Row>> {
    let owner = lookup_type(table, &args.owner)?;
    let mut query = MethodQuery::in_type(&owner);
    if args.void {
        query = query.with_void_return_type()?;
    }
    if let Some(returns) = args.returns {
        query = query.with_return_type(table.qualify(returns))?;
    }
    if let Some(name) = &args.name {
        query = query.with_exact_name(name)?;
    }
    for substring in &args.contains {
        query = query.with_name_containing(substring)?;
    }
    if !args.args.is_empty() {
        let arg_types = args.args.iter().map(|arg| table.qualify(arg.as_str()));
        query = query.with_exact_arg_types(arg_types)?;
    }

    let found = if args.unique {
        vec![query.find_method()?]
    } else {
        query.find_methods()
    };
    Ok(found
        .into_iter()
        .map(|m| Row {
            owner: owner.qualified_name(),
            found: m.to_string(),
        })
        .collect())
}

/// Runs a constructor query.
fn constructors(table: &SymbolTable, args: ConstructorArgs) -> Result<Vec<Row>> {
    let owner = lookup_type(table, &args.owner)?;
    let mut query = ConstructorQuery::in_class(&owner);
    if args.no_args {
        query = query.with_no_args()?;
    } else if !args.args.is_empty() {
        let arg_types = args.args.iter().map(|arg| table.qualify(arg.as_str()));
        query = query.with_exact_arg_types(arg_types)?;
    }

    let found = if args.unique {
        vec![query.find_constructor()?]
    } else {
        query.find_constructors()
    };
    Ok(found
        .into_iter()
        .map(|c| Row {
            owner: owner.qualified_name(),
            found: c.to_string(),
        })
        .collect())
}

/// Scans `root` into a symbol table.
async fn load(root: &Path) -> Result<SymbolTable> {
    let project = Project::scan(root)
        .await
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    Ok(project.into_symbol_table())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let outcome = match options() {
        Cmd::Classes(args) => {
            let table = load(&args.root).await?;
            classes(&table, args)
        }
        Cmd::Methods(args) => {
            let table = load(&args.root).await?;
            methods(&table, args)
        }
        Cmd::Constructors(args) => {
            let table = load(&args.root).await?;
            constructors(&table, args)
        }
        Cmd::Dump(root) => {
            let table = load(&root).await?;
            println!("{}", table.to_json()?);
            return Ok(());
        }
    };

    match outcome {
        Ok(rows) => show(rows),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            std::process::exit(1);
        }
    }

    Ok(())
}
