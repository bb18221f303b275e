use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use futures::{future::join_all, stream::FuturesUnordered};
use tokio::{runtime::Runtime, task::block_in_place};
use tracing::{info, warn};

use super::{file::File, resolve::NameResolver};
use crate::{
    config,
    descriptor::{TypeDescriptor, TypeRef},
    source::{SymbolTable, TypeSource},
    types::TypeName,
    util::find_files,
};

#[derive(Debug, Clone, Default)]
/// A tree of Java sources, parsed into a symbol table.
pub struct Project {
    /// Directory the scan started from.
    root:  PathBuf,
    /// Successfully read java files, in path order.
    files: Vec<File>,
    /// Every declared type with qualified type references.
    table: SymbolTable,
}

impl Project {
    /// Discovers and parses every `.java` file under `root`, up to the
    /// configured depth. Files are parsed concurrently on blocking threads.
    ///
    /// Unreadable files are skipped with a warning; files with syntax errors
    /// contribute whatever declarations could be recovered.
    pub async fn scan(root: &Path) -> Result<Self> {
        let found = find_files("java", config::scan_depth(), root)
            .with_context(|| format!("Could not find java files under {}", root.display()))?;

        let handles = FuturesUnordered::new();
        for path in found {
            handles.push(tokio::task::spawn_blocking(move || {
                let result = File::new(path.clone());
                (path, result)
            }));
        }

        let mut files = Vec::new();
        for joined in join_all(handles).await {
            let (path, result) = joined.context("Java parsing task panicked")?;
            match result {
                Ok(file) => {
                    if file.has_errors() {
                        warn!(path = %path.display(), "syntax errors, declarations may be incomplete");
                    }
                    files.push(file);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }

        let project = Self::from_files(root.to_path_buf(), files);
        info!(
            root = %root.display(),
            files = project.files.len(),
            types = project.table.len(),
            "scanned java sources"
        );
        Ok(project)
    }

    /// Like [`Project::scan`], for synchronous callers. Reuses the ambient
    /// Tokio runtime when there is one.
    pub fn scan_blocking(root: &Path) -> Result<Self> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => block_in_place(move || handle.block_on(Self::scan(root))),
            Err(_) => Runtime::new()
                .context("Failed to create Tokio runtime for java scan")?
                .block_on(Self::scan(root)),
        }
    }

    /// Builds a project from already parsed files, qualifying every type
    /// reference against the whole set.
    pub fn from_files(root: PathBuf, mut files: Vec<File>) -> Self {
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let known: HashSet<String> = files
            .iter()
            .flat_map(File::types)
            .map(TypeDescriptor::qualified_name)
            .collect();

        let mut table = SymbolTable::new();
        for file in &files {
            let local = file.local_names();
            let resolver =
                NameResolver::new(file.package().unwrap_or_default(), file.imports(), &local, &known);
            for ty in file.types() {
                table.insert(ty.clone().qualify_with(|name| resolver.qualify(name)));
            }
        }

        Self { root, files, table }
    }

    /// Directory the scan started from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed files.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// The qualified symbol table.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Consumes the project, keeping only its symbol table.
    pub fn into_symbol_table(self) -> SymbolTable {
        self.table
    }
}

impl TypeSource for Project {
    fn types_under(&self, package: &str) -> Vec<TypeRef> {
        self.table.types_under(package)
    }

    fn resolve(&self, name: &TypeName) -> Option<TypeRef> {
        self.table.resolve(name)
    }
}
