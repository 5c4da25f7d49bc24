// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ParseOutcome, Tree, parse_str};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum LoadError {
    SourceUnreadable { path: PathBuf, source: io::Error },
    EmptyTree { path: PathBuf },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnreadable { path, source } => {
                write!(f, "cannot read outline {}: {source}", path.display())
            }
            Self::EmptyTree { path } => write!(
                f,
                "outline {} has no categories; nothing to browse",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnreadable { source, .. } => Some(source),
            Self::EmptyTree { .. } => None,
        }
    }
}

/// Reads and parses an outline file. Invalid UTF-8 is replaced rather than
/// rejected; only a missing or unreadable file is an error.
pub fn load_outline(path: &Path) -> Result<ParseOutcome, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_str(&text))
}

/// Rejects a tree with nothing in it, for callers that need something to show.
pub fn require_categories(tree: Tree, path: &Path) -> Result<Tree, LoadError> {
    if tree.is_empty() {
        return Err(LoadError::EmptyTree {
            path: path.to_path_buf(),
        });
    }
    Ok(tree)
}
