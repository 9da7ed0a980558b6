use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{HausError, HausResult};

/// Where frame bytes come from.
///
/// Implementations are called from loader worker threads, one call per frame, with no ordering
/// guarantee between calls.
pub trait FrameSource: Send + Sync {
    /// Fetch the encoded bytes for `locator` (as produced by [`crate::FrameNaming::locator`]).
    fn fetch(&self, locator: &str) -> HausResult<Vec<u8>>;
}

/// Reads frames from a directory that plays the role of the site's document root.
#[derive(Clone, Debug)]
pub struct DirFrameSource {
    root: PathBuf,
}

impl DirFrameSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for DirFrameSource {
    fn fetch(&self, locator: &str) -> HausResult<Vec<u8>> {
        let norm = normalize_locator(locator)?;
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path)
            .with_context(|| format!("read frame bytes from '{}'", path.display()))
            .map_err(HausError::from)
    }
}

/// In-memory frames keyed by normalized locator.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrameSource {
    frames: HashMap<String, Vec<u8>>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locator: &str, bytes: Vec<u8>) -> HausResult<()> {
        self.frames.insert(normalize_locator(locator)?, bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for MemoryFrameSource {
    fn fetch(&self, locator: &str) -> HausResult<Vec<u8>> {
        let norm = normalize_locator(locator)?;
        self.frames
            .get(&norm)
            .cloned()
            .ok_or_else(|| HausError::load(format!("no frame registered at '{norm}'")))
    }
}

/// Normalize a site locator into a root-relative path.
///
/// A single leading `/` addresses the document root, as in the URL paths the asset packs were
/// published under. Backslashes become `/`, `.` segments are dropped, and `..` is rejected.
pub fn normalize_locator(locator: &str) -> HausResult<String> {
    let s = locator.replace('\\', "/");
    let s = s.strip_prefix('/').unwrap_or(&s);
    if s.is_empty() {
        return Err(HausError::validation("frame locator must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(HausError::validation("frame locators must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(HausError::validation(
            "frame locator must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
