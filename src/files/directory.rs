use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Root directory for the `/files/*` routes.
///
/// Cloning is cheap; every connection task holds its own handle.
#[derive(Debug, Clone)]
pub struct ServedDirectory {
    root: Arc<Path>,
}

impl ServedDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::from(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `name` onto the root.
    ///
    /// Returns `None` unless every component of `name` is a plain file or
    /// directory name, so `..`, absolute paths and `.` can never reach
    /// outside the root.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);

        let mut components = relative.components().peekable();
        components.peek()?;

        if !components.all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        Some(self.root.join(relative))
    }
}
