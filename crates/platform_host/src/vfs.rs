//! Virtual filesystem contract used by feature windows for uploads.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`VfsService`].
pub type VfsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Virtual filesystem service.
pub trait VfsService {
    /// Writes `bytes` to `path`, returning the stored path.
    fn write_file<'a>(&'a self, path: &'a str, bytes: &'a [u8]) -> VfsFuture<'a, Result<String, String>>;

    /// Reads the file at `path`.
    fn read_file<'a>(&'a self, path: &'a str) -> VfsFuture<'a, Result<Vec<u8>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Filesystem that rejects every operation.
pub struct NoopVfs;

impl VfsService for NoopVfs {
    fn write_file<'a>(&'a self, _path: &'a str, _bytes: &'a [u8]) -> VfsFuture<'a, Result<String, String>> {
        Box::pin(async { Err("virtual filesystem unavailable".to_string()) })
    }

    fn read_file<'a>(&'a self, _path: &'a str) -> VfsFuture<'a, Result<Vec<u8>, String>> {
        Box::pin(async { Err("virtual filesystem unavailable".to_string()) })
    }
}

#[derive(Debug, Default)]
struct MemoryVfsState {
    files: BTreeMap<String, Vec<u8>>,
    read_only: bool,
}

/// In-memory filesystem. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryVfs {
    inner: Rc<RefCell<MemoryVfsState>>,
}

impl MemoryVfs {
    /// Makes subsequent writes fail.
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.borrow_mut().read_only = read_only;
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<String> {
        self.inner.borrow().files.keys().cloned().collect()
    }
}

fn normalize_path(path: &str) -> Result<String, String> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    if segments.is_empty() {
        return Err("path is empty".to_string());
    }
    if segments.contains(&"..") {
        return Err(format!("path `{path}` escapes the filesystem root"));
    }
    Ok(format!("/{}", segments.join("/")))
}

impl VfsService for MemoryVfs {
    fn write_file<'a>(&'a self, path: &'a str, bytes: &'a [u8]) -> VfsFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let path = normalize_path(path)?;
            let mut state = self.inner.borrow_mut();
            if state.read_only {
                return Err(format!("cannot write `{path}`: filesystem is read-only"));
            }
            state.files.insert(path.clone(), bytes.to_vec());
            Ok(path)
        })
    }

    fn read_file<'a>(&'a self, path: &'a str) -> VfsFuture<'a, Result<Vec<u8>, String>> {
        Box::pin(async move {
            let path = normalize_path(path)?;
            self.inner
                .borrow()
                .files
                .get(&path)
                .cloned()
                .ok_or_else(|| format!("`{path}` not found"))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn writes_normalize_paths() {
        let vfs = MemoryVfs::default();
        let stored = block_on(vfs.write_file("photos//./capture-1.png", b"png")).expect("write");
        assert_eq!(stored, "/photos/capture-1.png");
        assert_eq!(block_on(vfs.read_file("/photos/capture-1.png")).expect("read"), b"png");
    }

    #[test]
    fn read_only_and_escaping_paths_fail() {
        let vfs = MemoryVfs::default();
        assert!(block_on(vfs.write_file("../etc/passwd", b"x")).is_err());
        vfs.set_read_only(true);
        assert!(block_on(vfs.write_file("a.txt", b"x")).is_err());
        assert!(vfs.paths().is_empty());
        assert!(block_on(NoopVfs.write_file("a.txt", b"x")).is_err());
    }
}
