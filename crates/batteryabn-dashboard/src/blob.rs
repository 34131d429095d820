/*
[INPUT]:  Plot image and HTML bytes downloaded for a view
[OUTPUT]: ObjectUrl guards (file:// URL backed by a temp file removed on drop)
[POS]:    Resource layer - scoped local URLs for blob responses
[UPDATE]: When changing where blobs are stored or how they are named
*/

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

/// What a blob contains; picks the file suffix so viewers open it correctly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Image,
    Html,
}

impl BlobKind {
    fn suffix(&self) -> &'static str {
        match self {
            BlobKind::Image => ".png",
            BlobKind::Html => ".html",
        }
    }
}

/// Directory that holds the object URLs of the running dashboard
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Use `dir`, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// `batteryabn-blobs` under the OS temp directory
    pub fn in_temp_dir() -> io::Result<Self> {
        Self::new(std::env::temp_dir().join("batteryabn-blobs"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `bytes` and hand back the guard that owns the file
    pub fn store(&self, label: &str, kind: BlobKind, bytes: &[u8]) -> io::Result<ObjectUrl> {
        let prefix = format!("{}-", sanitize(label));
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(kind.suffix())
            .tempfile_in(&self.dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let url = Url::from_file_path(file.path()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("blob path is not absolute: {}", file.path().display()),
            )
        })?;
        debug!(%url, len = bytes.len(), "object url created");

        Ok(ObjectUrl {
            file,
            url,
            kind,
            len: bytes.len(),
        })
    }
}

/// Local URL for a downloaded blob.
///
/// The backing file lives exactly as long as this value: dropping it (view
/// unmounted, or replaced by a newer blob) deletes the file.
pub struct ObjectUrl {
    file: NamedTempFile,
    url: Url,
    kind: BlobKind,
    len: usize,
}

impl ObjectUrl {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> BlobKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectUrl")
            .field("url", &self.url.as_str())
            .field("kind", &self.kind)
            .field("len", &self.len)
            .finish()
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        debug!(url = %self.url, "object url released");
    }
}

fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' { ch } else { '_' })
        .take(48)
        .collect();
    if cleaned.is_empty() {
        "blob".to_string()
    } else {
        cleaned
    }
}
