use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

const PRINT_DOCUMENT_PREFIX: &str = "selection-lookup-print-";
/// Print documents older than this are removed on the next write.
const STALE_DOCUMENT_AGE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write print document {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("new browsing context was blocked")]
    Blocked,
}

pub type PopupResult<T> = std::result::Result<T, PopupError>;

/// Opens new browsing contexts: external pages and generated documents.
pub trait PopupOpener {
    fn open_url(&self, url: &str) -> PopupResult<()>;
    fn open_document(&self, html: &str) -> PopupResult<()>;
}

/// Hands URLs to the system browser. Documents are written to the temp
/// directory first and opened from there.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    document_dir: PathBuf,
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self::with_document_dir(std::env::temp_dir())
    }

    pub fn with_document_dir(document_dir: PathBuf) -> Self {
        Self { document_dir }
    }

    fn document_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        self.document_dir.join(format!(
            "{PRINT_DOCUMENT_PREFIX}{}-{stamp}.html",
            std::process::id()
        ))
    }

    /// Removes earlier print documents that have outlived `STALE_DOCUMENT_AGE`.
    fn prune_stale_documents(&self) {
        let Ok(entries) = std::fs::read_dir(&self.document_dir) else {
            return;
        };
        let Some(cutoff) = SystemTime::now().checked_sub(STALE_DOCUMENT_AGE) else {
            return;
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.starts_with(PRINT_DOCUMENT_PREFIX) || !name.ends_with(".html") {
                continue;
            }
            let stale = entry
                .metadata()
                .and_then(|metadata| metadata.modified())
                .is_ok_and(|modified| modified < cutoff);
            if stale {
                if let Err(err) = std::fs::remove_file(entry.path()) {
                    tracing::debug!(%err, file = name, "failed to remove stale print document");
                }
            }
        }
    }

    pub(crate) fn write_document(&self, html: &str) -> PopupResult<PathBuf> {
        self.prune_stale_documents();
        let path = self.document_path();
        std::fs::write(&path, html).map_err(|source| PopupError::WriteDocument {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupOpener for SystemBrowser {
    fn open_url(&self, url: &str) -> PopupResult<()> {
        open::that(url).map_err(|source| PopupError::Open {
            target: url.to_string(),
            source,
        })
    }

    fn open_document(&self, html: &str) -> PopupResult<()> {
        let path = self.write_document(html)?;
        tracing::debug!(path = %path.display(), "opening print document");
        open::that(&path).map_err(|source| PopupError::Open {
            target: path.display().to_string(),
            source,
        })
    }
}

impl<P: PopupOpener + ?Sized> PopupOpener for Rc<P> {
    fn open_url(&self, url: &str) -> PopupResult<()> {
        (**self).open_url(url)
    }

    fn open_document(&self, html: &str) -> PopupResult<()> {
        (**self).open_document(html)
    }
}
