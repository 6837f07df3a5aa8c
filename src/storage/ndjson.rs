//! NDJSON (Newline Delimited JSON) file operations
//!
//! [`NdjsonWriter`] is the sink behind the `export` command.
//! [`NdjsonReader`] reads an exported file back, for checking an export's
//! contents after a dry run.

use crate::etl::Loader;

use eyre::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Read an exported NDJSON file back as JSON values
pub struct NdjsonReader {
    path: PathBuf,
}

impl NdjsonReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all lines as JSON values
    pub fn read(&self) -> Result<Vec<Value>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read NDJSON file: {}", self.path.display()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse JSON line: {}", line))
            })
            .collect()
    }
}

/// Write records as NDJSON to a file, one object per line
///
/// # Example
/// ```no_run
/// use customer_tier_loader::etl::Loader;
/// use customer_tier_loader::model::ClassifiedRecord;
/// use customer_tier_loader::storage::NdjsonWriter;
///
/// # async fn example(batch: Vec<ClassifiedRecord>) -> eyre::Result<()> {
/// let writer = NdjsonWriter::<ClassifiedRecord>::new("final_data.ndjson");
/// let count = writer.load(batch).await?;
/// # Ok(())
/// # }
/// ```
pub struct NdjsonWriter<T> {
    path: PathBuf,
    _item: PhantomData<fn(T)>,
}

impl<T: Serialize> NdjsonWriter<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write records as NDJSON, replacing the file
    pub fn write(&self, items: &[T]) -> Result<()> {
        let ndjson = items
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| "Failed to serialize records to NDJSON")?
            .join("\n");

        // Add trailing newline
        let content = if ndjson.is_empty() {
            String::new()
        } else {
            format!("{}\n", ndjson)
        };

        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write NDJSON file: {}", self.path.display()))?;

        Ok(())
    }
}

impl<T: Serialize + Send> Loader for NdjsonWriter<T> {
    type Item = T;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write(&items)?;
        log::info!("Wrote {} record(s) to {}", items.len(), self.path.display());
        Ok(items.len())
    }
}
