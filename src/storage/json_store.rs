use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;

use crate::{errors::FinanceError, finance::FinanceBook, schedule::Payment};

use super::{Result, StorageBackend};

const PAYMENTS_FILE: &str = "payments.json";
const FINANCE_FILE: &str = "finance.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each collection as a pretty-printed JSON document under a base
/// directory. Writes are staged through a temporary file and renamed into
/// place; documents that do not exist yet load as empty collections.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.or_else(default_root).ok_or_else(|| {
            FinanceError::InvalidInput("unable to resolve a storage directory".into())
        })?;
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn payments_path(&self) -> PathBuf {
        self.root.join(PAYMENTS_FILE)
    }

    fn finance_path(&self) -> PathBuf {
        self.root.join(FINANCE_FILE)
    }
}

impl StorageBackend for JsonStorage {
    fn load_payments(&self) -> Result<Vec<Payment>> {
        read_or_default(&self.payments_path())
    }

    fn save_payments(&self, payments: &[Payment]) -> Result<()> {
        let json = serde_json::to_string_pretty(payments)?;
        write_atomic(&self.payments_path(), &json)
    }

    fn load_book(&self) -> Result<FinanceBook> {
        read_or_default(&self.finance_path())
    }

    fn save_book(&self, book: &FinanceBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        write_atomic(&self.finance_path(), &json)
    }
}

fn default_root() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("finance_core"))
}

fn read_or_default<T: Default + DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the document atomically by staging to a temporary file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, contents)?;
    fs::rename(tmp, path)?;
    Ok(())
}
