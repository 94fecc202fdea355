//! Stage storage in the working dir
//!
//! Every key lives in one JSON object so the file can be inspected and edited
//! by hand.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tradepay::stage::storage::Error;
use tradepay::StageStorage;

/// File the stage is stored in
pub const STATE_FILE_NAME: &str = "state.json";

/// JSON file backed [`StageStorage`]
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage file inside `work_dir`
    pub fn new(work_dir: &Path) -> Self {
        Self {
            path: work_dir.join(STATE_FILE_NAME),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl StageStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.read_all()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}
