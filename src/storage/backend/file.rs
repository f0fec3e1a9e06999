use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::errors::{Result, TinylinkerError};
use crate::storage::KeyValueStore;

/// One `<key>.json` document per key inside a data directory.
///
/// Writes go to a temp file that is renamed over the target, so a reader
/// sees either the old or the new value, never a torn one.
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                error!("创建数据目录失败: {}", e);
                TinylinkerError::file_operation(format!(
                    "Failed to create data directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            info!("已创建数据目录: {}", dir.display());
        }

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TinylinkerError::file_operation(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("存储文件不存在: {}", path.display());
                Ok(None)
            }
            Err(e) => Err(TinylinkerError::file_operation(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        fs::write(&tmp, value).map_err(|e| {
            TinylinkerError::file_operation(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            TinylinkerError::file_operation(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TinylinkerError::file_operation(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
