use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::KvBackend;
use crate::errors::{PocketlinkError, Result};

/// 文件存储后端：每个 slot 对应数据目录下的一个 `<key>.json` 文件
pub struct FileBackend {
    dir: PathBuf,
    // 进程内串行化写入，避免两个写者交错 rename
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PocketlinkError::validation(format!(
                "Invalid slot key '{}': only ASCII letters, digits, '_' and '-' are allowed",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KvBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PocketlinkError::file_operation(format!(
                "读取 {} 失败: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        fs::create_dir_all(&self.dir).map_err(|e| {
            PocketlinkError::file_operation(format!(
                "创建数据目录 {} 失败: {}",
                self.dir.display(),
                e
            ))
        })?;
        // 先写临时文件再 rename，读者不会看到写了一半的内容
        fs::write(&tmp, value).map_err(|e| {
            PocketlinkError::file_operation(format!("写入 {} 失败: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            PocketlinkError::file_operation(format!("替换 {} 失败: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_backend_name(&self) -> &'static str {
        "file"
    }
}
