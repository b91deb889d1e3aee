use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Plain file system storage. Parent directories are never created.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn open_reader(&self, path: &Path) -> Result<Box<dyn Read + '_>> {
        let file = File::open(path).map_err(|e| EtlError::file_access(path, e))?;
        Ok(Box::new(file))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = File::create(path).map_err(|e| EtlError::file_access(path, e))?;

        if let Err(e) = file.write_all(data).and_then(|_| file.flush()) {
            // 不留下寫到一半的檔案
            drop(file);
            let _ = fs::remove_file(path);
            return Err(EtlError::file_access(path, e));
        }

        Ok(())
    }
}
