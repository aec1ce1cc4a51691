use crate::core::ports::storer::FileStorer;
use crate::error::Error;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Content-addressed storage on local disk: the stored name is the sha256 of
/// the bytes, keeping the original extension so the static file server can
/// guess a content type.
pub struct LocalStorer {
    path: String,
}

impl LocalStorer {
    pub fn new(path: &str) -> Self {
        Self { path: path.to_owned() }
    }
}

impl FileStorer for LocalStorer {
    fn write(&self, bytes: &[u8], ext: Option<&str>) -> Result<String, Error> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let name = match ext {
            Some(ext) => format!("{:x}.{}", hasher.finalize(), ext),
            None => format!("{:x}", hasher.finalize()),
        };
        let mut file = File::create(Path::new(&self.path).join(&name))?;
        file.write_all(bytes)?;
        Ok(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        let mut file = File::open(Path::new(&self.path).join(name))?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    fn remove(&self, name: &str) -> Result<(), Error> {
        std::fs::remove_file(Path::new(&self.path).join(name))?;
        Ok(())
    }
}
