use crate::error::Error;

/// Binary file storage for uploads (payment proofs, avatars, submissions).
/// `write` returns the stored name; files are served back under the static
/// path prefix.
pub trait FileStorer {
    fn write(&self, bytes: &[u8], ext: Option<&str>) -> Result<String, Error>;
    fn read(&self, name: &str) -> Result<Vec<u8>, Error>;
    fn remove(&self, name: &str) -> Result<(), Error>;
}
