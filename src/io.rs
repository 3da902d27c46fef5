use std::path::Path;

use crate::renderer::LoadError;

pub(crate) fn load_binary(path: &Path) -> Result<Vec<u8>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(bytes)
}
