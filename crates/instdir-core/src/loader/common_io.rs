// crates/instdir-core/src/loader/common_io.rs
use crate::error::{DirError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DirError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if has_extension(path, "gz") {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(DirError::InvalidData(format!(
                "{} is gzip-compressed but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// Reads a whole file, inflating it if it starts with the gzip magic.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| {
        DirError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    #[cfg(feature = "compact")]
    {
        let mut out = Vec::new();
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }
    #[cfg(not(feature = "compact"))]
    {
        Err(DirError::InvalidData(format!(
            "{} is gzip-compressed but 'compact' is disabled",
            path.display()
        )))
    }
}

/// `institutions.json.gz` -> `institutions.json.gz.<suffix>`
pub fn get_cache_path(source: &Path, suffix: &str) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    source.with_file_name(format!("{filename}.{suffix}"))
}

/// Raw import sources are `.json` or `.json.gz`.
pub fn is_source(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".json") || name.ends_with(".json.gz")
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_appends_suffix() {
        let p = get_cache_path(Path::new("/data/institutions.json.gz"), "comp.flat.bin");
        assert_eq!(p, Path::new("/data/institutions.json.gz.comp.flat.bin"));
    }

    #[test]
    fn source_detection() {
        assert!(is_source(Path::new("a/institutions.json")));
        assert!(is_source(Path::new("a/INSTITUTIONS.JSON.GZ")));
        assert!(!is_source(Path::new("a/institutions.bin")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_payload(Path::new("/definitely/not/here.bin")).unwrap_err();
        assert!(matches!(err, DirError::NotFound(_)));
    }
}
