//! JSON snapshot output.
//!
//! Files are truncated and rewritten in place. There is no temp file or
//! rename, so a crash mid-write leaves a partial file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Write `records` as a compact JSON array to `path`.
pub fn write_snapshot<T: Serialize>(path: &Path, records: &[T]) -> CoreResult<()> {
    write_json(path, &records)?;
    tracing::info!(path = %path.display(), count = records.len(), "Wrote snapshot");
    Ok(())
}

/// Write any serializable value (raw provider responses, debug dumps) to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CoreResult<()> {
    let io_err = |source| CoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}
