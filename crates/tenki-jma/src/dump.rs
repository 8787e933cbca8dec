//! One-shot debug dump of the raw forecast document.

use std::io;
use std::path::Path;

use crate::types::RawForecastDocument;

/// Write `doc` to `path` as pretty-printed JSON, replacing any previous dump.
///
/// Keys keep the order they had in the response.
pub fn write_dump(path: &Path, doc: &RawForecastDocument) -> io::Result<()> {
    let mut contents = serde_json::to_string_pretty(doc)?;
    contents.push('\n');
    std::fs::write(path, contents)?;
    tracing::info!("Wrote forecast dump to {}", path.display());
    Ok(())
}
