use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;
use jiff::Zoned;
use jiff::civil::DateTime;

/// Atomically write content to a file using a temporary file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp = Path::new(&temp_name);

    let mut file = File::create(temp)
        .with_context(|| format!("Failed to create temporary file: {}", temp.display()))?;
    file.lock_exclusive()
        .context("Failed to acquire file lock")?;
    file.write_all(content)
        .context("Failed to write file content")?;
    file.sync_all().context("Failed to sync file")?;
    file.unlock().context("Failed to unlock file")?;
    fs::rename(temp, path).with_context(|| format!("Failed to rename to {}", path.display()))?;
    Ok(())
}

/// The local wall-clock time, truncated to whole seconds.
pub fn now_local() -> DateTime {
    let now = Zoned::now().datetime();
    now.date().at(now.hour(), now.minute(), now.second(), 0)
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` (a `T` separator works too).
pub fn parse_datetime(input: &str) -> Result<DateTime> {
    input
        .trim()
        .parse::<DateTime>()
        .with_context(|| format!("Invalid date: {input}"))
}
