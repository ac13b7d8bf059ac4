//! System Helpers
//!
//! Thin wrappers around OS facilities that accompany command execution:
//! killing processes by name through the platform kill command, tolerant
//! text-file reading, and small filesystem conveniences.

use std::path::Path;

use crate::error::{Error, Result};
use crate::models::SessionResult;
use crate::platform::OsFamily;
use crate::terminal::Terminal;

/// The full kill invocation for a process name on the current platform
pub fn kill_command_for(name: &str) -> String {
    format!("{} {}", OsFamily::current().kill_command(), name)
}

/// Kill processes by name using the platform kill command.
///
/// This is the guaranteed-termination path for children a timed-out
/// session left behind; the session itself never kills its child.
pub async fn kill_process_by_name(name: &str) -> Result<SessionResult> {
    Terminal::new().execute(&kill_command_for(name)).await
}

/// Read a whole file as text, tolerating non-UTF-8 encodings.
///
/// UTF-8 is tried first, then UTF-16 via its byte-order mark; anything
/// else is decoded lossily rather than rejected.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileNotReadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(decode_text(&bytes))
}

/// Read a whole file as text, split into lines
pub fn read_file_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_file(path)?.lines().map(str::to_string).collect())
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => match bytes {
            [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
            [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
            _ => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Delete a directory tree. Returns false on any error instead of
/// propagating it.
pub fn delete_directory(path: &Path) -> bool {
    match std::fs::remove_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to delete {}: {}", path.display(), e);
            false
        }
    }
}

/// Mark a file executable for its owner. No-op on platforms without
/// permission bits.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path)?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o100);
        std::fs::set_permissions(path, permissions)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
