// Opens links in the user's default browser.

use std::process::{Command, Stdio};
use std::thread;

use tracing::warn;

use crate::error::{BoardError, Result};

#[cfg(target_os = "macos")]
const OPENER: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const OPENER: &[&str] = &["cmd", "/C", "start", ""];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &[&str] = &["xdg-open"];

/// Launch the platform opener for `url` without waiting for it.
pub fn open_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(BoardError::InvalidData(format!("refusing to open {url:?}")));
    }

    let (program, args) = OPENER
        .split_first()
        .ok_or_else(|| BoardError::Other("no browser opener".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Reap the opener off the UI thread
    thread::spawn(move || {
        if let Err(e) = child.wait() {
            warn!(error = %e, "browser opener did not exit cleanly");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http() {
        assert!(matches!(
            open_url("file:///etc/passwd"),
            Err(BoardError::InvalidData(_))
        ));
        assert!(open_url("javascript:alert(1)").is_err());
    }
}
