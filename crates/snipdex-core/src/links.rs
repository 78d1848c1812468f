use crate::error::{Result, SnipdexError};
use std::process::Command;

/// Add an `https://` scheme to bare domains
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Open a URL in the default browser
pub fn open_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(SnipdexError::Other("Cannot open an empty URL".to_string()));
    }
    let url = normalize_url(url);
    tracing::info!("Opening URL: {}", url);

    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(&url).status();

    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/c", "start", "", &url]).status();

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let status = Command::new("xdg-open").arg(&url).status();

    match status {
        Ok(exit_status) if exit_status.success() => Ok(()),
        Ok(exit_status) => Err(SnipdexError::Other(format!(
            "Failed to open URL: process exited with code {:?}",
            exit_status.code()
        ))),
        Err(e) => Err(SnipdexError::Io(e)),
    }
}
