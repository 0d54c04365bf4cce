//! Password prompting with a non-interactive override.

use anyhow::{Result, anyhow};

/// Environment variable consulted before prompting (batch/scripted runs).
pub const PASSWORD_ENV_VAR: &str = "VMAP_PASSWORD";

pub fn prompt_password_once(prompt: &str) -> Result<String> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(pw);
        }
    }
    let pw = rpassword::prompt_password(prompt).map_err(|e| anyhow!("password prompt: {e}"))?;
    if pw.is_empty() {
        return Err(anyhow!("empty password"));
    }
    Ok(pw)
}

pub fn prompt_password_twice(prompt: &str) -> Result<String> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(pw);
        }
    }
    let first = prompt_password_once(prompt)?;
    let second = rpassword::prompt_password("Confirm password")
        .map_err(|e| anyhow!("password prompt: {e}"))?;
    if first != second {
        return Err(anyhow!("passwords do not match"));
    }
    Ok(first)
}
