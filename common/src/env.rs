use anyhow::{anyhow, Result};

pub fn get_env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| anyhow!("{} must be a valid number", key)),
        Err(_) => Ok(None),
    }
}
