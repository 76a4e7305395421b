use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "ABSENTEE_HOME";
pub const RECORDS_FILE_NAME: &str = "records.json";

/// Resolves the records document: explicit path, then `ABSENTEE_HOME`, then
/// `~/.absentee`.
pub fn resolve_records_path(records_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match records_override {
        Some(path) => path.to_path_buf(),
        None => records_home()?.join(RECORDS_FILE_NAME),
    };

    absolutize(&candidate)
}

pub fn records_home() -> ClientResult<PathBuf> {
    if let Some(override_path) = std::env::var_os(HOME_ENV_VAR)
        && !override_path.is_empty()
    {
        return Ok(PathBuf::from(override_path));
    }
    if let Some(home_path) = home::home_dir() {
        return Ok(home_path.join(".absentee"));
    }
    Err(ClientError::records_home_unresolved())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::records_unreadable(path, &error.to_string()))
}
