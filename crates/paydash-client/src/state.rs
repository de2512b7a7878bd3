use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::records::input::SnapshotSource;
use crate::{ClientError, ClientResult};

pub const HOME_ENV: &str = "PAYDASH_HOME";
pub const TRANSACTIONS_ENV: &str = "PAYDASH_TRANSACTIONS";
pub const USERS_ENV: &str = "PAYDASH_USERS";

const TRANSACTIONS_FILE: &str = "transactions.json";
const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub transactions: SnapshotSource,
    pub users: SnapshotSource,
}

pub fn resolve_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".paydash")
            } else {
                return Err(ClientError::home_unresolved(
                    Path::new("."),
                    "Could not resolve a home directory.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

/// Creates the home directory (and parents) with private permissions.
pub fn ensure_home_directory(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn session_path(home: &Path) -> PathBuf {
    home.join(SESSION_FILE)
}

/// Explicit arguments win over the environment, which wins over the files
/// kept in `home`. Only one snapshot may be read from stdin.
pub fn resolve_snapshot_paths(
    home: &Path,
    transactions_arg: Option<&str>,
    users_arg: Option<&str>,
) -> ClientResult<SnapshotPaths> {
    let transactions = pick_source(transactions_arg, TRANSACTIONS_ENV, &home.join(TRANSACTIONS_FILE));
    let users = pick_source(users_arg, USERS_ENV, &home.join(USERS_FILE));

    if transactions == SnapshotSource::Stdin && users == SnapshotSource::Stdin {
        return Err(ClientError::invalid_argument_with_recovery(
            "Only one snapshot can be read from stdin.",
            vec!["Pass a file path for either --transactions or --users.".to_string()],
        ));
    }

    Ok(SnapshotPaths {
        transactions,
        users,
    })
}

/// Fails unless `source` is a file that a command may write back to.
/// Commands that save more than one snapshot check every target before the
/// first write.
pub fn ensure_writable(source: &SnapshotSource) -> ClientResult<&Path> {
    match source {
        SnapshotSource::File(path) => Ok(path),
        SnapshotSource::Stdin => Err(ClientError::invalid_argument_with_recovery(
            "A snapshot read from stdin cannot be written back.",
            vec!["Pass a file path so the change can be saved.".to_string()],
        )),
    }
}

/// Replaces a snapshot file with `records` as pretty JSON. The body goes to a
/// sibling temp file first so a failed write leaves the old snapshot intact.
pub fn write_snapshot<T>(source: &SnapshotSource, records: &[T]) -> ClientResult<()>
where
    T: Serialize,
{
    let path = ensure_writable(source)?;

    let mut body = serde_json::to_string_pretty(records)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    body.push('\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|error| ClientError::snapshot_write_failed(path, &error.to_string()))?;
    }

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, body)
        .map_err(|error| ClientError::snapshot_write_failed(path, &error.to_string()))?;
    fs::rename(&staging, path)
        .map_err(|error| ClientError::snapshot_write_failed(path, &error.to_string()))?;

    tracing::info!(path = %path.display(), records = records.len(), "snapshot written");
    Ok(())
}

fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::home_unresolved(path, &format!("permission denied ({error})"));
    }

    ClientError::home_unresolved(path, &error.to_string())
}

pub(crate) fn now_timestamp() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH);
    match now {
        Ok(duration) => format!("{}", duration.as_secs()),
        Err(_) => "0".to_string(),
    }
}

fn pick_source(arg: Option<&str>, env_key: &str, fallback: &Path) -> SnapshotSource {
    if let Some(value) = arg {
        return SnapshotSource::from_arg(value);
    }
    if let Some(value) = std::env::var_os(env_key) {
        return SnapshotSource::from_arg(&value.to_string_lossy());
    }
    SnapshotSource::File(fallback.to_path_buf())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::home_unresolved(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}
