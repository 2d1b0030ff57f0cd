//! Admin socket preparation.
//!
//! The admin socket is the node's privileged control plane, so it must only
//! be reachable by the owning user:
//!
//! - A stale socket left by a previous run is removed
//! - Anything else at the path (file, directory, symlink) aborts startup and
//!   is left untouched
//! - A missing parent directory is created with mode 0700
//! - The socket file is restricted to mode 0600 before the listener is
//!   handed out, so no connection can be accepted under looser permissions
//!
//! There is no portable way to create a Unix socket with its final mode, and
//! the process umask is not touched here. Between `bind` and `chmod` the
//! socket briefly carries umask-derived permissions. This window is an
//! accepted risk; it is closed entirely when the parent directory is one
//! this module created with mode 0700.

use std::io;
use std::os::unix::fs::{FileTypeExt, PermissionsExt};
use std::path::Path;

use tokio::net::UnixListener;
use tracing::{debug, info, warn};

use crate::error::{Result, ServerError};

/// Mode of the admin socket file.
pub const SOCKET_MODE: u32 = 0o600;

/// Mode of a socket directory created by this module.
pub const DIRECTORY_MODE: u32 = 0o700;

/// Prepare the path and bind the admin socket.
///
/// Must be called from within a Tokio runtime.
pub fn bind_admin_socket(path: &Path) -> Result<UnixListener> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    remove_stale_socket(path)?;

    let listener = UnixListener::bind(path).map_err(|source| ServerError::Bind {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(source) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(SOCKET_MODE)) {
        drop(listener);
        remove_socket_file(path);
        return Err(ServerError::Permissions {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(path = %path.display(), "admin server listening");
    Ok(listener)
}

/// Remove a socket left behind by a previous run.
///
/// Fails with [`ServerError::NotASocket`] if the path holds anything other
/// than a socket. Symlinks are not followed.
pub fn remove_stale_socket(path: &Path) -> Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(ServerError::SocketPath {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.file_type().is_socket() {
        return Err(ServerError::NotASocket(path.to_path_buf()));
    }

    std::fs::remove_file(path).map_err(|source| ServerError::SocketPath {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "removed stale admin socket");
    Ok(())
}

/// Best-effort removal of the socket file on shutdown.
///
/// Only removes the path if it is still a socket.
pub fn remove_socket_file(path: &Path) {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_socket() => {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "failed to remove admin socket");
            }
        }
        _ => {}
    }
}

/// Ensure the socket directory exists.
///
/// Existing directories are used as they are; their permissions are never
/// modified. Only directories created here get [`DIRECTORY_MODE`].
fn ensure_directory(path: &Path) -> Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ServerError::SocketPath {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "exists but is not a directory"),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(path)
                .and_then(|()| {
                    std::fs::set_permissions(path, std::fs::Permissions::from_mode(DIRECTORY_MODE))
                })
                .map_err(|source| ServerError::SocketPath {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(path = %path.display(), "created admin socket directory");
            Ok(())
        }
        Err(source) => Err(ServerError::SocketPath {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[tokio::test]
    async fn test_bind_creates_owner_only_socket() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.sock");

        let _listener = bind_admin_socket(&path).unwrap();

        let metadata = std::fs::symlink_metadata(&path).unwrap();
        assert!(metadata.file_type().is_socket());
        assert_eq!(mode_of(&path), SOCKET_MODE);
    }

    #[tokio::test]
    async fn test_plain_file_is_rejected_and_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.sock");
        std::fs::write(&path, b"operator notes").unwrap();

        let err = bind_admin_socket(&path).unwrap_err();
        assert!(matches!(err, ServerError::NotASocket(ref p) if p == &path));
        assert!(err.to_string().contains("is not a UNIX socket"));
        assert_eq!(std::fs::read(&path).unwrap(), b"operator notes");
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.sock");
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            bind_admin_socket(&path),
            Err(ServerError::NotASocket(_))
        ));
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn test_symlink_is_rejected_not_followed() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("target");
        std::fs::write(&target, b"keep me").unwrap();
        let path = tmp.path().join("admin.sock");
        std::os::unix::fs::symlink(&target, &path).unwrap();

        assert!(matches!(
            bind_admin_socket(&path),
            Err(ServerError::NotASocket(_))
        ));
        assert!(std::fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read(&target).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn test_stale_socket_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.sock");

        // Dropping a std listener leaves the socket file behind.
        drop(std::os::unix::net::UnixListener::bind(&path).unwrap());
        assert!(std::fs::symlink_metadata(&path).unwrap().file_type().is_socket());

        let _listener = bind_admin_socket(&path).unwrap();
        assert_eq!(mode_of(&path), SOCKET_MODE);
        tokio::net::UnixStream::connect(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_parent_created_owner_only() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("run").join("guardiand");
        let path = dir.join("admin.sock");

        let _listener = bind_admin_socket(&path).unwrap();
        assert_eq!(mode_of(&dir), DIRECTORY_MODE);
    }

    #[tokio::test]
    async fn test_existing_parent_permissions_preserved() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("shared");
        std::fs::create_dir(&dir).unwrap();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        let _listener = bind_admin_socket(&dir.join("admin.sock")).unwrap();
        assert_eq!(mode_of(&dir), 0o755);
    }

    #[tokio::test]
    async fn test_remove_socket_file_ignores_non_sockets() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("admin.sock");
        std::fs::write(&path, b"x").unwrap();

        remove_socket_file(&path);
        assert!(path.exists());
    }
}
