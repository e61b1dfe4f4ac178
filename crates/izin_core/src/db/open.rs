//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for the state slot.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - File connections create missing parent directories first.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum OpenTarget<'a> {
    File(&'a Path),
    Memory,
}

impl OpenTarget<'_> {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the state database file and applies all pending migrations.
///
/// # Side effects
/// - Creates the parent directory when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_target(OpenTarget::File(path.as_ref()))
}

/// Opens an in-memory state database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_target(OpenTarget::Memory)
}

fn open_target(target: OpenTarget<'_>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match target {
        OpenTarget::File(path) => ensure_parent_dir(path)
            .and_then(|()| Connection::open(path).map_err(DbError::from)),
        OpenTarget::Memory => Connection::open_in_memory().map_err(DbError::from),
    };
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }
    };

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(DbError::Io)
        }
        _ => Ok(()),
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
