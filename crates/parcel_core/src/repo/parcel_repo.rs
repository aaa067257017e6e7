//! Parcel store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Insert, read, list, update and delete rows of `parcel`.
//! - Enforce the `registered` gate on address changes and deletion.
//!
//! # Invariants
//! - `set_status` overwrites unconditionally and ignores unknown numbers.
//! - `set_address` and `delete` check the gate in the same statement that
//!   writes, so no other writer can slip in between check and write.
//! - Status text outside `ParcelStatus::ALL` is tolerated by the gate and by
//!   client listing; only `get` reports it as invalid data.
//!
//! # See also
//! - `crate::db::migrations` for the `parcel` schema.
//! - `crate::service::parcel_service` for the lifecycle built on top.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fmt::{Display, Formatter};
use thiserror::Error;

const PARCEL_TABLE: &str = "parcel";
const PARCEL_COLUMNS: [&str; 5] = ["number", "client", "status", "address", "created_at"];
const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Write that is only allowed while a parcel is `registered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    ChangeAddress,
    Delete,
}

impl Display for GatedAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChangeAddress => f.write_str("change address"),
            Self::Delete => f.write_str("delete parcel"),
        }
    }
}

/// Parcel store error.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("parcel not found: {0}")]
    NotFound(ParcelNumber),
    /// `status` is the raw stored text, which may be outside `ParcelStatus`.
    #[error("cannot {action}: parcel {number} status is {status}, not registered")]
    NotRegistered {
        action: GatedAction,
        number: ParcelNumber,
        status: String,
    },
    /// The gated write missed, but the row reads back as `registered`:
    /// another writer changed it in between. Retrying may succeed.
    #[error("cannot {action}: parcel {number} changed concurrently, retry")]
    GateRaced {
        action: GatedAction,
        number: ParcelNumber,
    },
    #[error("invalid persisted parcel data: {0}")]
    InvalidData(String),
    #[error("database schema is at version {actual_version}, expected {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Parcel store operations.
pub trait ParcelRepository {
    /// Stores a new parcel and returns the number assigned by storage.
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Parcels of one client in storage order; empty when there are none.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()>;
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel store borrowing a migrated connection.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    /// Wraps `conn` after checking that the parcel schema is in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Resolves why a gated write touched no row.
    ///
    /// Reads only the raw status text, so unknown statuses still produce the
    /// gate error. The read runs after the write, so it is diagnostic only.
    fn gate_failure(&self, action: GatedAction, number: ParcelNumber) -> RepoError {
        let status = match self
            .conn
            .query_row(
                "SELECT status FROM parcel WHERE number = ?1;",
                [number],
                |row| row.get::<_, String>(0),
            )
            .optional()
        {
            Ok(Some(status)) => status,
            Ok(None) => return RepoError::NotFound(number),
            Err(err) => return err.into(),
        };

        if status == ParcelStatus::Registered.as_str() {
            return RepoError::GateRaced { action, number };
        }
        RepoError::NotRegistered {
            action,
            number,
            status,
        }
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;
        let mut rows = stmt.query([number])?;

        if let Some(row) = rows.next()? {
            return parse_parcel_row(row);
        }

        Err(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))?;
        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();

        while let Some(row) = rows.next()? {
            match parse_parcel_row(row) {
                Ok(parcel) => parcels.push(parcel),
                // Unknown status text skips the row, not the whole listing.
                Err(RepoError::InvalidData(reason)) => {
                    warn!("event=parcel_list module=repo status=skipped client={client} reason={reason}")
                }
                Err(err) => return Err(err),
            }
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status.as_str(), number],
        )?;
        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel
             SET address = ?1
             WHERE number = ?2
               AND status = ?3;",
            params![address, number, ParcelStatus::Registered.as_str()],
        )?;

        if changed == 0 {
            return Err(self.gate_failure(GatedAction::ChangeAddress, number));
        }
        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parcel
             WHERE number = ?1
               AND status = ?2;",
            params![number, ParcelStatus::Registered.as_str()],
        )?;

        if changed == 0 {
            return Err(self.gate_failure(GatedAction::Delete, number));
        }
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [PARCEL_TABLE],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([PARCEL_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(column) = PARCEL_COLUMNS
        .into_iter()
        .find(|column| !present.iter().any(|name| name.as_str() == *column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: PARCEL_TABLE,
            column,
        });
    }

    Ok(())
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let status_text: String = row.get("status")?;
    let status = ParcelStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in parcel.status"))
    })?;

    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}
