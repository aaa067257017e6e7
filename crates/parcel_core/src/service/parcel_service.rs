//! Parcel tracking use-cases.
//!
//! # Invariants
//! - The service never bypasses the store's status gate.
//! - Storage errors are returned unchanged.
//!
//! # See also
//! - `crate::repo::parcel_repo` for the gate and error variants.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use log::{info, warn};

/// Use-case layer over any parcel store.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client` and returns it with its number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.repo.add(&parcel)?;
        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    /// Moves a parcel one step along `registered -> sent -> delivered`.
    ///
    /// Returns the new status, or `None` when the parcel is already
    /// delivered and nothing was written.
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<Option<ParcelStatus>> {
        let parcel = self.repo.get(number)?;
        let Some(next) = parcel.status.next() else {
            info!(
                "event=parcel_status module=service status=skipped number={number} reason=already_delivered"
            );
            return Ok(None);
        };

        self.repo.set_status(number, next)?;
        info!(
            "event=parcel_status module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        Ok(Some(next))
    }

    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address).inspect_err(|err| {
            warn!("event=parcel_address module=service status=error number={number} error={err}")
        })?;
        info!("event=parcel_address module=service status=ok number={number}");
        Ok(())
    }

    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number).inspect_err(|err| {
            warn!("event=parcel_delete module=service status=error number={number} error={err}")
        })?;
        info!("event=parcel_delete module=service status=ok number={number}");
        Ok(())
    }
}
