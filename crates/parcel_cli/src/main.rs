//! Tracker smoke executable.
//!
//! Opens the configured database and walks one parcel through its whole
//! lifecycle, printing each step.

use parcel_core::db::open_db;
use parcel_core::{
    core_version, init_logging, ParcelService, RepoError, SqliteParcelRepository, TrackerConfig,
};
use std::error::Error;
use std::process::ExitCode;

const DEMO_CLIENT: i64 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    println!("parcel_core version={}", core_version());
    println!("database={}", config.db_path.display());

    let conn = open_db(&config.db_path)?;
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn)?);

    let parcel = service.register(DEMO_CLIENT, "Pskov, Sadovaya 7")?;
    println!(
        "registered number={} client={} created_at={}",
        parcel.number, parcel.client, parcel.created_at
    );

    service.change_address(parcel.number, "Saratov, Vishnevaya 12")?;
    println!("address changed number={}", parcel.number);

    while let Some(status) = service.next_status(parcel.number)? {
        println!("status number={} status={status}", parcel.number);
    }

    match service.delete(parcel.number) {
        Err(RepoError::NotRegistered { .. }) => {
            println!("delete refused number={}: already dispatched", parcel.number)
        }
        other => other?,
    }

    let draft = service.register(DEMO_CLIENT, "Kazan, Lesnaya 3")?;
    service.delete(draft.number)?;
    println!("deleted number={}", draft.number);

    for item in service.client_parcels(DEMO_CLIENT)? {
        println!(
            "client={} number={} status={} address={} created_at={}",
            item.client, item.number, item.status, item.address, item.created_at
        );
    }

    Ok(())
}
