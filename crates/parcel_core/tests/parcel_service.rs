use parcel_core::db::open_db_in_memory;
use parcel_core::{ParcelService, ParcelStatus, RepoError, SqliteParcelRepository};

#[test]
fn register_stores_a_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

    let parcel = service.register(17, "Omsk, Pervaya 1").unwrap();

    assert!(parcel.number > 0);
    assert_eq!(parcel.status, ParcelStatus::Registered);
    assert_eq!(service.get(parcel.number).unwrap(), parcel);
}

#[test]
fn next_status_walks_the_lifecycle_then_stops() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());
    let number = service.register(17, "Omsk, Pervaya 1").unwrap().number;

    assert_eq!(
        service.next_status(number).unwrap(),
        Some(ParcelStatus::Sent)
    );
    assert_eq!(
        service.next_status(number).unwrap(),
        Some(ParcelStatus::Delivered)
    );
    assert_eq!(service.next_status(number).unwrap(), None);
    assert_eq!(service.get(number).unwrap().status, ParcelStatus::Delivered);
}

#[test]
fn next_status_on_missing_parcel_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

    assert!(matches!(
        service.next_status(31),
        Err(RepoError::NotFound(31))
    ));
}

#[test]
fn change_address_and_delete_respect_status_gate() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelRepository::try_new(&conn).unwrap());

    let kept = service.register(5, "Tver, Lugovaya 4").unwrap();
    service.change_address(kept.number, "Tver, Lugovaya 6").unwrap();
    service.next_status(kept.number).unwrap();
    assert!(matches!(
        service.change_address(kept.number, "elsewhere"),
        Err(RepoError::NotRegistered { .. })
    ));
    assert!(matches!(
        service.delete(kept.number),
        Err(RepoError::NotRegistered { .. })
    ));

    let dropped = service.register(5, "Tver, Lugovaya 8").unwrap();
    service.delete(dropped.number).unwrap();

    let remaining = service.client_parcels(5).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].number, kept.number);
    assert_eq!(remaining[0].address, "Tver, Lugovaya 6");
    assert_eq!(remaining[0].status, ParcelStatus::Sent);
}
