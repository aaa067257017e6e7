use parcel_core::{Parcel, ParcelStatus};

#[test]
fn new_parcel_starts_registered_and_unsaved() {
    let parcel = Parcel::new(12, "Tula, Zelenaya 2");

    assert_eq!(parcel.number, 0);
    assert_eq!(parcel.client, 12);
    assert_eq!(parcel.status, ParcelStatus::Registered);
    assert_eq!(parcel.address, "Tula, Zelenaya 2");
    assert!(parcel.created_at.ends_with('Z'));
    assert!(parcel.is_registered());
}

#[test]
fn status_lifecycle_ends_at_delivered() {
    assert_eq!(ParcelStatus::Registered.next(), Some(ParcelStatus::Sent));
    assert_eq!(ParcelStatus::Sent.next(), Some(ParcelStatus::Delivered));
    assert_eq!(ParcelStatus::Delivered.next(), None);
}

#[test]
fn parcel_serialization_uses_expected_wire_fields() {
    let parcel = Parcel {
        number: 3,
        client: 12,
        status: ParcelStatus::Sent,
        address: "Tula, Zelenaya 2".to_string(),
        created_at: "2024-05-01T12:30:00Z".to_string(),
    };

    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(json["number"], 3);
    assert_eq!(json["client"], 12);
    assert_eq!(json["status"], "sent");
    assert_eq!(json["address"], "Tula, Zelenaya 2");
    assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");

    let decoded: Parcel = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, parcel);
}
