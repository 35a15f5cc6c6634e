use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = UserId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = UserId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(UserId::from_str("invalid").is_err());
}

#[test]
fn test_new_record_ids_are_distinct_v7_uuids() {
    let first = TransactionId::new();
    let second = TransactionId::new();
    assert_ne!(first, second);

    let parsed = Uuid::parse_str(first.as_str()).unwrap();
    assert_eq!(parsed.get_version_num(), 7);
    assert!(first < second);
}

#[test]
fn test_record_id_keeps_foreign_ids() {
    let id: TransactionId = serde_json::from_str("\"-NqLegacyPushId01\"").unwrap();
    assert_eq!(id.as_str(), "-NqLegacyPushId01");
    assert_eq!(id.to_string(), "-NqLegacyPushId01");
    assert_eq!(ReferenceId::from("bank-7").as_ref(), "bank-7");
}

#[test]
fn test_record_id_serializes_as_plain_string() {
    let id = ReferenceId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));

    let back: ReferenceId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
