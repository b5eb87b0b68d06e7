use rose_records::{
    AppointmentService, ContactId, ContactService, MemoryStore, NewAppointment, NewContact,
    RecordError,
};
use std::collections::HashSet;

fn contact(name: &str) -> NewContact {
    NewContact::new(name, "ann@x.com", "Hi", "Hello")
}

#[tokio::test]
async fn test_sequential_ids_match_example_scenario() {
    let service = ContactService::new(MemoryStore::new());

    let ann = service
        .create(NewContact::new("Ann", "ann@x.com", "Hi", "Hello"))
        .await
        .unwrap();
    assert_eq!(ann.contact_id, ContactId(1));
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.email, "ann@x.com");
    assert_eq!(ann.subject, "Hi");
    assert_eq!(ann.message, "Hello");

    let bo = service.create(contact("Bo")).await.unwrap();
    assert_eq!(bo.contact_id, ContactId(2));
}

#[tokio::test]
async fn test_ids_are_pairwise_distinct() {
    let service = ContactService::new(MemoryStore::new());

    let mut ids = HashSet::new();
    for i in 0..200 {
        let record = service.create(contact(&format!("n{}", i))).await.unwrap();
        assert!(ids.insert(record.contact_id), "duplicate id {}", record.contact_id);
    }
}

#[tokio::test]
async fn test_values_are_stored_verbatim() {
    let service = ContactService::new(MemoryStore::new());
    let draft = NewContact::new(
        "  Ann  ",
        "Ann.Lee@Example.COM",
        "\tSubject with trailing space ",
        "line one\n\nline two\n",
    );

    let created = service.create(draft.clone()).await.unwrap();
    let fetched = service.get(created.contact_id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.to_draft(), draft);
}

#[tokio::test]
async fn test_name_length_boundary() {
    let service = ContactService::new(MemoryStore::new());

    assert!(service.create(contact(&"a".repeat(100))).await.is_ok());

    let err = service.create(contact(&"a".repeat(101))).await.unwrap_err();
    match err {
        RecordError::ValidationError { field, .. } => assert_eq!(field, "name"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_email_validation() {
    let service = ContactService::new(MemoryStore::new());

    let err = service
        .create(NewContact::new("Ann", "not-an-email", "Hi", "Hello"))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert!(service
        .create(NewContact::new("Ann", "a@b.com", "Hi", "Hello"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let service = ContactService::new(MemoryStore::new());
    service.create(contact("Ann")).await.unwrap();

    let err = service.get(ContactId(2)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Contact with id 2 not found");
}

#[tokio::test]
async fn test_update_and_delete() {
    let service = ContactService::new(MemoryStore::new());
    let ann = service.create(contact("Ann")).await.unwrap();

    let updated = service
        .update(ann.contact_id, NewContact::new("Ann", "ann@y.com", "Re", "Later"))
        .await
        .unwrap();
    assert_eq!(updated.contact_id, ann.contact_id);
    assert_eq!(updated.email, "ann@y.com");

    service.delete(ann.contact_id).await.unwrap();
    assert!(service.get(ann.contact_id).await.unwrap_err().is_not_found());
    assert!(service.list().await.unwrap().is_empty());

    let bo = service.create(contact("Bo")).await.unwrap();
    assert_eq!(bo.contact_id, ContactId(2));
}

#[tokio::test]
async fn test_entity_types_allocate_independently() {
    let contacts = ContactService::new(MemoryStore::new());
    let appointments = AppointmentService::new(MemoryStore::new());

    for i in 0..5 {
        contacts.create(contact(&format!("c{}", i))).await.unwrap();
    }

    let booked = appointments
        .create(NewAppointment::new(
            "Ann",
            "ann@x.com",
            "123",
            chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(booked.id.0, 1);
    assert_eq!(contacts.list().await.unwrap().len(), 5);
}
