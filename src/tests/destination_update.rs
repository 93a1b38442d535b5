use crate::destinations::Destination;
use crate::storage::Error;
use crate::storage::Memory;
use crate::storage::Storage;

use crate::tests::helper;

#[tokio::test]
async fn update_writes_all_data_columns() {
    let storage = Memory::new();

    let created = helper::create_named(&storage, "Como Park Zoo").await;

    let changed = Destination {
        name: "Como Park Zoo & Conservatory".to_string(),
        description: "Zoo, conservatory and amusement park".to_string(),
        image_url: None,
        website: Some("https://comofriends.org/".to_string()),
        zip: "55103-1136".to_string(),
        line_1: "1225 Estabrook Dr".to_string(),
        line_2: "Gate B".to_string(),
        city: "St Paul".to_string(),
        ..created
    };

    let updated = storage.update_destination(&changed).await.unwrap();
    assert_eq!(changed, updated);

    let found = storage.find_destination_by_id(changed.id).await.unwrap();
    assert_eq!(Some(changed), found);
}

#[tokio::test]
async fn update_of_a_missing_id_is_not_found() {
    let storage = Memory::new();

    let mut destination = helper::create_named(&storage, "Como Park Zoo").await;
    destination.id = 42;

    let result = storage.update_destination(&destination).await;

    assert!(matches!(result, Err(Error::NotFound(42))));
}

#[tokio::test]
async fn missing_id_wins_over_a_name_collision() {
    let storage = Memory::new();

    let existing = helper::create_named(&storage, "Minnehaha Falls").await;

    let mut destination = existing.clone();
    destination.id = 42;

    let result = storage.update_destination(&destination).await;

    assert!(matches!(result, Err(Error::NotFound(42))));

    let found = storage.find_destination_by_id(existing.id).await.unwrap();
    assert_eq!(Some(existing), found);
}

#[tokio::test]
async fn invalid_update_leaves_the_record_untouched() {
    let storage = Memory::new();

    let created = helper::create_named(&storage, "Como Park Zoo").await;

    let changed = Destination {
        description: "x".repeat(5001),
        ..created.clone()
    };

    let result = storage.update_destination(&changed).await;

    assert!(matches!(
        result,
        Err(Error::TooLong {
            field: "destination_desc",
            limit: 5000,
        })
    ));

    let found = storage.find_destination_by_id(created.id).await.unwrap();
    assert_eq!(Some(created), found);
}

#[tokio::test]
async fn update_to_an_existing_name_is_rejected() {
    let storage = Memory::new();

    helper::create_named(&storage, "Minnehaha Falls").await;
    let other = helper::create_named(&storage, "Stone Arch Bridge").await;

    let changed = Destination {
        name: "Minnehaha Falls".to_string(),
        ..other
    };

    let result = storage.update_destination(&changed).await;

    assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "Minnehaha Falls"));
}

#[tokio::test]
async fn update_keeping_its_own_name_is_allowed() {
    let storage = Memory::new();

    let created = helper::create_named(&storage, "Minnehaha Falls").await;

    let changed = Destination {
        description: "Waterfall and surrounding regional park".to_string(),
        ..created
    };

    let updated = storage.update_destination(&changed).await.unwrap();

    assert_eq!(changed, updated);
}
