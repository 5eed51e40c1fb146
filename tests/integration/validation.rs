//! Validation gate and contexts through the lifecycle.

use crate::common::{create_user, setup, Post, User};
use activerow::test_helpers::CountingExecutor;
use activerow::{ActiveRecord, Params};

#[test]
fn test_invalid_save_performs_no_io() {
    let db = setup();
    let counting = CountingExecutor::new(&*db);

    let mut user = User {
        name: "  ".into(),
        email: Some("nope".into()),
        age: Some(-1),
        ..User::default()
    };
    assert!(!user.is_valid());
    let expected = user.validate().unwrap_err();

    let errors = user.save(&counting).unwrap_err();
    assert_eq!(errors, expected);
    assert_eq!(counting.count(), 0);
    assert!(user.is_new_record());

    assert_eq!(errors["name"], ["can't be blank"]);
    assert_eq!(errors["email"], ["is invalid"]);
    assert_eq!(errors["age"], ["must be greater than or equal to 0"]);
    assert_eq!(
        errors.full_messages(),
        vec![
            "age must be greater than or equal to 0".to_string(),
            "email is invalid".to_string(),
            "name can't be blank".to_string(),
        ]
    );
}

#[test]
fn test_custom_validator() {
    let db = setup();
    let (user, result) = User::create(&*db, Params::new().set("name", "admin"));
    assert_eq!(result.unwrap_err()["name"], ["is reserved"]);
    assert!(user.is_new_record());
}

#[test]
fn test_optional_fields_may_be_null() {
    let user = User {
        name: "test".into(),
        ..User::default()
    };
    assert!(user.is_valid());
}

#[test]
fn test_create_and_update_contexts() {
    let db = setup();
    let owner = create_user(&db, "test", None);
    let mut post = Post {
        user_id: owner.id,
        title: "invalid".into(),
        ..Post::default()
    };

    // 4..=6 characters on create
    let errors = post.save(&*db).unwrap_err();
    assert_eq!(errors["title"], ["is too long (maximum is 6 characters)"]);

    post.title = "name".into();
    post.save(&*db).unwrap();

    // up to 7 on update
    post.title = "invalid".into();
    post.save(&*db).unwrap();
    assert_eq!(Post::find(&*db, post.id).unwrap().unwrap().title, "invalid");

    post.title = "invalid!".into();
    let errors = post.save(&*db).unwrap_err();
    assert_eq!(errors["title"], ["is too long (maximum is 7 characters)"]);
}

#[test]
fn test_update_columns_bypasses_validation() {
    let db = setup();
    let mut user = create_user(&db, "test", None);
    user.update_columns(&*db, Params::new().set("age", -5)).unwrap();
    assert_eq!(User::find(&*db, user.id).unwrap().unwrap().age, Some(-5));
    assert!(!user.is_valid());
}

#[test]
fn test_type_mismatch_in_params() {
    let db = setup();
    let mut user = create_user(&db, "test", None);
    let errors = user.update(&*db, Params::new().set("age", "old")).unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["age"]);
}
