//! Create / save / update / delete through the record lifecycle.

use crate::common::{create_user, setup, Post, Tag, User};
use activerow::test_helpers::CountingExecutor;
use activerow::{ActiveRecord, Params, Value};

// ============================================================================
// Insert and update paths
// ============================================================================

#[test]
fn test_save_assigns_primary_key() {
    let db = setup();
    let mut user = User {
        name: "test".into(),
        ..User::default()
    };
    assert!(user.is_new_record());
    assert!(!user.is_persistent());

    user.save(&*db).unwrap();
    assert!(user.is_persistent());
    assert!(user.id > 0);
}

#[test]
fn test_second_save_updates_in_place() {
    let db = setup();
    let mut user = create_user(&db, "test", Some(20));
    let id = user.id;

    user.name = "renamed".into();
    user.save(&*db).unwrap();
    assert_eq!(user.id, id);

    let fetched = User::find(&*db, id).unwrap().unwrap();
    assert_eq!(fetched.name, "renamed");
    assert_eq!(fetched.age, Some(20));
    assert_eq!(User::count(&*db, None).unwrap(), 1);
}

#[test]
fn test_create_with_params() {
    let db = setup();
    let (user, result) = User::create(&*db, Params::new().set("name", "alice").set("email", "a@example.com"));
    result.unwrap();

    let fetched = User::find(&*db, user.id).unwrap().unwrap();
    assert_eq!(fetched, user);
    assert_eq!(fetched.email.as_deref(), Some("a@example.com"));
    assert_eq!(fetched.age, None);
}

#[test]
fn test_create_unknown_column() {
    let db = setup();
    let (_, result) = User::create(&*db, Params::new().set("name", "a").set("nickname", "b"));
    let errors = result.unwrap_err();
    assert_eq!(errors["nickname"], ["unknown column nickname"]);
    assert_eq!(User::count(&*db, None).unwrap(), 0);
}

#[test]
fn test_update_validates() {
    let db = setup();
    let mut user = create_user(&db, "test", None);

    let errors = user.update(&*db, Params::new().set("name", "")).unwrap_err();
    assert_eq!(errors["name"], ["can't be blank"]);
    // the stored row is unchanged
    assert_eq!(User::find(&*db, user.id).unwrap().unwrap().name, "test");

    user.update(&*db, Params::new().set("name", "ok").set("age", 31)).unwrap();
    let fetched = User::find(&*db, user.id).unwrap().unwrap();
    assert_eq!((fetched.name.as_str(), fetched.age), ("ok", Some(31)));
}

#[test]
fn test_update_columns_skips_validation_and_other_columns() {
    let db = setup();
    let mut user = create_user(&db, "test", Some(10));

    // unsaved in-memory change to another column must not be written
    user.age = Some(99);
    user.update_columns(&*db, Params::new().set("email", "not-an-email")).unwrap();

    let fetched = User::find(&*db, user.id).unwrap().unwrap();
    assert_eq!(fetched.email.as_deref(), Some("not-an-email"));
    assert_eq!(fetched.age, Some(10));
}

#[test]
fn test_update_columns_new_record() {
    // EDGE CASE: no primary key to address the row
    let db = setup();
    let counting = CountingExecutor::new(&*db);
    let mut user = User::default();
    let errors = user.update_columns(&counting, Params::new().set("name", "x")).unwrap_err();
    assert_eq!(errors.base().len(), 1);
    assert_eq!(counting.count(), 0);
}

#[test]
fn test_save_without_validation() {
    let db = setup();
    let mut user = User {
        name: "admin".into(),
        ..User::default()
    };
    assert!(!user.is_valid());
    user.save_without_validation(&*db).unwrap();
    assert!(user.is_persistent());
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_delete_is_final() {
    let db = setup();
    let user = create_user(&db, "test", None);
    user.delete(&*db).unwrap();

    assert_eq!(User::find(&*db, user.id).unwrap(), None);
    // the in-memory record keeps its identity
    assert!(user.is_persistent());
}

#[test]
fn test_delete_missing_row_is_not_an_error() {
    let db = setup();
    let user = create_user(&db, "test", None);
    user.delete(&*db).unwrap();
    assert!(user.delete(&*db).is_ok());
}

#[test]
fn test_delete_new_record() {
    let db = setup();
    let counting = CountingExecutor::new(&*db);
    assert!(User::default().delete(&counting).is_err());
    assert_eq!(counting.count(), 0);
}

#[test]
fn test_delete_all_with_filter() {
    let db = setup();
    create_user(&db, "a", Some(10));
    create_user(&db, "b", Some(20));
    create_user(&db, "c", Some(30));

    let deleted = User::query().filter("age >=", 20).delete_all(&*db).unwrap();
    assert_eq!(deleted, 2);
    let names: Vec<String> = User::all(&*db).unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["a"]);

    assert_eq!(User::delete_all(&*db).unwrap(), 1);
    assert!(!User::exists(&*db).unwrap());
}

#[test]
fn test_delete_all_ignores_explain() {
    let db = setup();
    for name in ["a", "b", "c"] {
        create_user(&db, name, None);
    }
    let deleted = User::query().explain().limit(2).delete_all(&*db).unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(User::count(&*db, None).unwrap(), 1);
}

#[test]
fn test_delete_all_with_limit_uses_subquery() {
    let db = setup();
    for name in ["a", "b", "c"] {
        create_user(&db, name, None);
    }
    let deleted = User::query()
        .order_by("name", activerow::Order::Desc)
        .limit(2)
        .delete_all(&*db)
        .unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(User::first(&*db).unwrap().unwrap().name, "a");
}

// ============================================================================
// Database failures
// ============================================================================

#[test]
fn test_execution_failure_is_base_error() {
    let db = setup();
    db.execute_batch("CREATE TRIGGER reject BEFORE INSERT ON posts BEGIN SELECT RAISE(ABORT, 'rejected'); END")
        .unwrap();

    let mut post = Post {
        user_id: 1,
        title: "title".into(),
        ..Post::default()
    };
    let errors = post.save(&*db).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.base().len(), 1);
    assert!(errors.base()[0].contains("rejected"));
    assert!(post.is_new_record());
}

#[test]
fn test_null_assignment_round_trip() {
    let db = setup();
    let mut user = create_user(&db, "test", Some(5));
    user.update(&*db, Params::new().set("age", None::<i32>)).unwrap();
    let row = User::query()
        .select(["age"])
        .filter("id", user.id)
        .rows(&*db)
        .unwrap();
    assert_eq!(row[0].get(0), Some(&Value::String(None)));
}

#[test]
fn test_ignored_insert_is_not_persisted() {
    // EDGE CASE: the connection's last rowid belongs to another table
    let db = setup();
    let (first, result) = Tag::create(&*db, Params::new().set("name", "x"));
    result.unwrap();
    create_user(&db, "unrelated", None);
    db.execute_batch("INSERT INTO users (id, name) VALUES (500, 'other')").unwrap();

    let (mut dup, result) = Tag::create(&*db, Params::new().set("name", "x"));
    let errors = result.unwrap_err();
    assert_eq!(errors.base().len(), 1);
    assert!(dup.is_new_record());
    assert_eq!(Tag::all(&*db).unwrap(), vec![first]);

    // saving again retries the INSERT rather than updating a phantom row
    assert!(dup.save(&*db).is_err());
    assert_eq!(Tag::count(&*db, None).unwrap(), 1);
}

#[test]
fn test_save_after_delete_writes_nothing() {
    // EDGE CASE: an UPDATE matching no row is not an error
    let db = setup();
    let mut user = create_user(&db, "test", None);
    user.delete(&*db).unwrap();

    user.name = "again".into();
    assert!(user.save(&*db).is_ok());
    assert!(user.is_persistent());
    assert_eq!(User::count(&*db, None).unwrap(), 0);
}
