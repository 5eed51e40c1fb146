//! Relation rendering and read terminals against real rows.

use crate::common::{create_user, setup, Post, User, UserScopes};
use activerow::{ActiveRecord, ArError, JoinKind, Order, Params};
use fake::faker::name::en::Name;
use fake::Fake;

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|u| u.name.as_str()).collect()
}

// ============================================================================
// Ordering and pagination
// ============================================================================

#[test]
fn test_order_ascending() {
    let db = setup();
    create_user(&db, "b", None);
    create_user(&db, "a", None);

    let users = User::query().order_by("name", Order::Asc).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["a", "b"]);

    let users = User::query().order_by("name", Order::Desc).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["b", "a"]);
}

#[test]
fn test_limit_offset() {
    let db = setup();
    for name in ["a", "b", "c"] {
        create_user(&db, name, None);
    }

    let users = User::query()
        .order_by("name", Order::Asc)
        .limit(2)
        .offset(1)
        .all(&*db)
        .unwrap();
    assert_eq!(names(&users), vec!["b", "c"]);

    // EDGE CASE: offset without a limit
    let users = User::query().order_by("name", Order::Asc).offset(2).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["c"]);
}

#[test]
fn test_first_and_last() {
    let db = setup();
    assert_eq!(User::first(&*db).unwrap(), None);

    let a = create_user(&db, "a", None);
    create_user(&db, "b", None);
    let c = create_user(&db, "c", None);

    assert_eq!(User::first(&*db).unwrap(), Some(a));
    assert_eq!(User::last(&*db).unwrap(), Some(c));
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_filter_and_or() {
    let db = setup();
    create_user(&db, "a", Some(10));
    create_user(&db, "b", Some(20));
    create_user(&db, "c", Some(30));

    let users = User::filter("age <", 15)
        .or("name", "c")
        .order_by("id", Order::Asc)
        .all(&*db)
        .unwrap();
    assert_eq!(names(&users), vec!["a", "c"]);

    let users = User::filter("age >", 5).and("age <", 25).all(&*db).unwrap();
    assert_eq!(users.len(), 2);

    let users = User::filter("name", vec!["a", "c"]).all(&*db).unwrap();
    assert_eq!(users.len(), 2);

    let users = User::filter("age BETWEEN ? AND ?", (15, 35)).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["b", "c"]);
}

#[test]
fn test_empty_in_list_matches_nothing() {
    let db = setup();
    create_user(&db, "a", None);
    let ids: Vec<i64> = Vec::new();
    assert!(User::filter("id IN", ids.clone()).all(&*db).unwrap().is_empty());
    assert_eq!(User::filter("id NOT IN", ids).all(&*db).unwrap().len(), 1);
}

#[test]
fn test_find_by_not_found() {
    let db = setup();
    create_user(&db, "a", None);
    assert!(User::find_by(&*db, "name", "a").unwrap().is_some());
    assert_eq!(User::find_by(&*db, "name", "zzz").unwrap(), None);
    assert_eq!(User::find(&*db, 404).unwrap(), None);
}

#[test]
fn test_scope() {
    let db = setup();
    create_user(&db, "young", Some(10));
    create_user(&db, "old", Some(80));

    let users = User::query().older_than(30).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["old"]);

    let users = User::query().scope(|q| q.filter("age <", 30)).all(&*db).unwrap();
    assert_eq!(names(&users), vec!["young"]);
}

// ============================================================================
// Grouping and aggregates
// ============================================================================

#[test]
fn test_group_having() {
    let db = setup();
    for name in ["A", "B", "B"] {
        create_user(&db, name, None);
    }

    let rows = User::select(["name"])
        .group_by(["name"])
        .having("count(name)", 2)
        .rows(&*db)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].try_get::<String>(0).unwrap(), "B");

    // grouped counts count groups
    assert_eq!(User::query().group_by(["name"]).count(&*db, None).unwrap(), 2);
}

#[test]
fn test_exists_and_count() {
    let db = setup();
    assert!(!User::exists(&*db).unwrap());
    assert_eq!(User::count(&*db, None).unwrap(), 0);

    let total = 25;
    for _ in 0..total {
        let name: String = Name().fake();
        create_user(&db, &name, None);
    }
    create_user(&db, "with age", Some(3));

    assert!(User::exists(&*db).unwrap());
    assert_eq!(User::count(&*db, None).unwrap(), total + 1);
    // COUNT(column) skips NULLs
    assert_eq!(User::count(&*db, Some("age")).unwrap(), 1);
    // pagination never limits an aggregate
    assert_eq!(User::query().limit(2).count(&*db, None).unwrap(), total + 1);
    assert!(!User::filter("age >", 100).exists(&*db).unwrap());
}

#[test]
fn test_select_subset_leaves_defaults() {
    let db = setup();
    create_user(&db, "a", Some(40));
    let users = User::select(["id", "name"]).all(&*db).unwrap();
    assert_eq!(users[0].name, "a");
    assert_eq!(users[0].age, None);
}

// ============================================================================
// Joins and explain
// ============================================================================

#[test]
fn test_join_filters_on_associated_table() {
    let db = setup();
    let alice = create_user(&db, "alice", None);
    let bob = create_user(&db, "bob", None);
    let (_, result) = Post::create(&*db, Params::new().set("user_id", alice.id).set("title", "rust"));
    result.unwrap();

    let users = User::query()
        .joins::<Post>()
        .filter("posts.title", "rust")
        .all(&*db)
        .unwrap();
    assert_eq!(users, vec![alice.clone()]);

    let users = User::query()
        .join(JoinKind::Left, "posts", "posts.user_id = users.id", ())
        .filter("posts.id IS NULL", ())
        .all(&*db)
        .unwrap();
    assert_eq!(users, vec![bob]);
}

#[test]
fn test_belongs_to_join() {
    let db = setup();
    let alice = create_user(&db, "alice", None);
    let bob = create_user(&db, "bob", None);
    let (post, result) = Post::create(&*db, Params::new().set("user_id", alice.id).set("title", "rust"));
    result.unwrap();
    let (_, result) = Post::create(&*db, Params::new().set("user_id", bob.id).set("title", "rust"));
    result.unwrap();

    let query = Post::query().joins::<User>().filter("users.name", "alice");
    assert_eq!(
        query.build().0,
        "SELECT posts.id, posts.user_id, posts.title FROM posts \
         INNER JOIN users ON users.id = posts.user_id WHERE users.name = ?"
    );
    assert_eq!(query.all(&*db).unwrap(), vec![post]);
}

#[test]
fn test_explain_plan() {
    let db = setup();
    let plan = User::filter("name", "a").explain_plan(&*db).unwrap();
    assert!(!plan.is_empty());
    assert!(User::query().explain().build().0.starts_with("EXPLAIN SELECT"));
}

#[test]
fn test_bad_sql_is_returned_undecoded() {
    let db = setup();
    let err = User::filter("no_such_column", 1).all(&*db).unwrap_err();
    assert!(matches!(err, ArError::Sqlite(_)));
}

#[test]
fn test_build_is_idempotent() {
    let query = User::filter("age >", 1).or("name LIKE", "a%").order_by("name", Order::Asc).limit(5);
    let (sql, args) = query.build();
    assert_eq!(query.build(), (sql.clone(), args.clone()));
    assert_eq!(sql.matches('?').count(), args.len());
}
