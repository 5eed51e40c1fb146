//! belongs-to / has-many accessors and associated builders.

use crate::common::{create_user, setup, Post, User};
use activerow::{ActiveRecord, Order, Params};

fn create_post(db: &activerow::test_helpers::TestDatabase, user: &User, title: &str) -> Post {
    let mut post: Post = user.build_related(Params::new().set("title", title)).unwrap();
    post.save(&**db).unwrap();
    post
}

#[test]
fn test_has_many_and_belongs_to() {
    let db = setup();
    let user = create_user(&db, "test", None);
    let post = create_post(&db, &user, "name");

    let posts: Vec<Post> = user.related_many(&*db).unwrap();
    assert_eq!(posts, vec![post.clone()]);

    let owner: Option<User> = post.related_one(&*db).unwrap();
    assert_eq!(owner, Some(user));
}

#[test]
fn test_has_many_scoped_to_owner() {
    let db = setup();
    let alice = create_user(&db, "alice", None);
    let bob = create_user(&db, "bob", None);
    create_post(&db, &alice, "first");
    create_post(&db, &alice, "second");
    create_post(&db, &bob, "third");

    let titles: Vec<String> = alice
        .find_related::<Post>()
        .order_by("title", Order::Asc)
        .all(&*db)
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["first", "second"]);

    assert_eq!(bob.find_related::<Post>().count(&*db, None).unwrap(), 1);
    assert_eq!(
        alice.find_related::<Post>().filter("title", "second").count(&*db, None).unwrap(),
        1
    );
}

#[test]
fn test_belongs_to_missing_parent() {
    // EDGE CASE: dangling foreign key reads as not found
    let db = setup();
    let mut post = Post {
        user_id: 42,
        title: "orphan".into(),
        ..Post::default()
    };
    post.save(&*db).unwrap();
    let owner: Option<User> = post.related_one(&*db).unwrap();
    assert_eq!(owner, None);
}

#[test]
fn test_build_related_is_unsaved() {
    let db = setup();
    let user = create_user(&db, "test", None);
    let post: Post = user.build_related(Params::new().set("title", "draft")).unwrap();

    assert!(post.is_new_record());
    assert_eq!(post.user_id, user.id);
    assert_eq!(Post::count(&*db, None).unwrap(), 0);
}

#[test]
fn test_build_related_bad_param() {
    let user = User {
        id: 1,
        name: "test".into(),
        ..User::default()
    };
    let errors = user
        .build_related::<Post>(Params::new().set("title", "x").set("body", "y"))
        .unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["body"]);
}
