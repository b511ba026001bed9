use baserow_orm::{Database, Field, LinkedRow, Model, Ref};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::{
    blog_mapping, blog_with_posts,
    models::{Author, Post},
    Call, StubClient,
};

use std::sync::Arc;

fn setup() -> (Arc<StubClient>, Database) {
    tests::init_logging();
    let mut stub = blog_with_posts(3);
    stub.add_row(
        20,
        json!({
            "id": 1,
            "order": "1.00000000000000000000",
            "field_200": "Ada",
            "field_201": [
                {"id": 3, "value": "Post 3"},
                {"id": 1, "value": "Post 1"},
            ],
        }),
    );
    let stub = Arc::new(stub);
    let db = Database::new(stub.clone(), blog_mapping());
    (stub, db)
}

fn author(db: &Database) -> Author {
    db.select::<Author>().unwrap().first().unwrap()
}

#[test]
fn links_are_loaded_on_access() {
    let (stub, db) = setup();
    let author = author(&db);

    assert_eq!(author.name, "Ada");
    assert_eq!(author.posts.len(), 2);
    assert_eq!(author.posts.ids().collect::<Vec<_>>(), [3, 1]);
    assert!(stub.log().row_fetches().is_empty());

    let post = author.posts.get(0).unwrap().unwrap();
    assert_eq!(post.title, "Post 3");
    assert_eq!(stub.log().row_fetches(), [3]);
    assert!(author.posts.is_cached(0));
    assert!(!author.posts.is_cached(1));
}

#[test]
fn each_link_is_fetched_once() {
    let (stub, db) = setup();
    let author = author(&db);

    for _ in 0..2 {
        let titles: Vec<_> = author
            .posts
            .iter()
            .map(|post| post.map(|post| post.title.clone()))
            .collect::<baserow_orm::Result<_>>()
            .unwrap();
        assert_eq!(titles, ["Post 3", "Post 1"]);
    }

    assert_eq!(stub.log().row_fetches(), [3, 1]);
    assert!(author.posts.get(2).is_none());
}

#[test]
fn failed_fetch_is_retried() {
    let (stub, db) = setup();
    let author = author(&db);

    stub.fail_next(baserow_orm::Error::api("ERROR_ROW_DOES_NOT_EXIST", "gone"));
    assert!(author.posts.get(1).unwrap().unwrap_err().is_api());
    assert!(!author.posts.is_cached(1));

    assert_eq!(author.posts.get(1).unwrap().unwrap().id, Some(1));
    assert_eq!(stub.log().row_fetches(), [1, 1]);
}

#[test]
fn links_to_deleted_rows_fail_on_access() {
    let (_stub, db) = setup();
    let mut author = author(&db);
    author.posts = LinkedRow::new(
        Some(db.clone()),
        vec![Ref {
            id: 42,
            value: Value::Null,
        }],
    );

    let err = author.posts.get(0).unwrap().unwrap_err();
    assert_eq!(err.api_error_code(), Some("ERROR_ROW_DOES_NOT_EXIST"));
}

#[test]
fn detached_links_only_serve_cached_rows() {
    let refs = vec![
        Ref {
            id: 1,
            value: json!("Post 1"),
        },
        Ref {
            id: 2,
            value: json!("Post 2"),
        },
    ];
    let cached = Post {
        id: Some(1),
        title: "Post 1".to_string(),
        body: String::new(),
    };
    let link = LinkedRow::with_cache(None, refs, [Some(cached), None]);

    assert_eq!(link.get(0).unwrap().unwrap().title, "Post 1");

    let err = link.get(1).unwrap().unwrap_err();
    assert!(err.is_detached_link());
    assert_eq!(
        err.to_string(),
        "cannot load linked row 2: collection is not bound to a database"
    );
}

#[test]
fn null_link_value_is_empty() {
    let link = LinkedRow::<Post>::from_backend(None, Value::Null).unwrap();
    assert!(link.is_empty());

    let err = LinkedRow::<Post>::from_backend(None, json!("Post 1")).unwrap_err();
    assert!(err.is_type_conversion());
}

#[test]
fn links_are_written_as_row_ids() {
    let (stub, db) = setup();
    let mut author = author(&db);
    author.set_name("Grace").unwrap();
    db.save(&mut author).unwrap();

    let Some(Call::UpdateTableRow { row_id, record, .. }) = stub.log().calls().pop() else {
        panic!("expected an update");
    };
    assert_eq!(row_id, 1);
    assert_eq!(
        Value::Object(record),
        json!({"field_200": "Grace", "field_201": [3, 1]})
    );
}

#[test]
fn assigning_new_rows_is_unsupported() {
    let (_stub, db) = setup();
    let mut author = author(&db);

    let err = author.set_posts(Vec::<Post>::new()).unwrap_err();
    assert!(err.is_unsupported_feature());
    assert_eq!(author.posts.len(), 2);
}

#[test]
fn link_columns_know_their_target() {
    let posts = Author::fields().posts();
    assert!(posts.is_foreign_key());
    assert_eq!(posts.target().map(|schema| schema.id()), Some(Post::model_id()));
    assert!(!Author::fields().name().is_foreign_key());
}
