use baserow_orm::{Database, Model, ModelMapping, Record, Row};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::{
    blog, blog_mapping,
    models::{Author, Post},
};

use std::sync::Arc;

#[derive(Debug, Model)]
#[model(id = "FeaturedPost")]
struct FeaturedPost {
    id: Option<u64>,

    #[inherit]
    post: Post,

    #[column("Featured")]
    featured: bool,
}

#[derive(Debug, Model)]
#[model(id = "Stat", table = "Stats")]
struct Stat {
    id: Option<u64>,

    #[column("Views")]
    views: u64,

    #[column("Rating")]
    rating: Option<f64>,
}

fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}

fn row(value: Value) -> Row {
    match value {
        Value::Object(row) => row,
        _ => unreachable!(),
    }
}

#[test]
fn load_from_record() {
    let post = Post::load(None, Some(4), record(json!({"title": "Hi", "body": "there"}))).unwrap();
    assert_eq!(post.id, Some(4));
    assert_eq!(post.title, "Hi");
    assert_eq!(post.body, "there");
}

#[test]
fn missing_attribute() {
    let err = Post::load(None, None, record(json!({"title": "Hi"}))).unwrap_err();
    assert!(err.is_invalid_record());
    assert_eq!(err.to_string(), "Post: missing attribute 'body'");
}

#[test]
fn unrecognized_attribute() {
    let err = Post::load(
        None,
        None,
        record(json!({"title": "Hi", "body": "", "views": 3})),
    )
    .unwrap_err();
    assert!(err.is_invalid_record());
    assert_eq!(err.to_string(), "Post: unrecognized attribute 'views'");
}

#[test]
fn keys_are_checked_before_values() {
    let err = Post::load(None, None, record(json!({"title": [1, 2]}))).unwrap_err();
    assert!(err.is_invalid_record());
    assert!(!err.is_type_conversion());
}

#[test]
fn numbers_load_from_decimal_strings() {
    let stat = Stat::load(None, Some(1), record(json!({"views": "12", "rating": "1.50"}))).unwrap();
    assert_eq!((stat.views, stat.rating), (12, Some(1.5)));

    let err = Stat::load(None, None, record(json!({"views": "many", "rating": null}))).unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(
        err.to_string(),
        "attribute 'views' of Stat: cannot convert string to u64"
    );
}

#[test]
fn conversion_failure_names_the_attribute() {
    let err = FeaturedPost::load(
        None,
        None,
        record(json!({"title": "Hi", "body": "", "featured": "yes"})),
    )
    .unwrap_err();
    assert!(err.is_type_conversion());
    assert!(
        err.to_string()
            .starts_with("attribute 'featured' of FeaturedPost: "),
        "{err}"
    );
}

#[test]
fn inherited_attributes() {
    let schema = FeaturedPost::schema();
    let mut attrs: Vec<_> = schema.columns().keys().map(String::as_str).collect();
    attrs.sort();
    assert_eq!(attrs, ["body", "featured", "title"]);
    assert_eq!(schema.table_name(), Some("Posts"));
    assert_eq!(FeaturedPost::description().unwrap().table_name(), "Posts");

    let featured = FeaturedPost::load(
        None,
        Some(9),
        record(json!({"title": "Hi", "body": "there", "featured": true})),
    )
    .unwrap();
    assert_eq!(featured.id, Some(9));
    assert_eq!(featured.post.id, Some(9));
    assert_eq!(featured.post.title, "Hi");
    assert!(featured.featured);

    assert_eq!(
        serde_json::to_value(featured.as_dict().unwrap()).unwrap(),
        json!({"id": 9, "title": "Hi", "body": "there", "featured": true})
    );
}

#[test]
fn saving_assigns_the_id_to_bases() {
    let mut mapping = blog_mapping();
    mapping.models.insert(
        "FeaturedPost".to_string(),
        ModelMapping::with_fields(
            10,
            [
                ("title".to_string(), 100),
                ("body".to_string(), 101),
                ("featured".to_string(), 103),
            ],
        ),
    );
    let db = Database::new(Arc::new(blog()), mapping);

    let mut featured = FeaturedPost::load(
        None,
        None,
        record(json!({"title": "Hi", "body": "there", "featured": true})),
    )
    .unwrap();
    db.save(&mut featured).unwrap();

    assert_eq!(featured.id, Some(1000));
    assert_eq!(featured.post.id, Some(1000));
}

#[test]
fn inherited_columns_share_placeholders() {
    let title = FeaturedPost::column("title").unwrap();
    assert_eq!(title.id(), Post::fields().title().id());
    assert_ne!(FeaturedPost::fields().featured().id(), title.id());
}

#[test]
fn placeholders_are_unique() {
    let title = Post::fields().title();
    assert!(title.id().starts_with("Title."));
    assert_eq!(title.name(), "Title");
    assert_ne!(title.id(), Author::fields().name().id());
    assert_ne!(title.id(), baserow_orm::Column::new("Title").id());
}

#[test]
fn setters_convert_values() {
    let mut post = Post::load(None, None, record(json!({"title": "", "body": ""}))).unwrap();
    post.set_title("Hi").unwrap();
    post.set_body(String::from("there")).unwrap();
    assert_eq!((post.title.as_str(), post.body.as_str()), ("Hi", "there"));
}

#[test]
fn rows_are_decoded_by_field_id() {
    let db = Database::new(Arc::new(blog()), blog_mapping());

    let post: Post = db
        .build_instance(row(json!({
            "id": 1,
            "order": "1.00000000000000000000",
            "field_101": "there",
            "field_100": "Hi",
            "field_102": 30,
        })))
        .unwrap();
    assert_eq!((post.id, post.title.as_str(), post.body.as_str()), (Some(1), "Hi", "there"));
}

#[test]
fn row_without_id() {
    let db = Database::new(Arc::new(blog()), blog_mapping());

    let err = db
        .build_instance::<Post>(row(json!({"field_100": "Hi", "field_101": ""})))
        .unwrap_err();
    assert!(err.is_invalid_result());
}

#[test]
fn row_with_user_field_names() {
    let db = Database::new(Arc::new(blog()), blog_mapping());

    let err = db
        .build_instance::<Post>(row(json!({"id": 1, "Title": "Hi", "field_101": ""})))
        .unwrap_err();
    assert!(err.is_invalid_result());
    assert_eq!(err.to_string(), "invalid result: unexpected key 'Title' in row 1");
}

#[test]
fn row_missing_a_mapped_field() {
    let db = Database::new(Arc::new(blog()), blog_mapping());

    let err = db
        .build_instance::<Post>(row(json!({"id": 1, "field_100": "Hi"})))
        .unwrap_err();
    assert_eq!(err.to_string(), "Post: missing attribute 'body'");
}
