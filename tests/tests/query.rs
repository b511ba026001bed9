use baserow_orm::{Database, Error, FilterMode, FilterType, Query, Result};
use pretty_assertions::assert_eq;
use tests::{blog, blog_mapping, blog_with_posts, models::Post, Call, StubClient};

use std::sync::Arc;

fn setup(stub: StubClient) -> (Arc<StubClient>, Database) {
    tests::init_logging();
    let stub = Arc::new(stub);
    let db = Database::new(stub.clone(), blog_mapping());
    (stub, db)
}

fn titles(query: Query<Post>) -> Vec<String> {
    query
        .map(|post| post.map(|post| post.title))
        .collect::<Result<_>>()
        .unwrap()
}

#[test]
fn pages_are_yielded_in_order() {
    let (stub, db) = setup(blog_with_posts(5));

    let query = db.select::<Post>().unwrap().page_size(2).unwrap();
    assert_eq!(
        titles(query),
        ["Post 1", "Post 2", "Post 3", "Post 4", "Post 5"]
    );

    let pages: Vec<_> = stub.log().list_requests().iter().map(|r| r.page).collect();
    assert_eq!(pages, [None, Some(2), Some(3)]);
}

#[test]
fn empty_result_fetches_once() {
    let (stub, db) = setup(blog());

    let mut query = db.select::<Post>().unwrap();
    assert!(query.next().is_none());
    assert!(query.next().is_none());

    assert_eq!(stub.log().list_requests().len(), 1);
}

#[test]
fn nothing_is_fetched_before_iteration() {
    let (stub, db) = setup(blog_with_posts(1));

    let query = db.select::<Post>().unwrap().page_size(10).unwrap();
    assert!(!query.is_executed());
    assert!(stub.log().is_empty());

    drop(query);
    assert!(stub.log().is_empty());
}

#[test]
fn unmapped_fields_are_dropped() {
    let (_stub, db) = setup(blog_with_posts(1));

    let post = db.select::<Post>().unwrap().first().unwrap();
    assert_eq!(post.id, Some(1));
    assert_eq!(post.title, "Post 1");
    assert_eq!(post.body, "...");
}

#[test]
fn filters_are_sent_with_field_references() {
    let (stub, db) = setup(blog_with_posts(3));

    let fields = Post::fields();
    let query = db
        .select::<Post>()
        .unwrap()
        .filter(fields.title().contains("Post"))
        .unwrap()
        .filter(fields.body().not_empty())
        .unwrap()
        .filter_type(FilterType::Or)
        .unwrap()
        .order_by_desc(fields.title())
        .unwrap();
    assert_eq!(titles(query).len(), 3);

    let request = &stub.log().list_requests()[0];
    let filters: Vec<_> = request
        .filters
        .iter()
        .map(|f| (f.field.as_str(), f.mode))
        .collect();
    assert_eq!(
        filters,
        [
            ("field_100", FilterMode::Contains),
            ("field_101", FilterMode::NotEmpty)
        ]
    );
    assert_eq!(request.filter_type, Some(FilterType::Or));
    assert_eq!(request.order_by, Some(vec!["-field_100".to_string()]));
}

#[test]
fn raw_field_filters_pass_through() {
    let (stub, db) = setup(blog_with_posts(1));

    let filter = baserow_orm::Filter::new("field_102", FilterMode::HigherThan, Some(5.into()));
    let query = db.select::<Post>().unwrap().filter(filter.clone()).unwrap();
    assert_eq!(titles(query).len(), 1);

    assert_eq!(stub.log().list_requests()[0].filters, [filter]);
}

#[test]
fn translation_is_idempotent() {
    let (_stub, db) = setup(blog());
    db.select::<Post>().unwrap();

    let filter = Post::fields().title().equal("Hi");
    let once = db.translate_filter(&filter);
    assert_eq!(once.field, "field_100");
    assert_eq!(db.translate_filter(&once), once);

    let unregistered = baserow_orm::Column::new("Title").equal("Hi");
    assert_eq!(db.translate_filter(&unregistered), unregistered);
}

#[test]
fn mutating_after_execution_fails() {
    let (_stub, db) = setup(blog_with_posts(3));

    let mut query = db.select::<Post>().unwrap();
    query.next().unwrap().unwrap();
    assert!(query.is_executed());

    let err = query.page_size(5).unwrap_err();
    assert!(err.is_query_executed());
    assert_eq!(err.to_string(), "query has already been executed");

    let mut query = db.select::<Post>().unwrap();
    query.next();
    let err = query.filter(Post::fields().title().empty()).unwrap_err();
    assert!(err.is_query_executed());
}

#[test]
fn first_on_empty_result() {
    let (_stub, db) = setup(blog());

    let err = db.select::<Post>().unwrap().first().unwrap_err();
    assert!(err.is_no_row_returned());
    assert!(!err.is_query_executed());
}

#[test]
fn first_fetches_a_single_row() {
    let (stub, db) = setup(blog_with_posts(3));

    let post = db.select::<Post>().unwrap().first().unwrap();
    assert_eq!(post.title, "Post 1");

    let requests = stub.log().list_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].size, Some(1));

    // Other queries keep their own page size.
    let query = db.select::<Post>().unwrap();
    assert_eq!(titles(query).len(), 3);
    assert_eq!(stub.log().list_requests()[1].size, None);
}

#[test]
fn first_after_execution_fails() {
    let (_stub, db) = setup(blog_with_posts(2));

    let mut query = db.select::<Post>().unwrap();
    query.next();
    assert!(query.first().unwrap_err().is_query_executed());
}

#[test]
fn fetch_error_ends_iteration() {
    let (stub, db) = setup(blog_with_posts(4));

    let mut query = db.select::<Post>().unwrap().page_size(2).unwrap();
    assert!(query.next().unwrap().is_ok());
    assert!(query.next().unwrap().is_ok());

    stub.fail_next(Error::api("ERROR_TABLE_DOES_NOT_EXIST", "gone"));
    let err = query.next().unwrap().unwrap_err();
    assert_eq!(err.api_error_code(), Some("ERROR_TABLE_DOES_NOT_EXIST"));
    assert!(query.next().is_none());
    assert_eq!(stub.log().count(|c| matches!(c, Call::ListTableRows { .. })), 2);
}

#[test]
fn unmapped_model_cannot_be_selected() {
    let stub = Arc::new(blog());
    let db = Database::new(stub, baserow_orm::SchemaMapping::new(1));

    let err = db.select::<Post>().unwrap_err();
    assert!(err.is_schema_not_found());
    assert_eq!(err.to_string(), "model 'Post' is not part of the schema mapping");
}
