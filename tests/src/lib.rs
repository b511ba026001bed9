mod exec_log;
pub use exec_log::{Call, ExecLog};

pub mod models;

mod stub_client;
pub use stub_client::StubClient;

use baserow_orm::{types::FieldType, ModelMapping, SchemaMapping};
use serde_json::json;

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A backend with database "Blog" (1) holding "Posts" (10) and "Authors" (20).
///
/// Posts has `Title` (100), `Body` (101) and an undeclared `Views` (102);
/// Authors has `Name` (200) and a link field `Posts` (201).
pub fn blog() -> StubClient {
    let mut stub = StubClient::new();
    stub.add_database(1, "Blog");

    stub.add_table(1, 10, "Posts");
    stub.add_field(10, 100, "Title", FieldType::Text { text_default: String::new() });
    stub.add_field(10, 101, "Body", FieldType::LongText);
    stub.add_field(10, 102, "Views", FieldType::Other);

    stub.add_table(1, 20, "Authors");
    stub.add_field(20, 200, "Name", FieldType::Text { text_default: String::new() });
    stub.add_field(
        20,
        201,
        "Posts",
        FieldType::LinkRow {
            link_row_table: 10,
            link_row_related_field: None,
        },
    );

    stub
}

/// [`blog`] with `count` posts, ids starting at 1, titled `Post <id>`.
pub fn blog_with_posts(count: u64) -> StubClient {
    let mut stub = blog();
    for id in 1..=count {
        stub.add_row(
            10,
            json!({
                "id": id,
                "order": format!("{id}.00000000000000000000"),
                "field_100": format!("Post {id}"),
                "field_101": "...",
                "field_102": id * 10,
            }),
        );
    }
    stub
}

/// The mapping generated for [`models::Post`] and [`models::Author`] against [`blog`].
pub fn blog_mapping() -> SchemaMapping {
    let mut mapping = SchemaMapping::new(1);
    mapping.models.insert(
        "Post".to_string(),
        ModelMapping::with_fields(10, [("title".to_string(), 100), ("body".to_string(), 101)]),
    );
    mapping.models.insert(
        "Author".to_string(),
        ModelMapping::with_fields(20, [("name".to_string(), 200), ("posts".to_string(), 201)]),
    );
    mapping
}
