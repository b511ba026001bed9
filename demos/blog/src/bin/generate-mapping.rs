//! Generates the mapping file read by the `blog` binary:
//!
//! ```text
//! generate-mapping Blog blog.Post blog.Author --url http://localhost --user me --write-to mapping.json
//! ```

use blog::{Author, Post};

fn main() -> anyhow::Result<()> {
    baserow_cli::MappingCli::new()
        .model::<Post>()
        .model::<Author>()
        .parse_and_run()
}
