use anyhow::{Context, Result};
use baserow_client::BaserowClient;
use baserow_orm::{Database, SchemaMapping};
use blog::{Author, Post};
use tracing::info;

use std::{env, sync::Arc};

fn main() -> Result<()> {
    baserow_cli::init_tracing();

    let url = env::var("BASEROW_URL").unwrap_or_else(|_| "http://localhost".to_string());
    let token = env::var("BASEROW_TOKEN").context("BASEROW_TOKEN must hold a database token")?;
    let mapping_file = env::args().nth(1).unwrap_or_else(|| "mapping.json".to_string());

    let mapping = SchemaMapping::load(&mapping_file)?;
    let client = BaserowClient::new(&url)?.with_token(token);
    let db = Database::new(Arc::new(client), mapping);

    println!("==> published posts");
    let posts = db
        .select::<Post>()?
        .filter(Post::fields().published().boolean(true))?
        .order_by(Post::fields().title())?;
    for post in posts {
        let post = post?;
        println!(" -> {:?} {}", post.id, post.title);
    }

    println!("==> create a draft");
    let mut draft = Post {
        id: None,
        title: String::new(),
        body: String::new(),
        published: false,
    };
    draft.set_title("Hello from Rust")?;
    draft.set_body("Drafted by the blog demo.")?;
    db.save(&mut draft)?;
    info!(id = ?draft.id, "draft saved");
    println!(" -> draft = {draft:#?}");

    println!("==> authors and their posts");
    for author in db.select::<Author>()?.page_size(20)? {
        let author = author?;
        println!(" -> {} ({} posts)", author.name, author.posts.len());
        for post in &author.posts {
            println!("    - {}", post?.title);
        }
    }

    Ok(())
}
