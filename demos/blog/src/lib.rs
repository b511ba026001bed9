//! Models of a small blog kept in a Baserow database named "Blog".

use baserow_orm::{LinkedRow, Model};

#[derive(Debug, Model)]
#[model(id = "blog.Post", table = "Posts")]
pub struct Post {
    pub id: Option<u64>,

    #[column("Title")]
    pub title: String,

    #[column("Body")]
    pub body: String,

    #[column("Published")]
    pub published: bool,
}

#[derive(Debug, Model)]
#[model(id = "blog.Author", table = "Authors")]
pub struct Author {
    pub id: Option<u64>,

    #[column("Name")]
    pub name: String,

    #[foreign_key("Posts")]
    pub posts: LinkedRow<Post>,
}
