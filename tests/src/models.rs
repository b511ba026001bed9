use baserow_orm::{LinkedRow, Model};

#[derive(Debug, Model)]
#[model(id = "Post", table = "Posts")]
pub struct Post {
    pub id: Option<u64>,

    #[column("Title")]
    pub title: String,

    #[column("Body")]
    pub body: String,
}

#[derive(Debug, Model)]
#[model(id = "Author", table = "Authors")]
pub struct Author {
    pub id: Option<u64>,

    #[column("Name")]
    pub name: String,

    #[foreign_key("Posts")]
    pub posts: LinkedRow<Post>,
}
