//! Library for building a command line tool that generates schema mappings.
//!
//! Models are registered explicitly; the command line then selects them by
//! model id:
//!
//! ```no_run
//! # use baserow_orm::Model;
//! # #[derive(Debug, Model)]
//! # #[model(id = "blog.Post")]
//! # struct Post { id: Option<u64>, #[column("Title")] title: String }
//! baserow_cli::MappingCli::new()
//!     .model::<Post>()
//!     .parse_and_run()
//!     .unwrap();
//! ```

mod generate;

use anyhow::Result;
use baserow_orm::{Model, ModelSchema};
use clap::Parser;
use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

/// Mapping generator command line, parameterized by the models it knows.
#[derive(Debug, Default)]
pub struct MappingCli {
    models: IndexMap<String, &'static ModelSchema>,
}

impl MappingCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `M` selectable by its model id.
    pub fn model<M: Model>(mut self) -> Self {
        let schema = M::schema();
        self.models.insert(schema.id().to_string(), schema);
        self
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Parse the process arguments and run.
    pub fn parse_and_run(&self) -> Result<()> {
        init_tracing();
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse arguments from an iterator and run.
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli)
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, `warn` by default.
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(name = "baserow-orm")]
#[command(about = "Generate a schema mapping for Baserow ORM models")]
#[command(version)]
#[command(group(clap::ArgGroup::new("auth").required(true).args(["user", "jwt"])))]
struct Cli {
    /// The database name to use
    dbname: String,

    /// One or more model ids, each optionally followed by `:` and a table name
    #[arg(required = true)]
    models: Vec<String>,

    /// The URL of the Baserow instance
    #[arg(long)]
    url: String,

    /// The username to authenticate with
    #[arg(long)]
    user: Option<String>,

    /// The password of --user; prompted for if omitted
    #[arg(long, requires = "user")]
    password: Option<String>,

    /// A JWT to use instead of logging in with --user
    #[arg(long)]
    jwt: Option<String>,

    /// Write the mapping to this path instead of stdout
    #[arg(long)]
    write_to: Option<PathBuf>,

    /// Pretty-print the mapping
    #[arg(long)]
    indent: bool,
}
