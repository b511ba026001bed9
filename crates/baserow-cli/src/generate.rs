use crate::{Cli, MappingCli};

use anyhow::{bail, Result};
use baserow_client::BaserowClient;
use baserow_orm::{generate_mapping, Client, ModelDescription, SchemaMapping};
use console::style;
use dialoguer::{theme::ColorfulTheme, Password};
use tracing::debug;

impl MappingCli {
    pub(crate) fn run(&self, cli: Cli) -> Result<()> {
        let mut client = BaserowClient::new(&cli.url)?;

        if let Some(user) = &cli.user {
            let password = match &cli.password {
                Some(password) => password.clone(),
                None => Password::with_theme(&password_theme())
                    .with_prompt(format!("Password for {user} at {}", client.url()))
                    .interact()?,
            };
            client.login(user, &password, None)?;
        } else if let Some(jwt) = &cli.jwt {
            client.set_jwt(jwt);
        }

        let mapping = self.generate(&client, &cli.dbname, &cli.models)?;

        match &cli.write_to {
            Some(path) => {
                mapping.save(path, cli.indent)?;
                eprintln!(
                    "  {} {}",
                    style("✔").green().bold(),
                    style(format!("Mapping written to {}", path.display())).dim()
                );
            }
            None => println!("{}", mapping.to_json(cli.indent)?),
        }

        Ok(())
    }

    /// Generates the mapping of the models selected by `specs`.
    pub fn generate(
        &self,
        client: &dyn Client,
        database_name: &str,
        specs: &[String],
    ) -> Result<SchemaMapping> {
        let descriptions = self.descriptions(specs)?;
        Ok(generate_mapping(client, database_name, descriptions)?)
    }

    /// Resolves `model_id[:table_name]` specs against the registered models.
    /// Without a table name, the model's declared table is used.
    pub fn descriptions(&self, specs: &[String]) -> Result<Vec<ModelDescription>> {
        specs
            .iter()
            .map(|spec| {
                let (model_id, table_name) = match spec.split_once(':') {
                    Some((model_id, table_name)) => (model_id, Some(table_name)),
                    None => (spec.as_str(), None),
                };

                let Some(schema) = self.models.get(model_id) else {
                    bail!(
                        "unknown model '{model_id}'; registered models: {}",
                        self.models().collect::<Vec<_>>().join(", ")
                    );
                };
                debug!(model = model_id, table = ?table_name, "selected model");

                Ok(match table_name {
                    Some(table_name) => schema.of(table_name),
                    None => schema.description()?,
                })
            })
            .collect()
    }
}

fn password_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("🔒".to_string()).yellow(),
        prompt_style: console::Style::new().bold(),
        error_prefix: style("✖".to_string()).red().bold(),
        ..Default::default()
    }
}
