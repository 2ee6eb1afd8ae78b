//! Fields command - list the report schema.

use clap::Args;
use console::style;
use serde::Serialize;

use wellrep_core::Field;

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Print the schema as JSON
    #[arg(long)]
    json: bool,

    /// Include engine-only fields that are not part of the form
    #[arg(long)]
    all: bool,
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    label: &'static str,
}

pub async fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let fields: &[Field] = if args.all { &Field::ALL } else { &Field::SCHEMA };

    if args.json {
        let infos: Vec<FieldInfo> = fields
            .iter()
            .map(|f| FieldInfo {
                name: f.as_str(),
                label: f.label(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    for field in fields {
        println!("{:<26} {}", style(field.as_str()).cyan(), field.label());
    }

    Ok(())
}
