use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;

use eventform::{DisplayValue, humanize_key, normalize};

use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Preview the review screen",
    commands: &[
        "eventform normalize reply.json              # Collapse suffixed keys",
        "eventform normalize reply.json --output json",
    ],
}];

#[derive(Args)]
pub struct NormalizeArgs {
    /// Submission JSON: a raw value map or a stored Submission
    pub file: PathBuf,
}

pub async fn handle_normalize(args: NormalizeArgs, output: &OutputManager) -> Result<()> {
    let data = super::validate::load_form_data(&args.file).await?;
    let entries = normalize(&data);

    if output.options.output_format == crate::output::OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output.heading("Normalized submission");
    let mut table = output.create_table();
    output.add_table_header(&mut table, vec!["Field", "Value"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(humanize_key(&entry.key)),
            Cell::new(render_value(&entry.value)),
        ]);
    }
    println!("{table}");
    output.info(&format!("{} fields after normalization", entries.len()));
    Ok(())
}

fn render_value(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Chips { entries } | DisplayValue::ItemChips { entries } => entries.join(", "),
        DisplayValue::Pretty { json } => json.clone(),
        DisplayValue::Text { text } => text.clone(),
    }
}
