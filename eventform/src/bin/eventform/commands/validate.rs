use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Cell;
use serde_json::Value;

use eventform::{CustomEventForm, FieldDefinition, FormData, validate_submission};

use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Check a submission against a form",
    commands: &[
        "eventform validate --form form.json --submission reply.json",
        "eventform validate --form form.json --submission reply.json --output json",
    ],
}];

#[derive(Args)]
pub struct ValidateArgs {
    /// Form JSON: a full CustomEventForm or a bare field array
    #[arg(long)]
    pub form: PathBuf,

    /// Submission JSON: a raw value map or a stored Submission
    #[arg(long)]
    pub submission: PathBuf,
}

pub async fn handle_validate(args: ValidateArgs, output: &OutputManager) -> Result<()> {
    let fields = load_fields(&args.form).await?;
    let data = load_form_data(&args.submission).await?;

    match validate_submission(&fields, &data) {
        Ok(()) => {
            output.success(&format!(
                "Submission passes all checks for {} fields",
                fields.len()
            ));
            Ok(())
        }
        Err(error) => {
            if output.options.output_format == crate::output::OutputFormat::Json {
                let issues: Vec<_> = error
                    .issues
                    .iter()
                    .map(|issue| {
                        serde_json::json!({
                            "field": issue.field,
                            "code": issue.code,
                            "message": issue.message,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else {
                output.heading("Validation issues");
                let mut table = output.create_table();
                output.add_table_header(&mut table, vec!["Field", "Code", "Message"]);
                for issue in &error.issues {
                    table.add_row(vec![
                        Cell::new(&issue.field),
                        Cell::new(&issue.code),
                        Cell::new(&issue.message),
                    ]);
                }
                println!("{table}");
            }
            output.error(&format!("{} validation issue(s)", error.issues.len()));
            anyhow::bail!("submission rejected");
        }
    }
}

/// Accept either a full form record or a bare field array.
async fn load_fields(path: &Path) -> Result<Vec<FieldDefinition>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if let Ok(form) = serde_json::from_str::<CustomEventForm>(&content) {
        return Ok(form.form_fields);
    }
    serde_json::from_str::<Vec<FieldDefinition>>(&content)
        .with_context(|| format!("{} is neither a form nor a field array", path.display()))
}

/// Accept either a raw value map or a stored submission carrying `formData`.
pub async fn load_form_data(path: &Path) -> Result<FormData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    let map = match value {
        Value::Object(map) => map,
        _ => anyhow::bail!("{} does not contain a JSON object", path.display()),
    };
    if let Some(Value::Object(inner)) = map.get("formData") {
        return Ok(inner.clone());
    }
    Ok(map)
}
