use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::Cell;

use eventform::{CustomEventForm, EventTemplate, FieldType, NanoIds, catalog};

use crate::context::ProjectContext;
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Browse the catalog",
        commands: &[
            "eventform templates list                    # Built-in and local templates",
            "eventform templates show wedding            # Field-by-field breakdown",
        ],
    },
    ExampleGroup {
        title: "Start a new form",
        commands: &[
            "eventform templates clone wedding --event-type \"My Wedding\" -o form.json",
            "eventform templates clone custom --event-type \"Charity Gala\"   # Blank form",
        ],
    },
];

#[derive(Subcommand)]
pub enum TemplatesCommands {
    /// List built-in and locally stored templates
    #[command(name = "list")]
    List,

    /// Show one template's field schema
    #[command(name = "show")]
    Show {
        /// Template key (e.g. wedding)
        key: String,
    },

    /// Scaffold a form JSON from a template, with fresh field ids
    #[command(name = "clone")]
    Clone {
        /// Template key, or "custom" for a blank form
        key: String,

        /// Event type for the new form
        #[arg(long)]
        event_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn handle_templates_commands(command: TemplatesCommands, output: &OutputManager) -> Result<()> {
    let ctx = ProjectContext::find()?;

    match command {
        TemplatesCommands::List => handle_list(&ctx, output).await?,
        TemplatesCommands::Show { key } => handle_show(&ctx, &key, output).await?,
        TemplatesCommands::Clone {
            key,
            event_type,
            output: output_path,
        } => handle_clone(&ctx, &key, &event_type, output_path, output).await?,
    }

    Ok(())
}

async fn all_templates(ctx: &ProjectContext) -> Result<Vec<EventTemplate>> {
    let mut templates: Vec<EventTemplate> = catalog::templates().to_vec();
    templates.extend(ctx.load_local_templates().await?);
    Ok(templates)
}

async fn handle_list(ctx: &ProjectContext, output: &OutputManager) -> Result<()> {
    let templates = all_templates(ctx).await?;

    if output.options.output_format == crate::output::OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    output.heading("Templates");
    let mut table = output.create_table();
    output.add_table_header(&mut table, vec!["Key", "Name", "Fields", "Description"]);
    for template in &templates {
        table.add_row(vec![
            Cell::new(&template.key),
            Cell::new(format!("{} {}", template.icon, template.name)),
            Cell::new(template.fields.len().to_string()),
            Cell::new(&template.description),
        ]);
    }
    println!("{table}");
    output.info(&format!("{} templates available", templates.len()));
    Ok(())
}

async fn handle_show(ctx: &ProjectContext, key: &str, output: &OutputManager) -> Result<()> {
    let templates = all_templates(ctx).await?;
    let template = templates
        .iter()
        .find(|template| template.key == key)
        .with_context(|| format!("No template named '{key}'. Try 'eventform templates list'."))?;

    if output.options.output_format == crate::output::OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(template)?);
        return Ok(());
    }

    output.heading(&format!("{} {}", template.icon, template.name));
    output.key_value("key", &template.key);
    output.key_value("description", &template.description);

    let mut table = output.create_table();
    output.add_table_header(&mut table, vec!["#", "Name", "Label", "Type", "Required"]);
    for (index, field) in template.fields.iter().enumerate() {
        table.add_row(vec![
            Cell::new((index + 1).to_string()),
            Cell::new(&field.name),
            Cell::new(&field.label),
            Cell::new(field.field_type.as_str()),
            Cell::new(if field.required { "yes" } else { "" }),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn handle_clone(
    ctx: &ProjectContext,
    key: &str,
    event_type: &str,
    output_path: Option<PathBuf>,
    output: &OutputManager,
) -> Result<()> {
    let templates = all_templates(ctx).await?;
    let template = templates.iter().find(|template| template.key == key);

    // Unknown keys intentionally fall through to a blank field list, the
    // same "custom" path the admin UI offers.
    let mut ids = NanoIds;
    let fields = match template {
        Some(template) => catalog::clone_fields(template, &mut ids),
        None => Vec::new(),
    };
    let template_name = template.map(|template| template.name.clone()).unwrap_or_default();

    let form = CustomEventForm::new(event_type, key, template_name, fields);
    let json = serde_json::to_string_pretty(&form)?;

    match output_path {
        Some(path) => {
            tokio::fs::write(&path, &json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!(
                "Created {} with {} fields from '{key}'",
                path.display(),
                form.form_fields.len()
            ));
            let theme_fields = form
                .form_fields
                .iter()
                .filter(|field| matches!(field.field_type, FieldType::ThemeCards | FieldType::FoodMenu))
                .count();
            if theme_fields > 0 {
                output.info("Theme card and food menu fields still need their options filled in");
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
