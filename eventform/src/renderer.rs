//! Schema-driven rendering and submission-time validation.
//!
//! The renderer interprets a field list at submission time: [`render`]
//! produces one control descriptor per field for the UI host to draw, and
//! [`validate_submission`] checks a raw value map against the schema.
//! Values are keyed by `field.name`, not `field.id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::errors::{ValidationError, ValidationIssue, ValidationResult};
use crate::types::{
    DEFAULT_MAX_FILE_SIZE_MB, FieldDefinition, FieldType, FileKind, FoodCategory, FormData, ThemeCard,
};
use crate::validators::{is_valid_email, is_valid_url, matches_pattern, mime_matches};

/// Concrete input control for one field, dispatched on its type.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ControlKind {
    TextInput,
    EmailInput,
    PhoneInput,
    UrlInput,
    NumberInput {
        min: Option<f64>,
        max: Option<f64>,
    },
    DateInput,
    TimeInput,
    TextArea,
    SelectMenu {
        choices: Vec<String>,
    },
    RadioGroup {
        choices: Vec<String>,
    },
    CheckboxGroup {
        choices: Vec<String>,
    },
    FilePicker {
        accept: FileKind,
        max_size_mb: f64,
    },
    ThemeCardPicker {
        cards: Vec<ThemeCard>,
    },
    FoodMenuPicker {
        categories: Vec<FoodCategory>,
    },
}

/// One rendered control, bound to the submission value store by `name`.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedControl {
    pub field_id: String,
    pub name: String,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub control: ControlKind,
}

/// Produce one control descriptor per field. Unused `options` payloads on
/// non-option types are ignored rather than rejected; the editor is allowed
/// to orphan them.
pub fn render(fields: &[FieldDefinition]) -> Vec<RenderedControl> {
    fields.iter().map(render_field).collect()
}

fn render_field(field: &FieldDefinition) -> RenderedControl {
    let control = match field.field_type {
        FieldType::Text => ControlKind::TextInput,
        FieldType::Email => ControlKind::EmailInput,
        FieldType::Phone => ControlKind::PhoneInput,
        FieldType::Url => ControlKind::UrlInput,
        FieldType::Number => ControlKind::NumberInput {
            min: field.validation.min,
            max: field.validation.max,
        },
        FieldType::Date => ControlKind::DateInput,
        FieldType::Time => ControlKind::TimeInput,
        FieldType::Textarea => ControlKind::TextArea,
        FieldType::Select => ControlKind::SelectMenu {
            choices: field.options.choices().to_vec(),
        },
        FieldType::Radio => ControlKind::RadioGroup {
            choices: field.options.choices().to_vec(),
        },
        FieldType::Checkbox => ControlKind::CheckboxGroup {
            choices: field.options.choices().to_vec(),
        },
        FieldType::File => ControlKind::FilePicker {
            accept: field.validation.file_types.unwrap_or_default(),
            max_size_mb: field.validation.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE_MB),
        },
        FieldType::ThemeCards => ControlKind::ThemeCardPicker {
            cards: field.options.theme_cards().to_vec(),
        },
        FieldType::FoodMenu => ControlKind::FoodMenuPicker {
            categories: field.options.food_categories().to_vec(),
        },
    };

    RenderedControl {
        field_id: field.id.clone(),
        name: field.name.clone(),
        label: field.label.clone(),
        required: field.required,
        placeholder: if field.placeholder.is_empty() {
            None
        } else {
            Some(field.placeholder.clone())
        },
        control,
    }
}

fn numeric_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(string) => string.parse::<f64>().ok(),
        _ => None,
    }
}

/// Number of selected entries in a multi-select value. Food-menu selections
/// arrive as `{category: [item, ...]}` maps, checkbox and theme-card
/// selections as plain arrays.
fn selection_count(value: &Value) -> usize {
    match value {
        Value::Array(entries) => entries.len(),
        Value::Object(map) => map
            .values()
            .map(|entry| match entry {
                Value::Array(items) => items.len(),
                Value::Null => 0,
                _ => 1,
            })
            .sum(),
        _ => 0,
    }
}

fn is_missing(value: Option<&Value>, field_type: FieldType) -> bool {
    let Some(value) = value else { return true };
    match value {
        Value::Null => true,
        Value::String(string) => string.trim().is_empty(),
        Value::Array(_) | Value::Object(_)
            if matches!(
                field_type,
                FieldType::Checkbox | FieldType::ThemeCards | FieldType::FoodMenu
            ) =>
        {
            selection_count(value) == 0
        }
        _ => false,
    }
}

/// Validate a raw submission against the schema. All fields are checked in
/// one pass so the UI can render every inline error at once; any issue
/// blocks submission entirely.
pub fn validate_submission(fields: &[FieldDefinition], data: &FormData) -> ValidationResult<()> {
    let mut issues = Vec::new();
    for field in fields {
        validate_field_value(field, data.get(&field.name), &mut issues);
    }
    if issues.is_empty() { Ok(()) } else { Err(ValidationError::new(issues)) }
}

fn validate_field_value(field: &FieldDefinition, value: Option<&Value>, issues: &mut Vec<ValidationIssue>) {
    if is_missing(value, field.field_type) {
        if field.required {
            let (code, message) = match field.field_type {
                FieldType::FoodMenu => ("validation.food_menu", "at least one item required"),
                FieldType::ThemeCards => ("validation.theme_cards", "at least one theme required"),
                _ => ("validation.required", "field is required"),
            };
            issues.push(ValidationIssue::new(field.name.clone(), code, message));
        }
        return;
    }
    let Some(value) = value else { return };

    match field.field_type {
        FieldType::Number => match numeric_from_value(value) {
            Some(candidate) => {
                if let Some(min) = field.validation.min
                    && candidate < min
                {
                    issues.push(ValidationIssue::new(
                        field.name.clone(),
                        "validation.range",
                        format!("value must be at least {min}"),
                    ));
                }
                if let Some(max) = field.validation.max
                    && candidate > max
                {
                    issues.push(ValidationIssue::new(
                        field.name.clone(),
                        "validation.range",
                        format!("value must be at most {max}"),
                    ));
                }
            }
            None => {
                issues.push(ValidationIssue::new(
                    field.name.clone(),
                    "validation.number",
                    "value must be a number",
                ));
            }
        },
        FieldType::Email => {
            if let Some(candidate) = value.as_str()
                && !is_valid_email(candidate)
            {
                issues.push(ValidationIssue::new(
                    field.name.clone(),
                    "validation.email",
                    "value must be a valid email address",
                ));
            }
        }
        FieldType::Url => {
            if let Some(candidate) = value.as_str()
                && !is_valid_url(candidate)
            {
                issues.push(ValidationIssue::new(
                    field.name.clone(),
                    "validation.url",
                    "value must be a valid URL",
                ));
            }
        }
        FieldType::File => validate_file_value(field, value, issues),
        _ => {}
    }

    if field.field_type.is_text_like()
        && let Some(pattern) = field.validation.pattern.as_deref()
        && let Some(candidate) = value.as_str()
        && !matches_pattern(pattern, candidate)
    {
        issues.push(ValidationIssue::new(
            field.name.clone(),
            "validation.pattern",
            format!("value does not match pattern {pattern}"),
        ));
    }
}

/// A file value is either an uploaded-object URL string (accepted as-is,
/// the upload pipeline already vetted it) or a client-side preview object
/// `{name, type, size, dataUrl}` checked for kind and size here.
fn validate_file_value(field: &FieldDefinition, value: &Value, issues: &mut Vec<ValidationIssue>) {
    let Value::Object(candidate) = value else { return };

    let file_name = candidate.get("name").and_then(Value::as_str).unwrap_or_default();
    let declared = candidate.get("type").and_then(Value::as_str);
    let kind = field.validation.file_types.unwrap_or_default();
    if !mime_matches(kind, declared, file_name) {
        issues.push(ValidationIssue::new(
            field.name.clone(),
            "validation.file_type",
            format!("file type must be {kind:?}"),
        ));
    }

    let max_mb = field.validation.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);
    if let Some(size) = candidate.get("size").and_then(Value::as_f64)
        && size > max_mb * 1024.0 * 1024.0
    {
        issues.push(ValidationIssue::new(
            field.name.clone(),
            "validation.file_size",
            format!("file must not exceed {max_mb} MB"),
        ));
    }
}

/// Validate, then assemble the flat submission payload: every provided field
/// value keyed by `field.name`, plus the top-level `eventType`. Validation
/// failure blocks assembly entirely; there is no partial submit.
pub fn assemble_submission(fields: &[FieldDefinition], values: &FormData, event_type: &str) -> ValidationResult<FormData> {
    validate_submission(fields, values)?;

    let mut payload = FormData::new();
    payload.insert("eventType".to_string(), Value::String(event_type.to_string()));
    for field in fields {
        if let Some(value) = values.get(&field.name) {
            payload.insert(field.name.clone(), value.clone());
        }
    }
    Ok(payload)
}
