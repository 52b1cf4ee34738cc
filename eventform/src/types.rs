use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::id::generate_entity_id;

/// Submission values, keyed by `FieldDefinition.name`.
pub type FormData = Map<String, Value>;

/// Closed set of input kinds a form field can take. The wire representation
/// is camelCase to match the booking API (`themeCards`, `foodMenu`).
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Email,
    Phone,
    Date,
    Time,
    Select,
    Radio,
    Checkbox,
    Textarea,
    File,
    Url,
    ThemeCards,
    FoodMenu,
}

impl FieldType {
    /// Types whose `options` payload is a list of plain string choices.
    pub fn has_choice_options(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }

    /// Types validated against an optional regex pattern.
    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Url | FieldType::Textarea
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Textarea => "textarea",
            FieldType::File => "file",
            FieldType::Url => "url",
            FieldType::ThemeCards => "themeCards",
            FieldType::FoodMenu => "foodMenu",
        }
    }
}

/// A selectable image tile inside a `themeCards` field.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCard {
    pub name: String,
    /// Data URI preview or an externally uploaded object URL.
    pub image: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryType {
    #[default]
    Veg,
    NonVeg,
    Vegan,
    Egg,
    Seafood,
    Jain,
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

/// One dish inside a food-menu category.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dietary_type: DietaryType,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub is_popular: bool,
}

/// Two-level grouping used by the `foodMenu` field type.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodCategory {
    pub category_name: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

/// Options payload of a field, discriminated by the sibling `field_type`.
///
/// The wire shape is a bare JSON array whose element type depends on the
/// field type, so this deserializes untagged. Accessors are lenient: a
/// mismatched shape reads as empty rather than failing, because the editor
/// permits type switches that orphan a previously edited payload.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum OptionsPayload {
    #[default]
    None,
    ThemeCards(Vec<ThemeCard>),
    FoodCategories(Vec<FoodCategory>),
    StringChoices(Vec<String>),
}

impl OptionsPayload {
    pub fn is_none(&self) -> bool {
        matches!(self, OptionsPayload::None)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OptionsPayload::None => true,
            OptionsPayload::ThemeCards(cards) => cards.is_empty(),
            OptionsPayload::FoodCategories(categories) => categories.is_empty(),
            OptionsPayload::StringChoices(choices) => choices.is_empty(),
        }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            OptionsPayload::StringChoices(choices) => choices,
            _ => &[],
        }
    }

    pub fn theme_cards(&self) -> &[ThemeCard] {
        match self {
            OptionsPayload::ThemeCards(cards) => cards,
            _ => &[],
        }
    }

    pub fn food_categories(&self) -> &[FoodCategory] {
        match self {
            OptionsPayload::FoodCategories(categories) => categories,
            _ => &[],
        }
    }
}

/// File-kind restriction for `file` fields. `All` disables the MIME check.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    All,
    Image,
    Document,
    Video,
    Audio,
}

/// Default upload ceiling, in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;

/// Sparse per-field constraint record. Which keys are populated depends on
/// the field type: `min`/`max` for numbers, `pattern` for text-like fields,
/// `file_types`/`max_file_size` for files.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_types: Option<FileKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<f64>,
}

impl FieldValidation {
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.pattern.is_none()
            && self.file_types.is_none()
            && self.max_file_size.is_none()
    }
}

/// One form field. `id` is stable across an editing session; `name` is the
/// machine key used in the submission payload.
///
/// `name` uniqueness within a template is deliberately NOT enforced: two
/// fields sharing a name silently overwrite each other in the submitted
/// payload, which the admin may rely on. See DESIGN.md.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "OptionsPayload::is_none")]
    pub options: OptionsPayload,
    #[serde(default, skip_serializing_if = "FieldValidation::is_empty")]
    pub validation: FieldValidation,
}

impl FieldDefinition {
    /// A blank text field, as produced by the editor's AddField command.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// A named, ordered blueprint of fields. Predefined templates are immutable;
/// selecting one clones its fields with fresh ids so edits never touch the
/// blueprint.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTemplate {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

/// An admin-authored form, persisted on create and immutable afterwards.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventForm {
    pub id: String,
    pub event_type: String,
    /// Key of the template the form was cloned from ("custom" when built
    /// from scratch).
    pub template: String,
    pub template_name: String,
    pub form_fields: Vec<FieldDefinition>,
    pub created_at: DateTime<Utc>,
}

impl CustomEventForm {
    pub fn new(
        event_type: impl Into<String>,
        template: impl Into<String>,
        template_name: impl Into<String>,
        form_fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            id: generate_entity_id(),
            event_type: event_type.into(),
            template: template.into(),
            template_name: template_name.into(),
            form_fields,
            created_at: Utc::now(),
        }
    }
}

/// Review state of a customer submission.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
}

impl SubmissionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Completed => "completed",
        }
    }
}

/// Contact details rendered in the submission header, separately from the
/// normalized field values.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

impl UserInfo {
    /// Lift the well-known contact keys out of a raw submission payload.
    pub fn from_form_data(form_data: &FormData) -> Self {
        let text = |key: &str| {
            form_data
                .get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            name: text("name"),
            email: text("email"),
            mobile_number: text("mobileNumber"),
        }
    }
}

/// A completed instance of a form, filled by an end user and stored
/// separately from the template.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub event_type: String,
    pub template_name: String,
    pub form_data: FormData,
    #[serde(default)]
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub user_info: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_type_wire_names_are_camel_case() {
        assert_eq!(serde_json::to_value(FieldType::ThemeCards).unwrap(), json!("themeCards"));
        assert_eq!(serde_json::to_value(FieldType::FoodMenu).unwrap(), json!("foodMenu"));
        assert_eq!(serde_json::to_value(DietaryType::NonVeg).unwrap(), json!("non-veg"));
        assert_eq!(serde_json::to_value(SpiceLevel::ExtraHot).unwrap(), json!("extra-hot"));
    }

    #[test]
    fn options_payload_deserializes_by_shape() {
        let choices: OptionsPayload = serde_json::from_value(json!(["Gold", "Silver"])).unwrap();
        assert_eq!(choices.choices(), ["Gold".to_string(), "Silver".to_string()]);

        let cards: OptionsPayload = serde_json::from_value(json!([
            {"name": "Royal", "image": "data:image/png;base64,AA==", "description": "Gold drapes"}
        ]))
        .unwrap();
        assert_eq!(cards.theme_cards().len(), 1);
        assert!(cards.food_categories().is_empty());

        let menu: OptionsPayload = serde_json::from_value(json!([
            {"categoryName": "Starters", "items": [{"name": "Samosa", "price": "120"}]}
        ]))
        .unwrap();
        assert_eq!(menu.food_categories()[0].items[0].name, "Samosa");
    }

    #[test]
    fn field_round_trips_through_wire_shape() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "id": "guestCount",
            "name": "guestCount",
            "label": "Guest Count",
            "type": "number",
            "required": true,
            "validation": {"min": 10.0, "max": 500.0}
        }))
        .unwrap();
        assert_eq!(field.field_type, FieldType::Number);
        assert_eq!(field.validation.min, Some(10.0));
        assert!(field.options.is_none());

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], json!("number"));
        // Empty payloads stay off the wire.
        assert!(value.get("options").is_none());
        assert!(value.get("placeholder").is_none());
    }

    #[test]
    fn user_info_lifts_contact_keys() {
        let mut data = FormData::new();
        data.insert("name".into(), json!("Asha"));
        data.insert("email".into(), json!("asha@example.com"));
        data.insert("guestCount".into(), json!(40));
        let info = UserInfo::from_form_data(&data);
        assert_eq!(info.name.as_deref(), Some("Asha"));
        assert_eq!(info.email.as_deref(), Some("asha@example.com"));
        assert!(info.mobile_number.is_none());
    }
}
