//! Command-based editing of a template's field list.
//!
//! Every mutation is expressed as an [`EditorCommand`] and applied by
//! [`apply_command`], so an editing session is a replayable command log.
//! All operations are total: a stale field id or out-of-range index degrades
//! to a silent no-op instead of an error, because the admin UI can issue a
//! mutation against a field that a faster click already removed. The no-op
//! behavior is part of the contract; do not turn it into errors.

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationIssue, ValidationResult};
use crate::id::{IdSource, NanoIds};
use crate::types::{
    DietaryType, FieldDefinition, FieldType, FieldValidation, FileKind, FoodCategory, FoodItem, OptionsPayload,
    SpiceLevel, ThemeCard,
};

/// Sparse overlay for a field: only present keys are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
    pub options: Option<OptionsPayload>,
    pub validation: Option<ValidationPatch>,
}

impl FieldPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn retype(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    fn apply_to(&self, field: &mut FieldDefinition) {
        if let Some(name) = &self.name {
            field.name = name.clone();
        }
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(new_type) = self.field_type {
            let old_type = field.field_type;
            field.field_type = new_type;
            // A transition into or out of themeCards clears the payload;
            // every other transition leaves it orphaned for the renderer to
            // ignore. Switching back does NOT restore what was cleared.
            if old_type != new_type && (old_type == FieldType::ThemeCards || new_type == FieldType::ThemeCards) {
                field.options = OptionsPayload::None;
            }
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = placeholder.clone();
        }
        if let Some(options) = &self.options {
            field.options = options.clone();
        }
        if let Some(validation) = &self.validation {
            validation.apply_to(&mut field.validation);
        }
    }
}

/// Key-wise overlay for the validation record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPatch {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
    pub file_types: Option<FileKind>,
    pub max_file_size: Option<f64>,
}

impl ValidationPatch {
    fn apply_to(&self, validation: &mut FieldValidation) {
        if self.min.is_some() {
            validation.min = self.min;
        }
        if self.max.is_some() {
            validation.max = self.max;
        }
        if let Some(pattern) = &self.pattern {
            validation.pattern = Some(pattern.clone());
        }
        if self.file_types.is_some() {
            validation.file_types = self.file_types;
        }
        if self.max_file_size.is_some() {
            validation.max_file_size = self.max_file_size;
        }
    }
}

/// Sparse overlay for one theme card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeCardPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub file_name: Option<String>,
}

impl ThemeCardPatch {
    fn apply_to(&self, card: &mut ThemeCard) {
        if let Some(name) = &self.name {
            card.name = name.clone();
        }
        if let Some(image) = &self.image {
            card.image = image.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(file_name) = &self.file_name {
            card.file_name = Some(file_name.clone());
        }
    }
}

/// Sparse overlay for one food item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodItemPatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub dietary_type: Option<DietaryType>,
    pub spice_level: Option<SpiceLevel>,
    pub is_popular: Option<bool>,
}

impl FoodItemPatch {
    fn apply_to(&self, item: &mut FoodItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = &self.price {
            item.price = price.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(dietary_type) = self.dietary_type {
            item.dietary_type = dietary_type;
        }
        if let Some(spice_level) = self.spice_level {
            item.spice_level = spice_level;
        }
        if let Some(is_popular) = self.is_popular {
            item.is_popular = is_popular;
        }
    }
}

/// One editing mutation over the field list. Serializable so a session can
/// be persisted and replayed deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorCommand {
    AddField,
    UpdateField { field_id: String, patch: FieldPatch },
    RemoveField { field_id: String },
    AddOption { field_id: String },
    UpdateOption { field_id: String, index: usize, value: String },
    RemoveOption { field_id: String, index: usize },
    AddThemeCard { field_id: String },
    UpdateThemeCard { field_id: String, index: usize, patch: ThemeCardPatch },
    RemoveThemeCard { field_id: String, index: usize },
    AddFoodCategory { field_id: String },
    UpdateFoodCategory { field_id: String, index: usize, category_name: String },
    RemoveFoodCategory { field_id: String, index: usize },
    AddFoodItem { field_id: String, category_index: usize },
    UpdateFoodItem { field_id: String, category_index: usize, item_index: usize, patch: FoodItemPatch },
    RemoveFoodItem { field_id: String, category_index: usize, item_index: usize },
}

fn field_mut<'a>(fields: &'a mut [FieldDefinition], field_id: &str) -> Option<&'a mut FieldDefinition> {
    fields.iter_mut().find(|field| field.id == field_id)
}

/// Apply one command to the field list. Sibling fields, sibling options and
/// sibling categories are never touched by a mutation that misses its target.
pub fn apply_command(fields: &mut Vec<FieldDefinition>, command: &EditorCommand, ids: &mut dyn IdSource) {
    match command {
        EditorCommand::AddField => {
            fields.push(FieldDefinition::blank(ids.field_id()));
        }
        EditorCommand::UpdateField { field_id, patch } => {
            if let Some(field) = field_mut(fields, field_id) {
                patch.apply_to(field);
            }
        }
        EditorCommand::RemoveField { field_id } => {
            fields.retain(|field| field.id != *field_id);
        }
        EditorCommand::AddOption { field_id } => {
            if let Some(field) = field_mut(fields, field_id) {
                match &mut field.options {
                    OptionsPayload::StringChoices(choices) => choices.push(String::new()),
                    OptionsPayload::None => field.options = OptionsPayload::StringChoices(vec![String::new()]),
                    _ => {}
                }
            }
        }
        EditorCommand::UpdateOption { field_id, index, value } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::StringChoices(choices) = &mut field.options
                && let Some(slot) = choices.get_mut(*index)
            {
                *slot = value.clone();
            }
        }
        EditorCommand::RemoveOption { field_id, index } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::StringChoices(choices) = &mut field.options
                && *index < choices.len()
            {
                choices.remove(*index);
            }
        }
        EditorCommand::AddThemeCard { field_id } => {
            if let Some(field) = field_mut(fields, field_id) {
                match &mut field.options {
                    OptionsPayload::ThemeCards(cards) => cards.push(ThemeCard::default()),
                    OptionsPayload::None => field.options = OptionsPayload::ThemeCards(vec![ThemeCard::default()]),
                    _ => {}
                }
            }
        }
        EditorCommand::UpdateThemeCard { field_id, index, patch } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::ThemeCards(cards) = &mut field.options
                && let Some(card) = cards.get_mut(*index)
            {
                patch.apply_to(card);
            }
        }
        EditorCommand::RemoveThemeCard { field_id, index } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::ThemeCards(cards) = &mut field.options
                && *index < cards.len()
            {
                cards.remove(*index);
            }
        }
        EditorCommand::AddFoodCategory { field_id } => {
            if let Some(field) = field_mut(fields, field_id) {
                match &mut field.options {
                    OptionsPayload::FoodCategories(categories) => categories.push(FoodCategory::default()),
                    OptionsPayload::None => {
                        field.options = OptionsPayload::FoodCategories(vec![FoodCategory::default()])
                    }
                    _ => {}
                }
            }
        }
        EditorCommand::UpdateFoodCategory {
            field_id,
            index,
            category_name,
        } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::FoodCategories(categories) = &mut field.options
                && let Some(category) = categories.get_mut(*index)
            {
                category.category_name = category_name.clone();
            }
        }
        EditorCommand::RemoveFoodCategory { field_id, index } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::FoodCategories(categories) = &mut field.options
                && *index < categories.len()
            {
                categories.remove(*index);
            }
        }
        EditorCommand::AddFoodItem { field_id, category_index } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::FoodCategories(categories) = &mut field.options
                && let Some(category) = categories.get_mut(*category_index)
            {
                category.items.push(FoodItem::default());
            }
        }
        EditorCommand::UpdateFoodItem {
            field_id,
            category_index,
            item_index,
            patch,
        } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::FoodCategories(categories) = &mut field.options
                && let Some(category) = categories.get_mut(*category_index)
                && let Some(item) = category.items.get_mut(*item_index)
            {
                patch.apply_to(item);
            }
        }
        EditorCommand::RemoveFoodItem {
            field_id,
            category_index,
            item_index,
        } => {
            if let Some(field) = field_mut(fields, field_id)
                && let OptionsPayload::FoodCategories(categories) = &mut field.options
                && let Some(category) = categories.get_mut(*category_index)
                && *item_index < category.items.len()
            {
                category.items.remove(*item_index);
            }
        }
    }
}

/// One editing session: the working field list, its id source, and the
/// command log that produced it.
pub struct EditorSession<I: IdSource = NanoIds> {
    fields: Vec<FieldDefinition>,
    ids: I,
    history: Vec<EditorCommand>,
}

impl EditorSession<NanoIds> {
    /// Start from scratch (the "custom" pseudo-template).
    pub fn new() -> Self {
        Self::with_ids(Vec::new(), NanoIds)
    }

    /// Start from a cloned template field list.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        Self::with_ids(fields, NanoIds)
    }
}

impl Default for EditorSession<NanoIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> EditorSession<I> {
    pub fn with_ids(fields: Vec<FieldDefinition>, ids: I) -> Self {
        Self {
            fields,
            ids,
            history: Vec::new(),
        }
    }

    /// Rebuild a session by replaying a command log over a starting list.
    /// With a deterministic id source this reproduces the exact field list.
    pub fn replay(fields: Vec<FieldDefinition>, commands: Vec<EditorCommand>, ids: I) -> Self {
        let mut session = Self::with_ids(fields, ids);
        for command in commands {
            session.apply(command);
        }
        session
    }

    pub fn apply(&mut self, command: EditorCommand) {
        apply_command(&mut self.fields, &command, &mut self.ids);
        self.history.push(command);
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn history(&self) -> &[EditorCommand] {
        &self.history
    }

    /// Consume the session on submit. Closing the editor without submitting
    /// simply drops it; nothing is persisted.
    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }
}

/// Admin-side structural validation before a form is created: the event type
/// and field machine names must be present, theme cards need a name, image
/// and description, food items need a name and a price.
///
/// Duplicate field names are deliberately NOT rejected here (see DESIGN.md).
pub fn validate_template(event_type: &str, fields: &[FieldDefinition]) -> ValidationResult<()> {
    let mut issues = Vec::new();

    if event_type.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "eventType",
            "validation.required",
            "event type is required",
        ));
    }

    for field in fields {
        if field.name.trim().is_empty() {
            issues.push(ValidationIssue::new(
                field.id.clone(),
                "validation.required",
                "field name is required",
            ));
        }
        match field.field_type {
            FieldType::ThemeCards => {
                for (index, card) in field.options.theme_cards().iter().enumerate() {
                    if card.name.trim().is_empty() || card.image.is_empty() || card.description.trim().is_empty() {
                        issues.push(ValidationIssue::new(
                            field.name.clone(),
                            "validation.theme_card",
                            format!("theme card {} needs a name, image and description", index + 1),
                        ));
                    }
                }
            }
            FieldType::FoodMenu => {
                for category in field.options.food_categories() {
                    if category.category_name.trim().is_empty() {
                        issues.push(ValidationIssue::new(
                            field.name.clone(),
                            "validation.food_category",
                            "category name is required",
                        ));
                    }
                    for (index, item) in category.items.iter().enumerate() {
                        if item.name.trim().is_empty() || item.price.trim().is_empty() {
                            issues.push(ValidationIssue::new(
                                field.name.clone(),
                                "validation.food_item",
                                format!(
                                    "item {} in {:?} needs a name and a price",
                                    index + 1,
                                    category.category_name
                                ),
                            ));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(ValidationError::new(issues)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    fn session() -> EditorSession<SequentialIds> {
        EditorSession::with_ids(Vec::new(), SequentialIds::new())
    }

    #[test]
    fn add_field_appends_a_blank_text_field() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        editor.apply(EditorCommand::AddField);
        assert_eq!(editor.fields().len(), 2);
        assert_eq!(editor.fields()[0].field_type, FieldType::Text);
        assert!(!editor.fields()[0].required);
        assert_ne!(editor.fields()[0].id, editor.fields()[1].id);
    }

    #[test]
    fn stale_ids_and_indices_are_no_ops() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let before = editor.fields().to_vec();

        editor.apply(EditorCommand::RemoveField {
            field_id: "missing".into(),
        });
        editor.apply(EditorCommand::UpdateField {
            field_id: "missing".into(),
            patch: FieldPatch::rename("x"),
        });
        editor.apply(EditorCommand::UpdateOption {
            field_id: before[0].id.clone(),
            index: 3,
            value: "x".into(),
        });
        editor.apply(EditorCommand::RemoveOption {
            field_id: before[0].id.clone(),
            index: 3,
        });
        assert_eq!(editor.fields(), &before[..]);
    }

    #[test]
    fn theme_card_transitions_reset_options_both_ways() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let id = editor.fields()[0].id.clone();
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::Select),
        });
        for choice in ["Gold", "Silver", "Bronze"] {
            editor.apply(EditorCommand::AddOption { field_id: id.clone() });
            let index = editor.fields()[0].options.choices().len() - 1;
            editor.apply(EditorCommand::UpdateOption {
                field_id: id.clone(),
                index,
                value: choice.into(),
            });
        }
        assert_eq!(editor.fields()[0].options.choices().len(), 3);

        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::ThemeCards),
        });
        assert!(editor.fields()[0].options.is_none());

        // Switching back does not resurrect the choices.
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::Select),
        });
        assert!(editor.fields()[0].options.is_none());
    }

    #[test]
    fn select_to_checkbox_keeps_options() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let id = editor.fields()[0].id.clone();
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::Select),
        });
        editor.apply(EditorCommand::AddOption { field_id: id.clone() });
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::Checkbox),
        });
        assert_eq!(editor.fields()[0].options.choices().len(), 1);
    }

    #[test]
    fn nested_food_item_edits_leave_siblings_alone() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let id = editor.fields()[0].id.clone();
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::FoodMenu),
        });
        editor.apply(EditorCommand::AddFoodCategory { field_id: id.clone() });
        editor.apply(EditorCommand::AddFoodCategory { field_id: id.clone() });
        editor.apply(EditorCommand::UpdateFoodCategory {
            field_id: id.clone(),
            index: 0,
            category_name: "Starters".into(),
        });
        editor.apply(EditorCommand::AddFoodItem {
            field_id: id.clone(),
            category_index: 0,
        });
        editor.apply(EditorCommand::UpdateFoodItem {
            field_id: id.clone(),
            category_index: 0,
            item_index: 0,
            patch: FoodItemPatch {
                name: Some("Samosa".into()),
                price: Some("120".into()),
                spice_level: Some(SpiceLevel::Medium),
                ..FoodItemPatch::default()
            },
        });

        let categories = editor.fields()[0].options.food_categories();
        assert_eq!(categories[0].items[0].name, "Samosa");
        assert_eq!(categories[0].items[0].spice_level, SpiceLevel::Medium);
        assert_eq!(categories[1], FoodCategory::default());

        // Out-of-range nested indices stay no-ops.
        let before = editor.fields().to_vec();
        editor.apply(EditorCommand::RemoveFoodItem {
            field_id: id,
            category_index: 5,
            item_index: 0,
        });
        assert_eq!(editor.fields(), &before[..]);
    }

    #[test]
    fn replay_reproduces_the_field_list() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let id = editor.fields()[0].id.clone();
        editor.apply(EditorCommand::UpdateField {
            field_id: id,
            patch: FieldPatch::rename("guestCount").with_label("Guest Count"),
        });

        let replayed = EditorSession::replay(Vec::new(), editor.history().to_vec(), SequentialIds::new());
        assert_eq!(replayed.fields(), editor.fields());
    }

    #[test]
    fn template_validation_flags_incomplete_nested_structures() {
        let mut editor = session();
        editor.apply(EditorCommand::AddField);
        let id = editor.fields()[0].id.clone();
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::rename("theme").with_label("Theme"),
        });
        editor.apply(EditorCommand::UpdateField {
            field_id: id.clone(),
            patch: FieldPatch::retype(FieldType::ThemeCards),
        });
        editor.apply(EditorCommand::AddThemeCard { field_id: id.clone() });

        let err = validate_template("Gala Night", editor.fields()).unwrap_err();
        assert!(err.for_field("theme").is_some());

        editor.apply(EditorCommand::UpdateThemeCard {
            field_id: id,
            index: 0,
            patch: ThemeCardPatch {
                name: Some("Royal".into()),
                image: Some("data:image/png;base64,AA==".into()),
                description: Some("Gold drapes".into()),
                ..ThemeCardPatch::default()
            },
        });
        assert!(validate_template("Gala Night", editor.fields()).is_ok());
        assert!(validate_template("   ", editor.fields()).is_err());
    }
}
