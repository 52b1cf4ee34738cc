//! Built-in template catalog.
//!
//! Templates self-register through the inventory so downstream crates can
//! ship their own blueprints next to the four built-ins. Blueprints are
//! immutable; [`clone_template`] hands out independent copies with fresh
//! field ids so an editing session never writes back into the catalog.

use once_cell::sync::Lazy;

use crate::id::IdSource;
use crate::types::{EventTemplate, FieldDefinition, FieldType};

/// Pseudo-key for building a form from scratch. It matches no blueprint and
/// clones to an empty field list.
pub const CUSTOM_TEMPLATE_KEY: &str = "custom";

/// Catalog entry submitted via `inventory::submit!`.
pub struct TemplateRegistration {
    pub key: &'static str,
    pub provider: fn() -> EventTemplate,
}

inventory::collect!(TemplateRegistration);

static TEMPLATES: Lazy<Vec<EventTemplate>> = Lazy::new(|| {
    let mut templates: Vec<EventTemplate> = inventory::iter::<TemplateRegistration>()
        .map(|registration| (registration.provider)())
        .collect();
    templates.sort_by(|a, b| a.key.cmp(&b.key));
    templates
});

/// All registered templates, sorted by key.
pub fn templates() -> &'static [EventTemplate] {
    &TEMPLATES
}

/// Look up one template by key.
pub fn template(key: &str) -> Option<&'static EventTemplate> {
    TEMPLATES.iter().find(|template| template.key == key)
}

/// Deep-copy a template's fields, rewriting every field id with a fresh
/// suffix token so two clones never share ids. An unknown key (including
/// [`CUSTOM_TEMPLATE_KEY`]) yields an empty list for building from scratch.
pub fn clone_template(key: &str, ids: &mut dyn IdSource) -> Vec<FieldDefinition> {
    let Some(template) = template(key) else {
        log::debug!("clone_template: no blueprint for {key:?}, starting blank");
        return Vec::new();
    };
    clone_fields(template, ids)
}

/// Clone any template's fields with fresh ids, catalog-registered or not.
pub fn clone_fields(template: &EventTemplate, ids: &mut dyn IdSource) -> Vec<FieldDefinition> {
    template
        .fields
        .iter()
        .map(|field| {
            let mut cloned = field.clone();
            cloned.id = format!("{}_{}", field.id, ids.clone_token());
            cloned
        })
        .collect()
}

fn field(name: &str, label: &str, field_type: FieldType, required: bool) -> FieldDefinition {
    FieldDefinition {
        id: name.to_string(),
        name: name.to_string(),
        label: label.to_string(),
        field_type,
        required,
        ..FieldDefinition::default()
    }
}

fn with_placeholder(mut field: FieldDefinition, placeholder: &str) -> FieldDefinition {
    field.placeholder = placeholder.to_string();
    field
}

fn birthday_template() -> EventTemplate {
    EventTemplate {
        key: "birthday".to_string(),
        name: "Birthday Party".to_string(),
        icon: "🎂".to_string(),
        description: "Cakes, themes and party menus for birthdays of every age".to_string(),
        fields: vec![
            with_placeholder(
                field("celebrantName", "Name of the Birthday Star", FieldType::Text, true),
                "Who are we celebrating?",
            ),
            field("age", "Turning Age", FieldType::Number, false),
            field("partyDate", "Party Date", FieldType::Date, true),
            field("partyTime", "Party Time", FieldType::Time, false),
            field("theme", "Party Theme", FieldType::ThemeCards, false),
            field("menu", "Food Menu", FieldType::FoodMenu, false),
            with_placeholder(
                field("specialRequests", "Special Requests", FieldType::Textarea, false),
                "Allergies, surprises, anything else we should know",
            ),
        ],
    }
}

fn wedding_template() -> EventTemplate {
    EventTemplate {
        key: "wedding".to_string(),
        name: "Wedding".to_string(),
        icon: "💍".to_string(),
        description: "Ceremony and reception planning, from venue to guest list".to_string(),
        fields: vec![
            field("brideName", "Bride's Name", FieldType::Text, true),
            field("groomName", "Groom's Name", FieldType::Text, true),
            field("weddingDate", "Wedding Date", FieldType::Date, true),
            with_placeholder(field("venue", "Venue", FieldType::Text, false), "Venue name or address"),
            field("guestCount", "Expected Guests", FieldType::Number, true),
            field("theme", "Decor Theme", FieldType::ThemeCards, false),
        ],
    }
}

fn corporate_template() -> EventTemplate {
    EventTemplate {
        key: "corporate".to_string(),
        name: "Corporate Event".to_string(),
        icon: "🏢".to_string(),
        description: "Offsites, conferences and team events with catering".to_string(),
        fields: vec![
            field("companyName", "Company Name", FieldType::Text, true),
            field("eventName", "Event Name", FieldType::Text, true),
            field("eventDate", "Event Date", FieldType::Date, true),
            field("attendees", "Number of Attendees", FieldType::Number, true),
            field("eventFormat", "Event Format", FieldType::Select, false),
            field("catering", "Catering Menu", FieldType::FoodMenu, false),
            field("agenda", "Agenda Document", FieldType::File, false),
        ],
    }
}

fn party_template() -> EventTemplate {
    EventTemplate {
        key: "party".to_string(),
        name: "Private Party".to_string(),
        icon: "🎉".to_string(),
        description: "House parties, anniversaries and get-togethers".to_string(),
        fields: vec![
            with_placeholder(
                field("occasion", "Occasion", FieldType::Text, true),
                "What are we celebrating?",
            ),
            field("partyDate", "Party Date", FieldType::Date, true),
            field("venueType", "Venue Type", FieldType::Radio, false),
            field("guestCount", "Guest Count", FieldType::Number, false),
            field("menu", "Food Menu", FieldType::FoodMenu, false),
            with_placeholder(field("playlist", "Playlist Link", FieldType::Url, false), "https://"),
            field("decorTheme", "Decor Theme", FieldType::ThemeCards, false),
        ],
    }
}

inventory::submit! { TemplateRegistration { key: "birthday", provider: birthday_template } }
inventory::submit! { TemplateRegistration { key: "wedding", provider: wedding_template } }
inventory::submit! { TemplateRegistration { key: "corporate", provider: corporate_template } }
inventory::submit! { TemplateRegistration { key: "party", provider: party_template } }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;

    #[test]
    fn catalog_lists_the_four_builtins_sorted() {
        let keys: Vec<&str> = templates().iter().map(|template| template.key.as_str()).collect();
        assert_eq!(keys, ["birthday", "corporate", "party", "wedding"]);
    }

    #[test]
    fn builtin_fields_leave_options_for_the_admin() {
        for template in templates() {
            for field in &template.fields {
                assert!(field.options.is_none(), "{}:{} ships with options", template.key, field.name);
                assert!(field.validation.is_empty());
            }
        }
    }

    #[test]
    fn wedding_blueprint_has_six_fields() {
        assert_eq!(template("wedding").unwrap().fields.len(), 6);
    }

    #[test]
    fn clones_are_independent_of_the_blueprint() {
        let mut ids = SequentialIds::new();
        let mut cloned = clone_template("wedding", &mut ids);
        cloned[0].label = "Partner's Name".to_string();
        assert_eq!(template("wedding").unwrap().fields[0].label, "Bride's Name");
    }

    #[test]
    fn two_clones_have_disjoint_ids() {
        let mut ids = SequentialIds::new();
        let first = clone_template("birthday", &mut ids);
        let second = clone_template("birthday", &mut ids);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.label, b.label);
            assert_eq!(a.field_type, b.field_type);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn unknown_key_clones_to_an_empty_list() {
        let mut ids = SequentialIds::new();
        assert!(clone_template(CUSTOM_TEMPLATE_KEY, &mut ids).is_empty());
        assert!(clone_template("no-such-template", &mut ids).is_empty());
    }
}
