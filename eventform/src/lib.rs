//! eventform core library.
//!
//! A typed form-template engine for an event-booking back office: the field
//! schema model, a command-based template editor, a schema-driven renderer
//! and validator for customer submissions, a submission-key normalizer for
//! the review screen, and the async storage boundary with an in-memory
//! reference implementation.

pub mod catalog;
pub mod editor;
pub mod errors;
pub mod id;
pub mod normalize;
pub mod renderer;
pub mod search;
pub mod store;
pub mod types;
pub mod validators;

pub use catalog::{CUSTOM_TEMPLATE_KEY, TemplateRegistration, clone_fields, clone_template, template, templates};
pub use editor::{
    EditorCommand, EditorSession, FieldPatch, FoodItemPatch, ThemeCardPatch, ValidationPatch, apply_command,
    validate_template,
};
pub use errors::*;
pub use id::{IdSource, NanoIds, SequentialIds, generate_entity_id};
pub use normalize::{DisplayValue, NormalizedEntry, canonical_key, humanize_key, normalize};
pub use renderer::{ControlKind, RenderedControl, assemble_submission, render, validate_submission};
pub use search::{Pagination, SortOrder, SubmissionPage, SubmissionQuery};
pub use store::{EventFormStore, EventSummary, MemoryStore, SubmissionRequest};
pub use types::{
    CustomEventForm, DEFAULT_MAX_FILE_SIZE_MB, DietaryType, EventTemplate, FieldDefinition, FieldType,
    FieldValidation, FileKind, FoodCategory, FoodItem, FormData, OptionsPayload, SpiceLevel, Submission,
    SubmissionStatus, ThemeCard, UserInfo,
};

// Re-export inventory so downstream crates can register templates without
// pinning their own copy of the crate.
pub use inventory;
