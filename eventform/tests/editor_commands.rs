use eventform::{
    EditorCommand, EditorSession, FieldPatch, FieldType, OptionsPayload, SequentialIds, ValidationPatch,
    clone_template,
};

fn session() -> EditorSession<SequentialIds> {
    EditorSession::with_ids(Vec::new(), SequentialIds::new())
}

#[test]
fn add_field_grows_the_list_with_a_fresh_id() {
    let mut editor = EditorSession::with_ids(clone_template("wedding", &mut SequentialIds::new()), SequentialIds::new());
    let before = editor.fields().len();
    let existing: Vec<String> = editor.fields().iter().map(|field| field.id.clone()).collect();

    editor.apply(EditorCommand::AddField);

    assert_eq!(editor.fields().len(), before + 1);
    let appended = editor.fields().last().unwrap();
    assert!(!existing.contains(&appended.id));
    assert_eq!(appended.field_type, FieldType::Text);
    assert!(!appended.required);
    assert!(appended.options.is_none());
    assert!(appended.validation.is_empty());
}

#[test]
fn update_field_overlays_exactly_the_patch() {
    let mut editor = session();
    editor.apply(EditorCommand::AddField);
    editor.apply(EditorCommand::AddField);
    let target = editor.fields()[0].id.clone();
    let untouched_before = editor.fields()[1].clone();

    editor.apply(EditorCommand::UpdateField {
        field_id: target.clone(),
        patch: FieldPatch {
            name: Some("budget".into()),
            label: Some("Budget".into()),
            field_type: Some(FieldType::Number),
            required: Some(true),
            validation: Some(ValidationPatch {
                min: Some(1000.0),
                ..ValidationPatch::default()
            }),
            ..FieldPatch::default()
        },
    });

    let updated = &editor.fields()[0];
    assert_eq!(updated.id, target);
    assert_eq!(updated.name, "budget");
    assert_eq!(updated.label, "Budget");
    assert_eq!(updated.field_type, FieldType::Number);
    assert!(updated.required);
    assert_eq!(updated.validation.min, Some(1000.0));
    assert_eq!(updated.validation.max, None);
    // Keys absent from the patch keep their prior values.
    assert_eq!(updated.placeholder, "");

    assert_eq!(editor.fields()[1], untouched_before);
}

#[test]
fn remove_field_on_a_missing_id_is_a_value_level_no_op() {
    let mut editor = session();
    editor.apply(EditorCommand::AddField);
    editor.apply(EditorCommand::AddField);
    let before = editor.fields().to_vec();

    editor.apply(EditorCommand::RemoveField {
        field_id: "never-existed".into(),
    });

    assert_eq!(editor.fields(), &before[..]);
}

#[test]
fn remove_field_filters_exactly_the_match() {
    let mut editor = session();
    editor.apply(EditorCommand::AddField);
    editor.apply(EditorCommand::AddField);
    editor.apply(EditorCommand::AddField);
    let victim = editor.fields()[1].id.clone();

    editor.apply(EditorCommand::RemoveField { field_id: victim.clone() });

    assert_eq!(editor.fields().len(), 2);
    assert!(editor.fields().iter().all(|field| field.id != victim));
}

#[test]
fn option_edits_are_positional_and_bounded() {
    let mut editor = session();
    editor.apply(EditorCommand::AddField);
    let id = editor.fields()[0].id.clone();
    editor.apply(EditorCommand::UpdateField {
        field_id: id.clone(),
        patch: FieldPatch::retype(FieldType::Checkbox),
    });

    editor.apply(EditorCommand::AddOption { field_id: id.clone() });
    editor.apply(EditorCommand::AddOption { field_id: id.clone() });
    editor.apply(EditorCommand::UpdateOption {
        field_id: id.clone(),
        index: 0,
        value: "Veg".into(),
    });
    editor.apply(EditorCommand::UpdateOption {
        field_id: id.clone(),
        index: 1,
        value: "Non-Veg".into(),
    });
    assert_eq!(editor.fields()[0].options.choices(), ["Veg".to_string(), "Non-Veg".to_string()]);

    editor.apply(EditorCommand::RemoveOption {
        field_id: id.clone(),
        index: 0,
    });
    assert_eq!(editor.fields()[0].options.choices(), ["Non-Veg".to_string()]);

    // Out-of-range update and removal leave the list untouched.
    editor.apply(EditorCommand::UpdateOption {
        field_id: id.clone(),
        index: 9,
        value: "Vegan".into(),
    });
    editor.apply(EditorCommand::RemoveOption { field_id: id, index: 9 });
    assert_eq!(editor.fields()[0].options.choices(), ["Non-Veg".to_string()]);
}

#[test]
fn add_option_is_meaningless_for_structured_payloads() {
    let mut editor = session();
    editor.apply(EditorCommand::AddField);
    let id = editor.fields()[0].id.clone();
    editor.apply(EditorCommand::UpdateField {
        field_id: id.clone(),
        patch: FieldPatch::retype(FieldType::ThemeCards),
    });
    editor.apply(EditorCommand::AddThemeCard { field_id: id.clone() });

    // AddOption must not corrupt a theme-card payload.
    editor.apply(EditorCommand::AddOption { field_id: id.clone() });
    assert_eq!(editor.fields()[0].options.theme_cards().len(), 1);
    assert!(matches!(editor.fields()[0].options, OptionsPayload::ThemeCards(_)));
}
