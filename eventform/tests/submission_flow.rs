use serde_json::json;

use eventform::{
    CustomEventForm, DisplayValue, EditorCommand, EditorSession, EventFormStore, FieldPatch, FieldType, FormError,
    MemoryStore, SequentialIds, SubmissionQuery, SubmissionRequest, SubmissionStatus, assemble_submission,
    clone_template, normalize, render, validate_template,
};

fn form_data(entries: &[(&str, serde_json::Value)]) -> eventform::FormData {
    entries.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
}

#[tokio::test]
async fn admin_creates_a_wedding_form_and_a_customer_submits() {
    let store = MemoryStore::new();

    // Admin: clone the wedding blueprint and submit it as a new form.
    let mut ids = SequentialIds::new();
    let fields = clone_template("wedding", &mut ids);
    assert_eq!(fields.len(), 6);

    validate_template("My Wedding", &fields).unwrap();
    let form = CustomEventForm::new("My Wedding", "wedding", "Wedding", fields);
    let form_id = store.create_event(form).await.unwrap();

    let names = store.list_event_names().await.unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].event_type, "My Wedding");

    let stored = store.get_event(&form_id).await.unwrap();
    assert_eq!(stored.form_fields.len(), 6);
    assert_eq!(stored.event_type, "My Wedding");

    // Customer: the renderer binds controls by field name.
    let controls = render(&stored.form_fields);
    assert_eq!(controls.len(), 6);
    assert!(controls.iter().any(|control| control.name == "guestCount"));

    let values = form_data(&[
        ("brideName", json!("Asha")),
        ("groomName", json!("Dev")),
        ("weddingDate", json!("2026-11-21")),
        ("guestCount", json!(180)),
    ]);
    let mut payload = assemble_submission(&stored.form_fields, &values, &stored.event_type).unwrap();
    assert_eq!(payload["eventType"], json!("My Wedding"));

    // The contact section sits outside the schema and merges into the
    // payload after assembly.
    payload.insert("email".into(), json!("asha@example.com"));
    payload.insert("mobileNumber".into(), json!("+91 98765 43210"));

    let submission_id = store
        .submit_form(SubmissionRequest {
            template_id: form_id.clone(),
            form_data: payload,
        })
        .await
        .unwrap();

    // Review queue: pending by default, contact details in the header.
    let page = store.list_submissions(&SubmissionQuery::new()).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    let submission = &page.submissions[0];
    assert_eq!(submission.id, submission_id);
    assert_eq!(submission.status, SubmissionStatus::Pending);
    assert_eq!(submission.user_info.email.as_deref(), Some("asha@example.com"));

    // The review screen drops header keys and keeps field values.
    let entries = normalize(&submission.form_data);
    assert!(entries.iter().all(|entry| entry.key != "eventType" && entry.key != "email"));
    let guests = entries.iter().find(|entry| entry.key == "guestCount").unwrap();
    assert_eq!(guests.value, DisplayValue::Text { text: "180".into() });

    store
        .update_submission_status(&submission_id, SubmissionStatus::Approved)
        .await
        .unwrap();
    let approved = store
        .list_submissions(&SubmissionQuery::new().with_status(SubmissionStatus::Approved))
        .await
        .unwrap();
    assert_eq!(approved.pagination.total, 1);

    store.delete_submission(&submission_id).await.unwrap();
    let empty = store.list_submissions(&SubmissionQuery::new()).await.unwrap();
    assert_eq!(empty.pagination.total, 0);
}

#[tokio::test]
async fn required_food_menu_blocks_submission_until_an_item_is_chosen() {
    let store = MemoryStore::new();

    // Admin builds a form from scratch with one required food menu whose
    // only category starts empty.
    let mut editor = EditorSession::with_ids(Vec::new(), SequentialIds::new());
    editor.apply(EditorCommand::AddField);
    let id = editor.fields()[0].id.clone();
    editor.apply(EditorCommand::UpdateField {
        field_id: id.clone(),
        patch: FieldPatch::rename("menu").with_label("Menu").with_required(true),
    });
    editor.apply(EditorCommand::UpdateField {
        field_id: id.clone(),
        patch: FieldPatch::retype(FieldType::FoodMenu),
    });
    editor.apply(EditorCommand::AddFoodCategory { field_id: id.clone() });
    editor.apply(EditorCommand::UpdateFoodCategory {
        field_id: id,
        index: 0,
        category_name: "Starters".into(),
    });

    let form = CustomEventForm::new("Office Party", "custom", String::new(), editor.into_fields());
    let form_id = store.create_event(form).await.unwrap();

    let empty_selection = form_data(&[("eventType", json!("Office Party")), ("menu", json!({"Starters": []}))]);
    let error = store
        .submit_form(SubmissionRequest {
            template_id: form_id.clone(),
            form_data: empty_selection,
        })
        .await
        .unwrap_err();
    match error {
        FormError::Validation(validation) => {
            let issue = validation.for_field("menu").unwrap();
            assert_eq!(issue.message, "at least one item required");
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    let with_item = form_data(&[
        ("eventType", json!("Office Party")),
        ("menu", json!({"Starters": ["Samosa"]})),
    ]);
    store
        .submit_form(SubmissionRequest {
            template_id: form_id,
            form_data: with_item,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn write_failures_surface_instead_of_disappearing() {
    let store = MemoryStore::new();

    assert!(matches!(
        store.get_event("ghost").await.unwrap_err(),
        FormError::NotFound { .. }
    ));
    assert!(matches!(
        store.delete_event("ghost").await.unwrap_err(),
        FormError::NotFound { .. }
    ));
    assert!(matches!(
        store
            .update_submission_status("ghost", SubmissionStatus::Completed)
            .await
            .unwrap_err(),
        FormError::NotFound { .. }
    ));
    assert!(matches!(
        store
            .submit_form(SubmissionRequest {
                template_id: "ghost".into(),
                form_data: eventform::FormData::new(),
            })
            .await
            .unwrap_err(),
        FormError::NotFound { .. }
    ));
}

#[tokio::test]
async fn seeded_store_serves_cached_reads() {
    let form = CustomEventForm::new("Gala", "custom", String::new(), Vec::new());
    let id = form.id.clone();
    let store = MemoryStore::seeded(vec![form], Vec::new());

    assert_eq!(store.get_event(&id).await.unwrap().event_type, "Gala");
    assert_eq!(store.list_event_names().await.unwrap().len(), 1);
}

#[tokio::test]
async fn review_queue_pages_newest_first() {
    let store = MemoryStore::new();

    let form = CustomEventForm::new("Gala", "custom", String::new(), Vec::new());
    let form_id = store.create_event(form).await.unwrap();

    for _ in 0..3 {
        store
            .submit_form(SubmissionRequest {
                template_id: form_id.clone(),
                form_data: eventform::FormData::new(),
            })
            .await
            .unwrap();
    }

    let page = store
        .list_submissions(&SubmissionQuery::new().with_page(2).with_page_size(2))
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.submissions.len(), 1);

    let filtered = store
        .list_submissions(&SubmissionQuery::new().with_text("gala"))
        .await
        .unwrap();
    assert_eq!(filtered.pagination.total, 3);
    let filtered_out = store
        .list_submissions(&SubmissionQuery::new().with_event_type("Other"))
        .await
        .unwrap();
    assert_eq!(filtered_out.pagination.total, 0);
}
