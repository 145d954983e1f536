use super::*;
use shared::{
    domain::DateFormat,
    protocol::{ListOption, WireValue},
};

fn item(id: &str, order: &str, field_type: FieldType) -> ChecklistItem {
    ChecklistItem {
        id: ItemId::new(id),
        order: order.to_string(),
        name: format!("item {id}"),
        field_type,
        ..ChecklistItem::default()
    }
}

fn sample_form() -> ChecklistForm {
    let mut list = item("list", "2", FieldType::List);
    list.options = vec![
        ListOption {
            id: OptionId::new("A"),
            name: "Yes".into(),
            selected: true,
        },
        ListOption {
            id: OptionId::new("B"),
            name: "No".into(),
            selected: false,
        },
    ];
    let mut date = item("date", "4", FieldType::Date);
    date.date_format = Some(DateFormat::MonthYearTime);
    date.content = Some("15/03/2024 10:30".into());
    let mut numeric = item("num", "1", FieldType::Numeric);
    numeric.content = Some("1,234.56".into());

    ChecklistForm::load(
        ChecklistId::new("77"),
        vec![
            item("photo", "3", FieldType::Photo),
            date,
            list,
            numeric,
        ],
    )
}

fn id(raw: &str) -> ItemId {
    ItemId::new(raw)
}

#[test]
fn load_sorts_items_and_decodes_values() {
    let form = sample_form();
    let order: Vec<&str> = form.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(order, ["num", "list", "photo", "date"]);

    assert_eq!(form.value(&id("num")), "1.234,56");
    assert_eq!(form.value(&id("list")), "A");
    assert_eq!(form.option_name(&id("list")), "Yes");
    assert_eq!(form.value(&id("date")), "03/2024 10:30");
    assert_eq!(form.observation(&id("num")), "");
}

#[test]
fn selecting_options_updates_value_and_name() {
    let mut form = sample_form();
    assert!(form.select_option(&id("list"), &OptionId::new("B")));
    assert_eq!(form.value(&id("list")), "B");
    assert_eq!(form.option_name(&id("list")), "No");

    assert!(!form.select_option(&id("list"), &OptionId::new("Z")));
    assert_eq!(form.value(&id("list")), "");
    assert_eq!(form.option_name(&id("list")), "");
}

#[test]
fn numeric_typing_formats_as_cents() {
    let mut form = sample_form();
    form.type_numeric(&id("num"), "7");
    assert_eq!(form.value(&id("num")), "7");
    form.finish_numeric(&id("num"));
    assert_eq!(form.value(&id("num")), "0,07");

    form.type_numeric(&id("num"), "123456");
    assert_eq!(form.value(&id("num")), "1.234,56");
}

#[test]
fn date_input_merges_month_and_time() {
    let mut form = sample_form();
    form.apply_date_input(&id("date"), DateInputKind::Month, "2025-01");
    assert_eq!(form.value(&id("date")), "01/2025 10:30");
    form.apply_date_input(&id("date"), DateInputKind::Time, "07:05");
    assert_eq!(form.value(&id("date")), "01/2025 07:05");
}

#[test]
fn photo_value_tracks_attachment_names() {
    let mut form = sample_form();
    form.attach(
        &id("photo"),
        [AttachmentRef::new("front.jpg"), AttachmentRef::new("back.jpg")],
    );
    assert_eq!(form.value(&id("photo")), "front.jpg, back.jpg");

    form.attach(&id("photo"), [AttachmentRef::new("side.jpg")]);
    assert_eq!(form.value(&id("photo")), "front.jpg, back.jpg, side.jpg");

    let removed = form.remove_attachment(&id("photo"), 1).expect("removed");
    assert_eq!(removed.name, "back.jpg");
    assert_eq!(form.value(&id("photo")), "front.jpg, side.jpg");
    assert!(form.remove_attachment(&id("photo"), 9).is_none());
    assert_eq!(form.attachments(&id("photo")).len(), 2);
}

#[test]
fn attachments_on_other_types_leave_value_alone() {
    let mut form = sample_form();
    form.attach(&id("num"), [AttachmentRef::new("receipt.pdf")]);
    assert_eq!(form.value(&id("num")), "1.234,56");
    assert_eq!(form.attachments(&id("num")).len(), 1);
}

#[test]
fn execution_request_reflects_edits() {
    let mut form = sample_form();
    form.set_observation(&id("list"), "conferido");
    form.set_value(&id("num"), "");

    let request = form.execution_request();
    assert_eq!(request.checklist.as_str(), "77");
    let records = &request.items;
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].item_id.as_str(), "num");
    assert_eq!(records[0].value, Some(WireValue::Text("0.00".into())));
    assert_eq!(records[1].observation, "conferido");
    assert_eq!(records[1].value, Some(WireValue::Text("A".into())));
    assert_eq!(records[2].value, None);
    assert_eq!(records, &form.records());
}

#[test]
fn views_are_in_display_order() {
    let form = sample_form();
    let labels: Vec<&str> = form.views().iter().map(|view| view.label).collect();
    assert_eq!(
        labels,
        ["Campo Numérico", "Campo Lista", "Campo de Foto", "Campo Data"]
    );
    assert!(form.view(&id("missing")).is_none());
}
