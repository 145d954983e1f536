//! Command-line edits applied to an opened checklist before submission.

use std::{fs, path::Path};

use anyhow::{bail, Context};
use checklist_core::{
    render::{FieldView, ItemView},
    AttachmentRef, ChecklistForm,
};
use shared::domain::{ItemId, OptionId};
use tracing::debug;

/// `ITEM=VALUE` pair as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub item_id: ItemId,
    pub value: String,
}

pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (item, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM=VALUE, got '{raw}'"))?;
    let item = item.trim();
    if item.is_empty() {
        return Err(format!("missing item id in '{raw}'"));
    }
    Ok(Assignment {
        item_id: ItemId::new(item),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct Edits {
    pub values: Vec<Assignment>,
    pub observations: Vec<Assignment>,
    pub selections: Vec<Assignment>,
    pub attachments: Vec<Assignment>,
}

pub fn apply_edits(form: &mut ChecklistForm, edits: &Edits) -> anyhow::Result<()> {
    for edit in &edits.values {
        ensure_item(form, &edit.item_id)?;
        form.set_value(&edit.item_id, edit.value.clone());
    }
    for edit in &edits.observations {
        ensure_item(form, &edit.item_id)?;
        form.set_observation(&edit.item_id, edit.value.clone());
    }
    for edit in &edits.selections {
        ensure_item(form, &edit.item_id)?;
        let option_id = OptionId::new(edit.value.trim());
        if !form.select_option(&edit.item_id, &option_id) {
            bail!("item {} has no option {option_id}", edit.item_id);
        }
    }
    for edit in &edits.attachments {
        ensure_item(form, &edit.item_id)?;
        let file = attachment_from_path(Path::new(&edit.value))?;
        debug!(item = %edit.item_id, file = %file.name, "attaching file");
        form.attach(&edit.item_id, [file]);
    }
    Ok(())
}

fn ensure_item(form: &ChecklistForm, item_id: &ItemId) -> anyhow::Result<()> {
    if form.item(item_id).is_none() {
        bail!("checklist {} has no item {item_id}", form.checklist_id());
    }
    Ok(())
}

pub fn attachment_from_path(path: &Path) -> anyhow::Result<AttachmentRef> {
    let metadata =
        fs::metadata(path).with_context(|| format!("cannot read '{}'", path.display()))?;
    if !metadata.is_file() {
        bail!("'{}' is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(AttachmentRef {
        name,
        size_bytes: metadata.len(),
        mime_type: mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string()),
    })
}

/// One line per aspect of the item, indented under its header.
pub fn describe_item(view: &ItemView) -> String {
    let mut lines = vec![format!("{} [{}] {}", view.id, view.label, view.name)];
    lines.push(format!("  value: {}", describe_field(&view.field)));
    if let FieldView::Select { options, .. } = &view.field {
        for option in options {
            let marker = if option.selected { "*" } else { " " };
            lines.push(format!("    {marker} {} {}", option.id, option.name));
        }
    }
    if !view.observation.is_empty() {
        lines.push(format!("  observation: {}", view.observation));
    }
    lines.join("\n")
}

fn describe_field(field: &FieldView) -> String {
    match field {
        FieldView::Numeric { value } | FieldView::Text { value } => value.clone(),
        FieldView::Date { kind, value } => format!("{value} ({})", kind.html_type()),
        FieldView::MonthYearTime { month, time } => format!("{month} {time}"),
        FieldView::Select { placeholder, .. } => field
            .selected_option()
            .map(|option| option.name.clone())
            .unwrap_or_else(|| placeholder.to_string()),
        FieldView::Table => "(table)".into(),
        FieldView::YesNo { value } => match value {
            Some(true) => "Sim".into(),
            Some(false) => "Não".into(),
            None => String::new(),
        },
        FieldView::Photo { files } => files.join(", "),
    }
}

#[cfg(test)]
#[path = "tests/edits_tests.rs"]
mod tests;
