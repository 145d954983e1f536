//! What a front end needs to draw one checklist item.

use shared::{
    domain::{DateFormat, FieldType, ItemId, OptionId},
    protocol::ChecklistItem,
};

use crate::{
    attachments::AttachmentSet,
    codec::{NO, YES},
    date::{self, DateInputKind},
    store::{ItemKey, ItemStore},
};

pub const SELECT_PLACEHOLDER: &str = "Selecione...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: OptionId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldView {
    Numeric {
        value: String,
    },
    Text {
        value: String,
    },
    Date {
        kind: DateInputKind,
        value: String,
    },
    MonthYearTime {
        month: String,
        time: String,
    },
    Select {
        placeholder: &'static str,
        options: Vec<SelectOption>,
    },
    Table,
    YesNo {
        value: Option<bool>,
    },
    Photo {
        files: Vec<String>,
    },
}

impl FieldView {
    pub fn build(item: &ChecklistItem, store: &ItemStore, attachments: &AttachmentSet) -> Self {
        let value = store.get(&ItemKey::Value(item.id.clone()));
        match item.field_type {
            FieldType::Numeric => Self::Numeric {
                value: value.to_string(),
            },
            FieldType::Text => Self::Text {
                value: value.to_string(),
            },
            FieldType::Date => date_view(item.date_format, value),
            FieldType::List => Self::Select {
                placeholder: SELECT_PLACEHOLDER,
                options: item
                    .options
                    .iter()
                    .map(|option| SelectOption {
                        id: option.id.clone(),
                        name: option.name.clone(),
                        selected: option.id.as_str() == value,
                    })
                    .collect(),
            },
            FieldType::Table => Self::Table,
            FieldType::Boolean => Self::YesNo {
                value: match value {
                    YES => Some(true),
                    NO => Some(false),
                    _ => None,
                },
            },
            FieldType::Photo => Self::Photo {
                files: photo_files(attachments, &item.id, value),
            },
        }
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        match self {
            Self::Select { options, .. } => options.iter().find(|option| option.selected),
            _ => None,
        }
    }
}

fn photo_files(attachments: &AttachmentSet, item_id: &ItemId, stored: &str) -> Vec<String> {
    let picked: Vec<String> = attachments.names(item_id).map(str::to_string).collect();
    if !picked.is_empty() {
        return picked;
    }
    stored
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn date_view(format: Option<DateFormat>, value: &str) -> FieldView {
    match format {
        Some(DateFormat::MonthYearTime) => FieldView::MonthYearTime {
            month: date::to_input_layout(format, value),
            time: date::time_input(value),
        },
        _ => FieldView::Date {
            kind: DateInputKind::for_format(format),
            value: date::to_input_layout(format, value),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub label: &'static str,
    pub field: FieldView,
    pub observation: String,
}

impl ItemView {
    pub fn build(item: &ChecklistItem, store: &ItemStore, attachments: &AttachmentSet) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            label: item.field_type.label(),
            field: FieldView::build(item, store, attachments),
            observation: store
                .get(&ItemKey::Observation(item.id.clone()))
                .to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
