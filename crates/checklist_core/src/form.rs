use shared::{
    domain::{ChecklistId, FieldType, ItemId, OptionId},
    protocol::{ChecklistItem, ExecutionRequest, ItemRecord},
};
use tracing::debug;

use crate::{
    assembler,
    attachments::{AttachmentRef, AttachmentSet},
    codec::photo_display,
    date::{self, DateInputKind},
    numeric,
    render::ItemView,
    store::{ItemKey, ItemStore},
};

#[derive(Debug, Clone)]
pub struct ChecklistForm {
    checklist_id: ChecklistId,
    items: Vec<ChecklistItem>,
    store: ItemStore,
    attachments: AttachmentSet,
}

impl ChecklistForm {
    pub fn load(checklist_id: ChecklistId, mut items: Vec<ChecklistItem>) -> Self {
        items.sort_by(ChecklistItem::cmp_display_order);
        let store = ItemStore::from_items(&items);
        debug!(checklist = %checklist_id, items = items.len(), "checklist form loaded");
        Self {
            checklist_id,
            items,
            store,
            attachments: AttachmentSet::new(),
        }
    }

    pub fn checklist_id(&self) -> &ChecklistId {
        &self.checklist_id
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn value(&self, item_id: &ItemId) -> &str {
        self.store.get(&ItemKey::Value(item_id.clone()))
    }

    pub fn observation(&self, item_id: &ItemId) -> &str {
        self.store.get(&ItemKey::Observation(item_id.clone()))
    }

    pub fn option_name(&self, item_id: &ItemId) -> &str {
        self.store.get(&ItemKey::OptionName(item_id.clone()))
    }

    pub fn set_value(&mut self, item_id: &ItemId, value: impl Into<String>) {
        self.store.set(ItemKey::Value(item_id.clone()), value);
    }

    pub fn set_observation(&mut self, item_id: &ItemId, text: impl Into<String>) {
        self.store.set(ItemKey::Observation(item_id.clone()), text);
    }

    pub fn type_numeric(&mut self, item_id: &ItemId, raw: &str) {
        self.set_value(item_id, numeric::reformat_numeric_input(raw));
    }

    pub fn finish_numeric(&mut self, item_id: &ItemId) {
        let current = self.value(item_id).to_string();
        if !current.is_empty() {
            self.set_value(item_id, numeric::finalize_numeric_input(&current));
        }
    }

    pub fn select_option(&mut self, item_id: &ItemId, option_id: &OptionId) -> bool {
        let chosen = self
            .item(item_id)
            .and_then(|item| item.option(option_id))
            .map(|option| (option.id.to_string(), option.name.clone()));
        let matched = chosen.is_some();
        let (value, name) = chosen.unwrap_or_default();
        self.store.set(ItemKey::Value(item_id.clone()), value);
        self.store.set(ItemKey::OptionName(item_id.clone()), name);
        matched
    }

    pub fn apply_date_input(&mut self, item_id: &ItemId, kind: DateInputKind, input: &str) {
        let format = self.item(item_id).and_then(|item| item.date_format);
        let value = date::from_input_layout(format, kind, input, self.value(item_id));
        self.set_value(item_id, value);
    }

    pub fn attach(&mut self, item_id: &ItemId, files: impl IntoIterator<Item = AttachmentRef>) {
        self.attachments.add(item_id, files);
        self.refresh_photo_value(item_id);
    }

    pub fn remove_attachment(&mut self, item_id: &ItemId, index: usize) -> Option<AttachmentRef> {
        let removed = self.attachments.remove(item_id, index);
        if removed.is_some() {
            self.refresh_photo_value(item_id);
        }
        removed
    }

    pub fn attachments(&self, item_id: &ItemId) -> &[AttachmentRef] {
        self.attachments.get(item_id)
    }

    pub fn view(&self, item_id: &ItemId) -> Option<ItemView> {
        self.item(item_id)
            .map(|item| ItemView::build(item, &self.store, &self.attachments))
    }

    pub fn views(&self) -> Vec<ItemView> {
        self.items
            .iter()
            .map(|item| ItemView::build(item, &self.store, &self.attachments))
            .collect()
    }

    pub fn records(&self) -> Vec<ItemRecord> {
        assembler::assemble(&self.items, &self.store)
    }

    pub fn execution_request(&self) -> ExecutionRequest {
        assembler::execution_request(&self.checklist_id, &self.items, &self.store)
    }

    fn refresh_photo_value(&mut self, item_id: &ItemId) {
        let is_photo = self
            .item(item_id)
            .is_some_and(|item| item.field_type == FieldType::Photo);
        if is_photo {
            let display = photo_display(self.attachments.names(item_id));
            self.set_value(item_id, display);
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
