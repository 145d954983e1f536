use std::collections::HashMap;

use shared::domain::ItemId;

/// Reference to a file the user picked for an item. Held for the lifetime of
/// the opened checklist only; nothing here is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
}

impl AttachmentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: 0,
            mime_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    by_item: HashMap<ItemId, Vec<AttachmentRef>>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item_id: &ItemId, files: impl IntoIterator<Item = AttachmentRef>) {
        self.by_item
            .entry(item_id.clone())
            .or_default()
            .extend(files);
    }

    pub fn remove(&mut self, item_id: &ItemId, index: usize) -> Option<AttachmentRef> {
        let files = self.by_item.get_mut(item_id)?;
        (index < files.len()).then(|| files.remove(index))
    }

    pub fn get(&self, item_id: &ItemId) -> &[AttachmentRef] {
        self.by_item.get(item_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn names<'a>(&'a self, item_id: &ItemId) -> impl Iterator<Item = &'a str> + 'a {
        self.get(item_id).iter().map(|file| file.name.as_str())
    }
}
