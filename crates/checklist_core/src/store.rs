use std::collections::HashMap;

use shared::{domain::ItemId, protocol::ChecklistItem};

use crate::codec::FieldCodec;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Value(ItemId),
    Observation(ItemId),
    OptionName(ItemId),
}

impl ItemKey {
    pub fn storage_key(&self) -> String {
        match self {
            Self::Value(id) => id.to_string(),
            Self::Observation(id) => format!("obs_{id}"),
            Self::OptionName(id) => format!("nome_{id}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    entries: HashMap<ItemKey, String>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[ChecklistItem]) -> Self {
        let mut store = Self::new();
        for item in items {
            let decoded = FieldCodec::for_item(item).decode(item.content.as_deref());
            store.set(ItemKey::Value(item.id.clone()), decoded.value);
            if let Some(name) = decoded.option_name {
                store.set(ItemKey::OptionName(item.id.clone()), name);
            }
            store.set(
                ItemKey::Observation(item.id.clone()),
                item.observation.clone().unwrap_or_default(),
            );
        }
        store
    }

    pub fn set(&mut self, key: ItemKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: &ItemKey) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
