use shared::{
    domain::ChecklistId,
    protocol::{ChecklistItem, ExecutionRequest, ItemRecord},
};

use crate::{
    codec::FieldCodec,
    store::{ItemKey, ItemStore},
};

/// One record per item in display order. The value is encoded through the
/// item's codec and left out when the codec yields nothing; the observation
/// is always present.
pub fn assemble(items: &[ChecklistItem], store: &ItemStore) -> Vec<ItemRecord> {
    let mut ordered: Vec<&ChecklistItem> = items.iter().collect();
    ordered.sort_by(|a, b| a.cmp_display_order(b));
    ordered
        .into_iter()
        .map(|item| ItemRecord {
            item_id: item.id.clone(),
            observation: store
                .get(&ItemKey::Observation(item.id.clone()))
                .to_string(),
            value: FieldCodec::for_item(item).encode(store.get(&ItemKey::Value(item.id.clone()))),
        })
        .collect()
}

pub fn execution_request(
    checklist_id: &ChecklistId,
    items: &[ChecklistItem],
    store: &ItemStore,
) -> ExecutionRequest {
    ExecutionRequest::new(checklist_id.clone(), assemble(items, store))
}

#[cfg(test)]
#[path = "tests/assembler_tests.rs"]
mod tests;
