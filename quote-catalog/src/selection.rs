use serde::{Deserialize, Serialize};

use crate::options::{OptionId, SelectionField};

/// The four-way choice identifying a purchasable configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSelection {
    #[serde(default)]
    pub aluminum_id: Option<OptionId>,
    #[serde(default)]
    pub handle_id: Option<OptionId>,
    #[serde(default)]
    pub glass_id: Option<OptionId>,
    #[serde(default)]
    pub part_id: Option<OptionId>,
}

impl OptionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, field: SelectionField) -> &mut Option<OptionId> {
        match field {
            SelectionField::Aluminum => &mut self.aluminum_id,
            SelectionField::Handle => &mut self.handle_id,
            SelectionField::Glass => &mut self.glass_id,
            SelectionField::Part => &mut self.part_id,
        }
    }

    /// Current id of `field`; empty ids read as unset.
    pub fn get(&self, field: SelectionField) -> Option<&OptionId> {
        let slot = match field {
            SelectionField::Aluminum => &self.aluminum_id,
            SelectionField::Handle => &self.handle_id,
            SelectionField::Glass => &self.glass_id,
            SelectionField::Part => &self.part_id,
        };
        slot.as_ref().filter(|id| !id.is_empty())
    }

    /// Sets one identifier. An empty value clears the field.
    pub fn set(&mut self, field: SelectionField, value: impl Into<OptionId>) {
        let id = value.into();
        *self.slot_mut(field) = if id.is_empty() { None } else { Some(id) };
    }

    pub fn clear(&mut self, field: SelectionField) {
        *self.slot_mut(field) = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True iff all four identifiers are set.
    pub fn is_complete(&self) -> bool {
        SelectionField::ALL.iter().all(|f| self.get(*f).is_some())
    }

    /// Product id the backend stores this combination under: the four ids
    /// concatenated in aluminum, handle, glass, part order.
    pub fn product_key(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(
            SelectionField::ALL
                .iter()
                .filter_map(|f| self.get(*f))
                .map(OptionId::as_str)
                .collect(),
        )
    }

    pub fn missing_fields(&self) -> Vec<SelectionField> {
        SelectionField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> OptionSelection {
        let mut selection = OptionSelection::new();
        selection.set(SelectionField::Aluminum, 1_i64);
        selection.set(SelectionField::Handle, 2_i64);
        selection.set(SelectionField::Glass, 3_i64);
        selection.set(SelectionField::Part, 4_i64);
        selection
    }

    #[test]
    fn test_complete_only_when_all_four_set() {
        let mut selection = OptionSelection::new();
        assert!(!selection.is_complete());

        for (i, field) in SelectionField::ALL.iter().enumerate() {
            assert!(!selection.is_complete());
            selection.set(*field, (i + 1) as i64);
        }
        assert!(selection.is_complete());
    }

    #[test]
    fn test_empty_value_clears_field() {
        let mut selection = full();
        selection.set(SelectionField::Glass, "");
        assert!(!selection.is_complete());
        assert_eq!(selection.missing_fields(), vec![SelectionField::Glass]);

        selection.set(SelectionField::Glass, "   ");
        assert!(selection.get(SelectionField::Glass).is_none());
    }

    #[test]
    fn test_completeness_ignores_catalog_validity() {
        let mut selection = OptionSelection::new();
        for field in SelectionField::ALL {
            selection.set(field, "does-not-exist");
        }
        assert!(selection.is_complete());
    }

    #[test]
    fn test_product_key_concatenates_ids() {
        assert_eq!(full().product_key().as_deref(), Some("1234"));

        let mut partial = full();
        partial.clear(SelectionField::Part);
        assert_eq!(partial.product_key(), None);
    }

    #[test]
    fn test_wire_empty_strings_count_as_unset() {
        let selection: OptionSelection = serde_json::from_str(
            r#"{"aluminum_id": 1, "handle_id": "", "glass_id": 3, "part_id": null}"#,
        )
        .unwrap();
        assert!(!selection.is_complete());
        assert_eq!(
            selection.missing_fields(),
            vec![SelectionField::Handle, SelectionField::Part]
        );
    }

    #[test]
    fn test_reset() {
        let mut selection = full();
        selection.reset();
        assert_eq!(selection, OptionSelection::default());
    }
}
