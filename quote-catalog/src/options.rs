use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a selectable option (aluminum, handle, glass or part).
///
/// Backends hand these out either as integers or strings; both are accepted
/// and kept as text. An empty id means "not selected".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OptionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for OptionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => OptionId::from(n),
            RawId::Text(s) => OptionId::new(s),
        })
    }
}

/// The four option categories a product is configured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    Aluminum,
    Handle,
    Glass,
    Part,
}

impl SelectionField {
    pub const ALL: [SelectionField; 4] = [
        SelectionField::Aluminum,
        SelectionField::Handle,
        SelectionField::Glass,
        SelectionField::Part,
    ];

    /// Form/wire name of the field, e.g. `aluminum_id`.
    pub fn key(self) -> &'static str {
        match self {
            SelectionField::Aluminum => "aluminum_id",
            SelectionField::Handle => "handle_id",
            SelectionField::Glass => "glass_id",
            SelectionField::Part => "part_id",
        }
    }

    /// Backing table of the option list.
    pub fn table(self) -> &'static str {
        match self {
            SelectionField::Aluminum => "aluminum_types",
            SelectionField::Handle => "handle_types",
            SelectionField::Glass => "glass_types",
            SelectionField::Part => "part_types",
        }
    }
}

impl FromStr for SelectionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aluminum_id" | "aluminum" => Ok(SelectionField::Aluminum),
            "handle_id" | "handle" => Ok(SelectionField::Handle),
            "glass_id" | "glass" => Ok(SelectionField::Glass),
            "part_id" | "part" => Ok(SelectionField::Part),
            other => Err(format!("unknown selection field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntity {
    pub id: OptionId,
    pub name: String,
}

impl OptionEntity {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Selectable options per category, as served by `GET /api/options`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionCatalog {
    #[serde(default)]
    pub aluminums: Vec<OptionEntity>,
    #[serde(default)]
    pub handles: Vec<OptionEntity>,
    #[serde(default)]
    pub glasses: Vec<OptionEntity>,
    #[serde(default)]
    pub parts: Vec<OptionEntity>,
}

impl OptionCatalog {
    pub fn entries(&self, field: SelectionField) -> &[OptionEntity] {
        match field {
            SelectionField::Aluminum => &self.aluminums,
            SelectionField::Handle => &self.handles,
            SelectionField::Glass => &self.glasses,
            SelectionField::Part => &self.parts,
        }
    }

    pub fn entries_mut(&mut self, field: SelectionField) -> &mut Vec<OptionEntity> {
        match field {
            SelectionField::Aluminum => &mut self.aluminums,
            SelectionField::Handle => &mut self.handles,
            SelectionField::Glass => &mut self.glasses,
            SelectionField::Part => &mut self.parts,
        }
    }

    /// Display name for `id` in the given category, if listed.
    pub fn name_of(&self, field: SelectionField, id: &OptionId) -> Option<&str> {
        self.entries(field)
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        SelectionField::ALL.iter().all(|f| self.entries(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_id_accepts_numbers_and_strings() {
        let ids: Vec<OptionId> = serde_json::from_str(r#"[7, "A2", " 3 "]"#).unwrap();
        assert_eq!(ids[0].as_str(), "7");
        assert_eq!(ids[1].as_str(), "A2");
        assert_eq!(ids[2].as_str(), "3");
    }

    #[test]
    fn test_field_names_round_trip_through_keys() {
        for field in SelectionField::ALL {
            assert_eq!(field.key().parse::<SelectionField>().unwrap(), field);
        }
        assert!("color_id".parse::<SelectionField>().is_err());
    }

    #[test]
    fn test_name_lookup() {
        let catalog = OptionCatalog {
            handles: vec![OptionEntity::new(1_i64, "Bar"), OptionEntity::new(2_i64, "Knob")],
            ..Default::default()
        };
        assert_eq!(catalog.name_of(SelectionField::Handle, &OptionId::from(2_i64)), Some("Knob"));
        assert_eq!(catalog.name_of(SelectionField::Handle, &OptionId::from(9_i64)), None);
        assert_eq!(catalog.name_of(SelectionField::Glass, &OptionId::from(1_i64)), None);
    }
}
