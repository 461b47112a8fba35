use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ExpenseRecord, IncomeRecord};

/// Complete persisted state of a ledger. Serializes as the structured file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expenses: Vec<ExpenseRecord>,
}

impl Snapshot {
    pub fn new(incomes: Vec<IncomeRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self { incomes, expenses }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }
}

/// `"incomes": null` reads the same as a missing list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Render a snapshot as pretty JSON with four-space indentation.
pub fn to_json(snapshot: &Snapshot) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot.serialize(&mut serializer)?;
    Ok(buf)
}

/// Parse the structured file. The top level must be an object; serde would
/// otherwise also accept a positional array for `Snapshot`.
pub fn from_json(data: &[u8]) -> serde_json::Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "expected an object with `incomes` and `expenses` lists",
        ));
    }
    serde_json::from_value(value)
}
