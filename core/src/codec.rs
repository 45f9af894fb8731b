use serde::Serialize;

use crate::snapshot::{validate_root, SnapshotError, TableRules};
use crate::state::Root;

pub fn encode<T>(value: &T) -> Option<String>
where
    T: Serialize,
{
    serde_json::to_string(value).ok()
}

/// Decodes a stored Root and checks it against the table rules.
pub fn decode_root(raw: &str, rules: &TableRules) -> Result<Root, SnapshotError> {
    let root: Root = serde_json::from_str(raw)?;
    validate_root(&root, rules)?;
    Ok(root)
}
