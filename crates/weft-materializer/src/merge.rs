//! Field merge policy for update messages.

use weft_log::FieldMap;

/// Shallow overwrite merge.
///
/// Every field present in `incoming` wholly replaces the prior value;
/// fields absent from `incoming` keep their prior value. A nested
/// object value is replaced as a unit, never merged recursively —
/// deep-merging would change observable results for instances holding
/// nested field values.
pub fn shallow_merge(state: &mut FieldMap, incoming: &FieldMap) {
    for (name, value) in incoming {
        state.insert(name.clone(), value.clone());
    }
}
