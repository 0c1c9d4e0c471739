//! RFC 7396 JSON Merge Patch, used to layer the local config over the global one.

use serde_json::Value;

/// Apply `patch` to `target`.
///
/// Objects merge key by key, a `null` in the patch deletes the key, and any
/// other patch value (arrays included) replaces the target value.
///
/// ```
/// use serde_json::json;
/// use harness_config::merge::merge_patch;
///
/// let global = json!({"server": {"toolsets": ["ccm"], "read_only": true}});
/// let local = json!({"server": {"toolsets": ["pipelines"]}});
/// assert_eq!(
///     merge_patch(global, local),
///     json!({"server": {"toolsets": ["pipelines"], "read_only": true}})
/// );
/// ```
pub fn merge_patch(target: Value, patch: Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch;
    };
    let mut target_map = match target {
        Value::Object(m) => m,
        _ => serde_json::Map::new(),
    };
    for (key, value) in patch_map {
        if value.is_null() {
            target_map.remove(&key);
        } else {
            let existing = target_map.remove(&key).unwrap_or(Value::Null);
            target_map.insert(key, merge_patch(existing, value));
        }
    }
    Value::Object(target_map)
}
