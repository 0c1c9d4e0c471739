//! JSON Schema generation for tool inputs and outputs.
//!
//! MCP requires Draft 2020-12 schemas, and output schemas must have an
//! `object` root. Schemas are cached per type since `tools/list` asks for
//! them on every call.

use schemars::generate::SchemaSettings;
use schemars::transform::{AddNullable, RestrictFormats, Transform};
use schemars::{JsonSchema, Schema};
use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

thread_local! {
    static CACHE_FOR_TYPE: RefCell<HashMap<TypeId, Arc<Schema>>> = RefCell::new(HashMap::new());
    static CACHE_FOR_OUTPUT: RefCell<HashMap<TypeId, Result<Arc<Schema>, String>>> = RefCell::new(HashMap::new());
}

/// Rewrites `{"const": null, "nullable": true}` (no type) into `{"type": "null"}`.
#[derive(Clone, Copy, Default)]
struct SanitizeNullBranches;

impl Transform for SanitizeNullBranches {
    fn transform(&mut self, schema: &mut Schema) {
        let Ok(mut v) = serde_json::to_value(&*schema) else {
            return;
        };
        sanitize_null_branches(&mut v);
        if let Ok(sanitized) = Schema::try_from(v) {
            *schema = sanitized;
        }
    }
}

fn sanitize_null_branches(node: &mut serde_json::Value) {
    use serde_json::Value as Json;
    match node {
        Json::Object(map) => {
            let nullable = map
                .get("nullable")
                .and_then(Json::as_bool)
                .unwrap_or(false);
            let const_null = map.get("const").is_some_and(Json::is_null);
            if nullable && const_null && !map.contains_key("type") {
                map.remove("const");
                map.remove("nullable");
                map.insert("type".to_string(), Json::String("null".to_string()));
            }
            for value in map.values_mut() {
                sanitize_null_branches(value);
            }
        }
        Json::Array(arr) => {
            for elem in arr {
                sanitize_null_branches(elem);
            }
        }
        _ => {}
    }
}

fn settings() -> SchemaSettings {
    SchemaSettings::draft2020_12()
        .with_transform(AddNullable::default())
        .with_transform(RestrictFormats::default())
        .with_transform(SanitizeNullBranches)
}

/// Cached input schema for `T`.
pub fn cached_schema_for<T: JsonSchema + 'static>() -> Arc<Schema> {
    CACHE_FOR_TYPE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(x) = cache.get(&TypeId::of::<T>()) {
            return Arc::clone(x);
        }
        let root = settings().into_generator().into_root_schema_for::<T>();
        let arc = Arc::new(root);
        cache.insert(TypeId::of::<T>(), Arc::clone(&arc));
        arc
    })
}

/// Cached output schema for `T`, or an error if its root is not an object.
pub fn cached_output_schema_for<T: JsonSchema + 'static>() -> Result<Arc<Schema>, String> {
    CACHE_FOR_OUTPUT.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(r) = cache.get(&TypeId::of::<T>()) {
            return r.clone();
        }
        let root = cached_schema_for::<T>();
        let result = object_root(&root).map(|()| Arc::clone(&root));
        cache.insert(TypeId::of::<T>(), result.clone());
        result
    })
}

fn object_root(schema: &Schema) -> Result<(), String> {
    let json = serde_json::to_value(schema).map_err(|e| e.to_string())?;
    match json.get("type") {
        Some(serde_json::Value::String(t)) if t == "object" => Ok(()),
        Some(serde_json::Value::String(t)) => Err(format!(
            "MCP requires output_schema root type 'object', found '{t}'"
        )),
        None if json.get("properties").is_some() => Ok(()),
        None => Err("output_schema must have root type 'object'".to_string()),
        Some(other) => Err(format!(
            "unexpected 'type' format: {other:?}, expected string 'object'"
        )),
    }
}
