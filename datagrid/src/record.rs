//! Key-based field access for row types.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::Value;

/// Trait for rows whose fields can be looked up by key.
///
/// Columns declared with [`Accessor::Key`](crate::Accessor::Key) resolve
/// their value through this trait. Struct rows usually derive it:
///
/// ```
/// use datagrid::{Record, Value};
///
/// #[derive(Record)]
/// struct User {
///     id: u32,
///     #[record(rename = "fullName")]
///     name: String,
///     #[record(skip)]
///     password_hash: Vec<u8>,
/// }
///
/// let user = User { id: 7, name: "Amy".into(), password_hash: vec![] };
/// assert_eq!(user.field("id"), Some(Value::Int(7)));
/// assert_eq!(user.field("fullName"), Some(Value::from("Amy")));
/// assert_eq!(user.field("password_hash"), None);
/// ```
///
/// Rows that are only ever read through function accessors can implement
/// the trait with a body returning `None`.
pub trait Record {
    /// Return the value stored under `key`, or `None` if there is no such field.
    fn field(&self, key: &str) -> Option<Value>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.field(key))
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}
