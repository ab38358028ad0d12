//! Property access
//!
//! Property rules are bound by name. The engine reads the current value of a
//! named property through [`Properties`]; anything that can hand out its
//! fields as [`serde_json::Value`]s can be validated.

use serde_json::{Map, Value};

/// A data object with named, flat properties.
///
/// Missing properties read as [`Value::Null`].
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_validation::foundation::Properties;
/// use serde_json::Value;
///
/// struct Person {
///     first_name: String,
/// }
///
/// impl Properties for Person {
///     fn property(&self, name: &str) -> Value {
///         match name {
///             "FirstName" => Value::from(self.first_name.as_str()),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait Properties {
    /// Returns the current value of `name`.
    fn property(&self, name: &str) -> Value;
}

impl Properties for Map<String, Value> {
    fn property(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl Properties for Value {
    fn property(&self, name: &str) -> Value {
        match self {
            Value::Object(map) => map.property(name),
            _ => Value::Null,
        }
    }
}

impl<P: Properties + ?Sized> Properties for &P {
    fn property(&self, name: &str) -> Value {
        (**self).property(name)
    }
}
