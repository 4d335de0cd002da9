use super::*;
use crate::{LazyObject, ObjectImpl};
use pretty_assertions::assert_eq;

struct Opaque;

impl ObjectImpl for Opaque {
    fn get(&self, _key: &str) -> Expected<Value> {
        Expected::new(Value::Null)
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

#[test]
fn truthiness_of_primitives() {
    assert!(!Value::Null.is_truthy());
    assert!(Value::from(true).is_truthy());
    assert!(!Value::from(false).is_truthy());
    assert!(Value::from(-3).is_truthy());
    assert!(!Value::from(0).is_truthy());
    assert!(Value::from("x").is_truthy());
    assert!(!Value::from("").is_truthy());
}

#[test]
fn truthiness_of_arrays() {
    assert!(!Value::from(Vec::new()).is_truthy());
    assert!(Value::from(vec![Value::Null]).is_truthy());
}

#[test]
fn truthiness_of_objects() {
    // An implementation that does not report emptiness counts as non-empty.
    assert!(Value::from(Object::new(Opaque)).is_truthy());
    assert!(!Value::from(Object::default()).is_truthy());
    assert!(Value::from(Object::builder().set("a", 1).build()).is_truthy());
    let lazy = LazyObject::new(Vec::new(), |_: &str| Expected::new(Value::Null));
    assert!(!Value::from(Object::new(lazy)).is_truthy());
}

#[test]
fn kinds() {
    assert_eq!(Value::default().kind(), Kind::Null);
    assert_eq!(Value::from(1_i64).kind(), Kind::Integer);
    assert_eq!(Value::from(String::from("s")).kind(), Kind::String);
    assert_eq!(Value::from(Array::default()).kind(), Kind::Array);
    assert_eq!(Value::from(Object::default()).kind(), Kind::Object);
    assert_eq!(Kind::Boolean.to_string(), "boolean");
}

#[test]
fn option_converts_to_null() {
    assert!(Value::from(None::<i64>).is_null());
    assert_eq!(Value::from(Some("doc")).as_str(), Some("doc"));
}

#[test]
fn accessors() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(7_u32).as_integer(), Some(7));
    assert_eq!(Value::from(7).as_str(), None);
    assert!(Value::from(vec![Value::from(1)]).as_array().is_some());
    assert!(Value::Null.as_object().is_none());
}

#[test]
fn lookup_delegates_to_backing() {
    let obj = Value::from(Object::builder().set("name", "Widget").build());
    assert_eq!(obj.get("name").value().as_str(), Some("Widget"));
    assert!(obj.get("missing").value().is_null());
    assert!(Value::from(3).get("name").value().is_null());

    let arr = Value::from(vec![Value::from(10), Value::from(20)]);
    assert_eq!(arr.at(1).value().as_integer(), Some(20));
    assert!(arr.at(2).has_error());
    assert!(Value::Null.at(0).value().is_null());
}

#[test]
fn clones_alias_the_same_backing() {
    let arr = Value::from(vec![Value::from(1)]);
    let alias = arr.clone();
    assert_eq!(arr, alias);
    assert_ne!(arr, Value::from(vec![Value::from(1)]));
}

#[test]
fn display_is_json_like() {
    let obj = Object::builder()
        .set("name", "Widget")
        .set("size", 3)
        .set("tags", vec![Value::from(true), Value::Null])
        .build();
    assert_eq!(
        Value::from(obj).to_string(),
        r#"{"name": "Widget", "size": 3, "tags": [true, null]}"#
    );
}
