use crate::{Database, LinkedRow, Model, ModelRef, Result};

use baserow_core::{Error, Ref};
use serde::Deserialize;
use serde_json::Value;

/// A type that can be stored in a model attribute.
///
/// `from_backend` converts the raw value found in a row, `to_backend` the
/// reverse for writes.
pub trait Field: Sized {
    fn from_backend(db: Option<&Database>, value: Value) -> Result<Self>;

    fn to_backend(&self) -> Result<Value>;
}

/// Conversion applied when a value is assigned to an attribute.
///
/// Every field type accepts itself. Attribute types may accept other inputs,
/// or reject assignments entirely.
pub trait Assign<T> {
    fn assign(self) -> Result<T>;
}

impl<T: Field> Assign<T> for T {
    fn assign(self) -> Result<T> {
        Ok(self)
    }
}

impl Assign<String> for &str {
    fn assign(self) -> Result<String> {
        Ok(self.to_string())
    }
}

impl<M: Model> Assign<LinkedRow<M>> for Vec<M> {
    fn assign(self) -> Result<LinkedRow<M>> {
        LinkedRow::from_models(self)
    }
}

macro_rules! impl_field_via_serde {
    ( $( $ty:ty => $name:literal, )* ) => {
        $(
            impl Field for $ty {
                fn from_backend(_db: Option<&Database>, value: Value) -> Result<Self> {
                    <$ty>::deserialize(&value).map_err(|_| Error::type_conversion(&value, $name))
                }

                fn to_backend(&self) -> Result<Value> {
                    Ok(serde_json::to_value(self)?)
                }
            }
        )*
    };
}

/// Number fields come back as decimal strings, so numeric attributes accept
/// both JSON numbers and strings holding one.
macro_rules! impl_field_for_number {
    ( $( $ty:ty => $name:literal, )* ) => {
        $(
            impl Field for $ty {
                fn from_backend(_db: Option<&Database>, value: Value) -> Result<Self> {
                    let parsed = match &value {
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        value => <$ty>::deserialize(value).ok(),
                    };
                    parsed.ok_or_else(|| Error::type_conversion(&value, $name))
                }

                fn to_backend(&self) -> Result<Value> {
                    Ok(serde_json::to_value(self)?)
                }
            }
        )*
    };
}

impl_field_for_number! {
    i32 => "i32",
    i64 => "i64",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
    f64 => "f64",
}

impl_field_via_serde! {
    bool => "bool",
    jiff::civil::Date => "date",
    jiff::Timestamp => "timestamp",
}

impl Field for String {
    fn from_backend(_db: Option<&Database>, value: Value) -> Result<Self> {
        match value {
            Value::String(value) => Ok(value),
            // Number and text fields come back as strings or numbers depending on settings.
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(Error::type_conversion(&value, "String")),
        }
    }

    fn to_backend(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl Field for Value {
    fn from_backend(_db: Option<&Database>, value: Value) -> Result<Self> {
        Ok(value)
    }

    fn to_backend(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

impl<T: Field> Field for Option<T> {
    fn from_backend(db: Option<&Database>, value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_backend(db, value).map(Some),
        }
    }

    fn to_backend(&self) -> Result<Value> {
        match self {
            Some(value) => value.to_backend(),
            None => Ok(Value::Null),
        }
    }
}

impl<M: Model> Field for LinkedRow<M> {
    fn from_backend(db: Option<&Database>, value: Value) -> Result<Self> {
        let refs = match value {
            Value::Null => vec![],
            value => Vec::<Ref>::deserialize(&value)
                .map_err(|_| Error::type_conversion(&value, "link row"))?,
        };
        Ok(LinkedRow::new(db.cloned(), refs))
    }

    fn to_backend(&self) -> Result<Value> {
        Ok(Value::Array(
            self.refs().iter().map(|r| Value::from(r.id)).collect(),
        ))
    }
}

/// Attribute types that declare a link to another model.
pub trait LinkField {
    fn model_ref() -> ModelRef;
}

impl<M: Model> LinkField for LinkedRow<M> {
    fn model_ref() -> ModelRef {
        ModelRef::of::<M>()
    }
}
