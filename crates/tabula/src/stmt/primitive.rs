use super::{Type, Value};
use crate::{Error, Result};

use chrono::{NaiveDate, NaiveDateTime};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// A Rust type that can be stored in a mapped field.
///
/// `TYPE` is the column type the field maps to. `Option<T>` reuses `T`'s
/// column type and only flips `NULLABLE`.
pub trait Primitive: Sized {
    const TYPE: Type;
    const NULLABLE: bool = false;

    /// Reads the field into a [`Value`].
    fn to_value(&self) -> Value;

    /// Converts a [`Value`] back into the field's type.
    fn load(value: Value) -> Result<Self>;
}

macro_rules! impl_primitive_via_try_from {
    ( $( $ty:ty => $variant:ident, )* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }

                fn load(value: Value) -> Result<Self> {
                    value.try_into()
                }
            }
        )*
    };
}

impl_primitive_via_try_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
}

impl Primitive for bool {
    const TYPE: Type = Type::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(value, Type::Bool)),
        }
    }
}

impl Primitive for char {
    const TYPE: Type = Type::Char;

    fn to_value(&self) -> Value {
        Value::Char(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Char(v) => Ok(v),
            _ => Err(Error::type_conversion(value, Type::Char)),
        }
    }
}

impl Primitive for String {
    const TYPE: Type = Type::String;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(value, Type::String)),
        }
    }
}

impl Primitive for Vec<u8> {
    const TYPE: Type = Type::Bytes;

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            _ => Err(Error::type_conversion(value, Type::Bytes)),
        }
    }
}

impl Primitive for Uuid {
    const TYPE: Type = Type::Uuid;

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            // Stores without a native UUID type hand back the hyphenated text.
            Value::String(v) => Ok(Uuid::parse_str(&v)?),
            _ => Err(Error::type_conversion(value, Type::Uuid)),
        }
    }
}

/// Reference-typed fields. The `Arc` is cloned, never the pointee, so every
/// copy made through the mapping shares one allocation.
impl<T: Any + Send + Sync> Primitive for Arc<T> {
    const TYPE: Type = Type::Shared;

    fn to_value(&self) -> Value {
        Value::shared(self.clone())
    }

    fn load(value: Value) -> Result<Self> {
        let Value::Shared(shared) = value else {
            return Err(Error::type_conversion(value, Type::Shared));
        };

        shared.0.downcast::<T>().map_err(|_| {
            crate::err!(
                "shared value is not a `{}`",
                std::any::type_name::<T>()
            )
        })
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }
}
