use chrono::{NaiveDate, NaiveDateTime};

use super::{Type, Value};
use crate::Error;

macro_rules! impl_chrono_conversions {
    ($chrono:ty, $name:ident) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Self::$name(value)
            }
        }

        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$name(value) => Ok(value),
                    _ => Err(Error::type_conversion(value, Type::$name)),
                }
            }
        }
    };
}

impl_chrono_conversions!(NaiveDate, Date);
impl_chrono_conversions!(NaiveDateTime, DateTime);
