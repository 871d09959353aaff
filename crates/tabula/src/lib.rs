pub mod convert;
pub use convert::MergeStats;

pub mod diff;
pub use diff::{Change, ChangeKind};

mod error;
pub use error::{Error, IntoError};


mod registry;
pub use registry::Registry;

pub mod schema;
pub use schema::{FieldAccessor, FieldMapping, Record, TypeMapping};

pub mod stmt;
pub use stmt::{Type, Value};

pub mod table;
pub use table::{Column, Row, Table};

pub use tabula_macros::Record;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Returns the mapping for `R` from the process-wide registry, building it on
/// first use.
pub fn mapping<R: Record>() -> Result<std::sync::Arc<TypeMapping<R>>> {
    Registry::global().mapping::<R>()
}

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        schema::{Descriptor, FieldDescriptor},
        stmt::{Primitive, Type, Value},
        Error, Record, Result,
    };
    pub use std::{default::Default, option::Option, string::String, vec::Vec};
}
