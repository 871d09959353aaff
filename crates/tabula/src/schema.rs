//! Per-type schema: what a record declares about itself and the mapping built
//! from it.

mod descriptor;
pub use descriptor::{Descriptor, FieldDescriptor, Record};

mod field;
pub use field::{FieldAccessor, FieldMapping};

mod mapping;
pub use mapping::TypeMapping;
