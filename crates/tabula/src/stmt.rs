//! Values, types, and the conversions between them and Rust field types.

mod num;

mod primitive;
pub use primitive::Primitive;

mod ty;
pub use ty::Type;

mod value;
pub use value::{Shared, Value};

mod value_chrono;

mod value_cmp;
