//! R source generation: literals and call expressions.

pub mod call;
pub mod literal;

pub use call::{encode_call, Command, NamedArgs};
pub use literal::{Literal, Number};
