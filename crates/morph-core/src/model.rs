use crate::{Result, Schema, Value};

use std::any::Any;

/// A struct whose members can be read and written by index.
///
/// Implemented by `#[derive(Model)]`. Member indices are positions in
/// [`Model::schema`]'s member list; the generated `get` and `set` dispatch
/// on them with a `match`, so no lookup by name happens while mapping.
pub trait Model: Any + Send + Sync {
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Same as [`Model::schema`], callable on `dyn Model`.
    fn model_schema(&self) -> &'static Schema;

    fn get(&self, member: usize) -> Result<Value>;

    fn set(&mut self, member: usize, value: Value) -> Result<()>;
}
