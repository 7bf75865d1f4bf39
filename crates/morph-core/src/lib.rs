mod error;
pub use error::{Error, IntoError};

mod model;
pub use model::Model;

pub mod schema;
pub use schema::Schema;

pub mod value;
pub use value::{Member, Object, Type, Value};

mod view;
pub use view::{Adapted, Getter, View};

/// A Result type alias that uses morph's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
