mod builtin;
use builtin::Builtin;

use morph_core::{Result, Type, Value};
use std::sync::Arc;

/// Converts values between two member types that are not assignable.
pub trait Converter: Send + Sync {
    fn can_convert(&self, from: &Type, to: &Type) -> bool;

    fn convert(&self, value: Value, to: &Type) -> Result<Value>;
}

/// The set of conversions the convertible-type convention may use.
///
/// Converters added with [`Conversions::with`] are consulted before the
/// built-in ones, most recent first.
#[derive(Clone)]
pub struct Conversions {
    converters: Vec<Arc<dyn Converter>>,
}

impl Conversions {
    pub fn builtin() -> Conversions {
        Conversions {
            converters: vec![Arc::new(Builtin)],
        }
    }

    /// No conversions at all.
    pub fn empty() -> Conversions {
        Conversions { converters: vec![] }
    }

    pub fn with(mut self, converter: impl Converter + 'static) -> Conversions {
        self.converters.insert(0, Arc::new(converter));
        self
    }

    /// Returns the first converter able to convert `from` into `to`.
    pub fn find(&self, from: &Type, to: &Type) -> Option<Arc<dyn Converter>> {
        self.converters
            .iter()
            .find(|converter| converter.can_convert(from, to))
            .cloned()
    }
}

impl Default for Conversions {
    fn default() -> Self {
        Conversions::builtin()
    }
}

impl core::fmt::Debug for Conversions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Conversions")
            .field("converters", &self.converters.len())
            .finish()
    }
}
