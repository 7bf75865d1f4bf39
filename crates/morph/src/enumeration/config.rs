use super::{Coverage, DynEnumMapper, Mapping};
use morph_core::{err, Error, Member, Result, Value};

use std::marker::PhantomData;
use std::sync::Arc;

/// Variant mappings for an [`EnumMapper`](super::EnumMapper).
///
/// ```ignore
/// config.map(Status::Active).to(State::On);
/// config.map(Status::Retired).raise("retired accounts cannot be exported");
/// ```
pub struct EnumConfig<S, T> {
    mapper: DynEnumMapper,
    _p: PhantomData<fn(S) -> T>,
}

/// Sets the mapping of one source variant.
pub struct EnumBinder<'a, S, T> {
    config: &'a mut EnumConfig<S, T>,

    /// `None` when the source value was `Null`, which needs no mapping
    variant: Option<usize>,
}

impl<S: Member, T: Member> EnumConfig<S, T> {
    pub(super) fn new() -> Result<EnumConfig<S, T>> {
        Ok(EnumConfig {
            mapper: DynEnumMapper::unmapped(&S::ty(), &T::ty())?.with_coverage(Coverage::Source),
            _p: PhantomData,
        })
    }

    /// Starts the mapping of `source`. A later mapping of the same variant
    /// replaces this one.
    pub fn map(&mut self, source: S) -> EnumBinder<'_, S, T> {
        let variant = match source.into_value() {
            Value::Enum(value) if value.schema() == self.mapper.source_enum() => {
                Some(value.variant())
            }
            _ => None,
        };

        EnumBinder {
            config: self,
            variant,
        }
    }

    pub(super) fn into_mapper(self) -> DynEnumMapper {
        self.mapper
    }
}

impl<S: Member, T: Member> EnumBinder<'_, S, T> {
    pub fn to(self, target: T) {
        let mapping = match target.into_value() {
            Value::Enum(value) => Mapping::To(value.variant()),
            _ => Mapping::Null,
        };

        self.set(mapping);
    }

    /// Mapping the variant fails with `message`.
    pub fn raise(self, message: impl Into<String>) {
        let message: Arc<str> = message.into().into();
        self.set(Mapping::Raise(Arc::new(move || err!("{}", message))));
    }

    /// Mapping the variant fails with the error built by `f`. `f` runs each
    /// time the variant is mapped, never during configuration.
    pub fn raise_with(self, f: impl Fn() -> Error + Send + Sync + 'static) {
        self.set(Mapping::Raise(Arc::new(f)));
    }

    fn set(self, mapping: Mapping) {
        if let Some(variant) = self.variant {
            self.config.mapper.set(variant, mapping);
        }
    }
}
