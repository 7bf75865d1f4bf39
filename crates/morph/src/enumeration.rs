mod config;
pub use config::{EnumBinder, EnumConfig};

mod dyn_mapper;
pub use dyn_mapper::{DynEnumMapper, RaiseFn};
pub(crate) use dyn_mapper::{Coverage, Mapping};

use crate::lazy::Lazy;
use morph_core::{Member, Result};

use std::marker::PhantomData;
use std::sync::Arc;

/// Maps each source variant to the target variant with the same name.
///
/// `S` and `T` are derived enums, or `Option`s of them. Every target
/// variant must be produced by some source variant; source variants with
/// no counterpart fail when they are mapped.
pub struct DefaultEnumMapper<S, T> {
    compiled: Lazy<DynEnumMapper>,
    _p: PhantomData<fn(S) -> T>,
}

/// Maps enum values as configured by an [`EnumProfile`].
///
/// Every source variant must be configured.
pub struct EnumMapper<S, T> {
    profile: Box<dyn EnumProfile<S, T>>,
    compiled: Lazy<DynEnumMapper>,
}

/// Configures an [`EnumMapper`].
///
/// Closures taking `&mut EnumConfig<S, T>` are profiles.
pub trait EnumProfile<S, T>: Send + Sync + 'static {
    fn configure(&self, config: &mut EnumConfig<S, T>);
}

impl<S, T, F> EnumProfile<S, T> for F
where
    F: Fn(&mut EnumConfig<S, T>) + Send + Sync + 'static,
{
    fn configure(&self, config: &mut EnumConfig<S, T>) {
        self(config)
    }
}

impl<S: Member, T: Member> DefaultEnumMapper<S, T> {
    /// Fails if `S` or `T` is not an enum, or if only one of them is
    /// nullable.
    pub fn new() -> Result<DefaultEnumMapper<S, T>> {
        DynEnumMapper::unmapped(&S::ty(), &T::ty())?;

        Ok(DefaultEnumMapper {
            compiled: Lazy::new(),
            _p: PhantomData,
        })
    }

    pub fn map_value(&self, value: S) -> Result<T> {
        map_value(self.compiled()?.as_ref(), value)
    }

    pub fn validate(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    fn compiled(&self) -> Result<Arc<DynEnumMapper>> {
        self.compiled.get_or_configure(subject::<S, T>, || {
            let mapper = DynEnumMapper::new(&S::ty(), &T::ty())?;
            configured(&mapper)?;
            Ok(mapper)
        })
    }
}

impl<S: Member, T: Member> EnumMapper<S, T> {
    pub fn new(profile: impl EnumProfile<S, T>) -> Result<EnumMapper<S, T>> {
        DynEnumMapper::unmapped(&S::ty(), &T::ty())?;

        Ok(EnumMapper {
            profile: Box::new(profile),
            compiled: Lazy::new(),
        })
    }

    pub fn map_value(&self, value: S) -> Result<T> {
        map_value(self.compiled()?.as_ref(), value)
    }

    pub fn validate(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    fn compiled(&self) -> Result<Arc<DynEnumMapper>> {
        self.compiled.get_or_configure(subject::<S, T>, || {
            let mut config = EnumConfig::new()?;
            self.profile.configure(&mut config);

            let mapper = config.into_mapper();
            configured(&mapper)?;
            Ok(mapper)
        })
    }
}

fn map_value<S: Member, T: Member>(mapper: &DynEnumMapper, value: S) -> Result<T> {
    T::from_value(mapper.map_value(value.into_value())?)
}

fn configured(mapper: &DynEnumMapper) -> Result<()> {
    tracing::debug!(source = %mapper.source(), target = %mapper.target(), "configuring enum mapper");

    mapper.validate().inspect_err(|err| {
        tracing::debug!(error = %err, "enum mapper validation failed");
    })
}

fn subject<S: Member, T: Member>() -> String {
    format!("enum mapper from '{}' to '{}'", S::ty(), T::ty())
}
