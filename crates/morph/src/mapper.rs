mod bidirectional;
pub use bidirectional::{BidirectionalMapper, BidirectionalProfile};

use crate::compile::CompiledMap;
use crate::convention::{self, Convention};
use crate::lazy::Lazy;
use crate::{MapperConfig, MapperFlags};
use morph_core::{Model, Result};

use std::sync::Arc;

/// Copies member values from a source into an existing target.
pub trait Map<S, T>: Send + Sync {
    fn map(&self, source: &S, target: &mut T) -> Result<()>;

    /// Configures the mapper if needed, and returns the outcome of
    /// validating its plan.
    fn validate(&self) -> Result<()>;
}

/// Conveniences built on [`Map::map`].
pub trait MapExt<S, T>: Map<S, T> {
    /// Maps into `T::default()`.
    fn map_new(&self, source: &S) -> Result<T>
    where
        T: Default,
    {
        self.map_with(source, T::default)
    }

    /// Maps into a target built by `factory`.
    fn map_with(&self, source: &S, factory: impl FnOnce() -> T) -> Result<T> {
        let mut target = factory();
        self.map(source, &mut target)?;
        Ok(target)
    }

    /// Maps every source into a fresh target, stopping at the first error.
    fn map_all<'a>(&self, sources: impl IntoIterator<Item = &'a S>) -> Result<Vec<T>>
    where
        S: 'a,
        T: Default,
    {
        sources
            .into_iter()
            .map(|source| self.map_new(source))
            .collect()
    }
}

impl<S, T, M: ?Sized + Map<S, T>> MapExt<S, T> for M {}

impl<S, T, M: ?Sized + Map<S, T>> Map<S, T> for Arc<M> {
    fn map(&self, source: &S, target: &mut T) -> Result<()> {
        (**self).map(source, target)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

/// Configures a [`Mapper`].
///
/// Conventions run first; `configure` runs after them and overrides
/// whatever they bound. Closures taking `&mut MapperConfig<S, T>` are
/// profiles that keep the default conventions.
pub trait MapperProfile<S, T>: Send + Sync + 'static {
    fn flags(&self) -> MapperFlags {
        MapperFlags::default()
    }

    fn conventions(&self) -> Vec<Box<dyn Convention>> {
        convention::for_mapper(self.flags())
    }

    fn configure(&self, config: &mut MapperConfig<S, T>) {
        let _ = config;
    }
}

impl<S, T, F> MapperProfile<S, T> for F
where
    F: Fn(&mut MapperConfig<S, T>) + Send + Sync + 'static,
{
    fn configure(&self, config: &mut MapperConfig<S, T>) {
        self(config)
    }
}

/// The default conventions and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct Defaults;

impl<S, T> MapperProfile<S, T> for Defaults {}

/// Maps `S` into `T` with a plan built from conventions and a profile.
///
/// The plan is built, validated and compiled once, on first use. A plan
/// that fails validation is remembered, and every call reports the same
/// error.
pub struct Mapper<S, T> {
    profile: Box<dyn MapperProfile<S, T>>,
    compiled: Lazy<CompiledMap<S, T>>,
}

impl<S: Model, T: Model> Mapper<S, T> {
    pub fn new(profile: impl MapperProfile<S, T>) -> Mapper<S, T> {
        Mapper {
            profile: Box::new(profile),
            compiled: Lazy::new(),
        }
    }

    fn compiled(&self) -> Result<Arc<CompiledMap<S, T>>> {
        self.compiled.get_or_configure(
            || {
                format!(
                    "mapper from '{}' to '{}'",
                    S::schema().name,
                    T::schema().name
                )
            },
            || self.configure(),
        )
    }

    fn configure(&self) -> Result<CompiledMap<S, T>> {
        let (source, target) = (S::schema().name, T::schema().name);
        tracing::debug!(source, target, "configuring mapper");

        let mut config = MapperConfig::new();
        convention::apply_all(&self.profile.conventions(), &mut config)?;
        self.profile.configure(&mut config);

        CompiledMap::compile(&config.into_plan()).inspect_err(|err| {
            tracing::debug!(source, target, error = %err, "mapper validation failed");
        })
    }
}

impl<S: Model, T: Model> Default for Mapper<S, T> {
    fn default() -> Self {
        Mapper::new(Defaults)
    }
}

impl<S: Model, T: Model> Map<S, T> for Mapper<S, T> {
    fn map(&self, source: &S, target: &mut T) -> Result<()> {
        self.compiled()?.run(source, target)
    }

    fn validate(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }
}

impl<S, T> core::fmt::Debug for Mapper<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapper")
            .field("source", &core::any::type_name::<S>())
            .field("target", &core::any::type_name::<T>())
            .finish()
    }
}
