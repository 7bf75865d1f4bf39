mod dynamic;
pub use dynamic::{DynAdapt, DynAdapter};
pub(crate) use dynamic::{Erased, Typed};

use crate::compile::CompiledAdapter;
use crate::convention::{self, Convention};
use crate::lazy::Lazy;
use crate::locator::{LocatorRef, WeakLocator};
use crate::mapper::Defaults;
use crate::{AdapterConfig, AdapterFlags, Locator};
use morph_core::{Model, Result, Schema, View};

use std::sync::Arc;

/// Builds read-only view objects backed by a source.
pub trait Adapt<S, T: ?Sized>: Send + Sync {
    /// Returns a view over `source`. Members are computed when they are
    /// read, not here.
    fn create(&self, source: Arc<S>) -> Result<Arc<T>>;

    fn validate(&self) -> Result<()>;

    /// `true` while the adapter's plan is being built on this thread's
    /// call stack.
    #[doc(hidden)]
    fn is_configuring(&self) -> bool {
        false
    }
}

/// Conveniences built on [`Adapt::create`].
pub trait AdaptExt<S, T: ?Sized>: Adapt<S, T> {
    fn create_many(&self, sources: impl IntoIterator<Item = Arc<S>>) -> Result<Vec<Arc<T>>> {
        sources
            .into_iter()
            .map(|source| self.create(source))
            .collect()
    }
}

impl<S, T: ?Sized, A: ?Sized + Adapt<S, T>> AdaptExt<S, T> for A {}

impl<S, T: ?Sized, A: ?Sized + Adapt<S, T>> Adapt<S, T> for Arc<A> {
    fn create(&self, source: Arc<S>) -> Result<Arc<T>> {
        (**self).create(source)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }

    fn is_configuring(&self) -> bool {
        (**self).is_configuring()
    }
}

/// Configures an [`Adapter`].
///
/// Closures taking `&mut AdapterConfig<S>` are profiles that keep the
/// default conventions.
pub trait AdapterProfile<S, T: ?Sized>: Send + Sync + 'static {
    fn flags(&self) -> AdapterFlags {
        AdapterFlags::default()
    }

    /// `locator` resolves adapters for nested members.
    fn conventions(&self, locator: Option<&Locator>) -> Vec<Box<dyn Convention>> {
        convention::for_adapter(self.flags(), locator)
    }

    fn configure(&self, config: &mut AdapterConfig<S>) {
        let _ = config;
    }
}

impl<S, T: ?Sized, F> AdapterProfile<S, T> for F
where
    F: Fn(&mut AdapterConfig<S>) + Send + Sync + 'static,
{
    fn configure(&self, config: &mut AdapterConfig<S>) {
        self(config)
    }
}

impl<S, T: ?Sized> AdapterProfile<S, T> for Defaults {}

/// Implements the view `T` over sources of type `S`.
///
/// ```ignore
/// #[morph::view]
/// trait Summary {
///     fn title(&self) -> String;
/// }
///
/// let adapter = Adapter::<Article, dyn Summary>::default();
/// let summary = adapter.create(Arc::new(article))?;
/// ```
pub struct Adapter<S, T: ?Sized> {
    profile: Box<dyn AdapterProfile<S, T>>,
    core: AdapterCore<S>,
}

impl<S: Model, T: ?Sized + View> Adapter<S, T> {
    /// An adapter with a locator of its own for nested members.
    pub fn new(profile: impl AdapterProfile<S, T>) -> Adapter<S, T> {
        Adapter::build(LocatorRef::Strong(Locator::new()), profile)
    }

    /// An adapter resolving nested members through `locator`.
    pub fn with_locator(locator: &Locator, profile: impl AdapterProfile<S, T>) -> Adapter<S, T> {
        Adapter::build(LocatorRef::Strong(locator.clone()), profile)
    }

    /// An adapter resolving nested members through `locator` without
    /// keeping it alive.
    ///
    /// Use this from factories passed to [`Locator::register_adapter`]: the
    /// locator caches what they build, so a strong handle would never be
    /// freed.
    pub fn with_weak_locator(
        locator: &WeakLocator,
        profile: impl AdapterProfile<S, T>,
    ) -> Adapter<S, T> {
        Adapter::build(LocatorRef::Weak(locator.clone()), profile)
    }

    fn build(locator: LocatorRef, profile: impl AdapterProfile<S, T>) -> Adapter<S, T> {
        Adapter {
            profile: Box::new(profile),
            core: AdapterCore::new(S::schema(), T::schema(), locator),
        }
    }

    fn compiled(&self) -> Result<Arc<CompiledAdapter<S>>> {
        self.core.compiled(
            |locator| self.profile.conventions(locator),
            |config| self.profile.configure(config),
        )
    }
}

impl<S: Model, T: ?Sized + View> Default for Adapter<S, T> {
    fn default() -> Self {
        Adapter::new(Defaults)
    }
}

impl<S: Model, T: ?Sized + View> Adapt<S, T> for Adapter<S, T> {
    fn create(&self, source: Arc<S>) -> Result<Arc<T>> {
        Ok(T::wrap(self.compiled()?.create(source)))
    }

    fn validate(&self) -> Result<()> {
        self.compiled().map(|_| ())
    }

    fn is_configuring(&self) -> bool {
        self.core.is_configuring()
    }
}

impl<S, T: ?Sized> core::fmt::Debug for Adapter<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Adapter")
            .field("source", &self.core.source.name)
            .field("target", &self.core.target.name)
            .finish()
    }
}

/// State shared by typed and dynamic adapters.
pub(crate) struct AdapterCore<S: ?Sized> {
    source: &'static Schema,
    target: &'static Schema,
    locator: LocatorRef,
    compiled: Lazy<CompiledAdapter<S>>,
}

impl<S: ?Sized + Model> AdapterCore<S> {
    pub(crate) fn new(
        source: &'static Schema,
        target: &'static Schema,
        locator: LocatorRef,
    ) -> AdapterCore<S> {
        AdapterCore {
            source,
            target,
            locator,
            compiled: Lazy::new(),
        }
    }

    pub(crate) fn compiled(
        &self,
        conventions: impl FnOnce(Option<&Locator>) -> Vec<Box<dyn Convention>>,
        configure: impl FnOnce(&mut AdapterConfig<S>),
    ) -> Result<Arc<CompiledAdapter<S>>> {
        let (source, target) = (self.source.name, self.target.name);

        self.compiled.get_or_configure(
            || format!("adapter from '{}' to '{}'", source, target),
            || {
                tracing::debug!(source, target, "configuring adapter");

                let locator = self.locator.upgrade();
                let mut config = AdapterConfig::new(self.source, self.target);
                convention::apply_all(&conventions(locator.as_ref()), &mut config)?;
                configure(&mut config);

                CompiledAdapter::compile(&config.into_plan()).inspect_err(|err| {
                    tracing::debug!(source, target, error = %err, "adapter validation failed");
                })
            },
        )
    }

    pub(crate) fn is_configuring(&self) -> bool {
        self.compiled.is_configuring()
    }
}
