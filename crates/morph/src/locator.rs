use crate::adapter::{Erased, Typed};
use crate::{Adapt, Adapter, Defaults, DynAdapt, DynAdapter, Map, Mapper};
use morph_core::value::ObjectDescriptor;
use morph_core::{err, Model, Object, Result, View};

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Finds an adapter for a runtime pair of types.
///
/// A [`Locator`] consults its fallback after its own registrations and
/// before building a default adapter.
pub trait LocateAdapter: Send + Sync {
    fn locate(
        &self,
        source: &'static ObjectDescriptor,
        target: &'static ObjectDescriptor,
    ) -> Option<Arc<dyn DynAdapt>>;
}

/// Resolves and caches the mapper or adapter used for each pair of types.
///
/// Registered factories take precedence over defaults, but only until the
/// pair is first resolved: resolved instances are cached for the life of
/// the locator and never replaced. Cloning a `Locator` yields another handle
/// to the same registry.
#[derive(Clone)]
pub struct Locator {
    shared: Arc<Shared>,
}

/// A handle that does not keep the registry alive.
///
/// Adapters cached by a locator hold one of these, so the cache does not
/// own itself. Registered factories receive one for the same reason; build
/// adapters from it with [`Adapter::with_weak_locator`].
#[derive(Clone)]
pub struct WeakLocator {
    shared: Weak<Shared>,
}

/// How an adapter reaches the locator it resolves nested adapters with.
pub(crate) enum LocatorRef {
    Strong(Locator),
    Weak(WeakLocator),
}

type Key = (TypeId, TypeId);

/// Builds an adapter, returning both its typed and its erased form.
type AdapterFactory = Arc<dyn Fn(&WeakLocator) -> Built + Send + Sync>;

/// Builds an `Arc<dyn Map<S, T>>`, boxed as `Any`.
type MapperFactory = Arc<dyn Fn(&WeakLocator) -> Arc<dyn Any + Send + Sync> + Send + Sync>;

struct Built {
    /// Holds an `Arc<dyn Adapt<S, T>>`
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn DynAdapt>,
}

struct Shared {
    state: Mutex<State>,
    fallback: Option<Arc<dyn LocateAdapter>>,
}

#[derive(Default)]
struct State {
    adapter_factories: HashMap<Key, AdapterFactory>,
    mapper_factories: HashMap<Key, MapperFactory>,

    /// Resolved adapters, by source and target type
    adapters: HashMap<Key, Arc<dyn DynAdapt>>,

    /// Typed forms of resolved adapters, each an `Arc<dyn Adapt<S, T>>`
    typed_adapters: HashMap<Key, Arc<dyn Any + Send + Sync>>,

    /// Resolved mappers, each an `Arc<dyn Map<S, T>>`
    mappers: HashMap<Key, Arc<dyn Any + Send + Sync>>,
}

impl Locator {
    pub fn new() -> Locator {
        Locator::build(None)
    }

    /// A locator that asks `fallback` for pairs it has no registration for.
    pub fn with_fallback(fallback: impl LocateAdapter + 'static) -> Locator {
        Locator::build(Some(Arc::new(fallback)))
    }

    fn build(fallback: Option<Arc<dyn LocateAdapter>>) -> Locator {
        Locator {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                fallback,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakLocator {
        WeakLocator {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Uses `factory` to build the adapter from `S` to `T`, replacing any
    /// earlier registration for the pair.
    ///
    /// Has no effect once the pair has been resolved.
    pub fn register_adapter<S, T, A>(
        &self,
        factory: impl Fn(&WeakLocator) -> A + Send + Sync + 'static,
    )
    where
        S: Model + Object,
        T: ?Sized + View + Object,
        A: Adapt<S, T> + 'static,
    {
        let factory: AdapterFactory = Arc::new(move |locator: &WeakLocator| {
            built::<S, T>(Arc::new(factory(locator)))
        });

        self.shared
            .state
            .lock()
            .adapter_factories
            .insert(key::<S, T>(), factory);
    }

    /// Uses `factory` to build the mapper from `S` to `T`, replacing any
    /// earlier registration for the pair.
    ///
    /// Has no effect once the pair has been resolved.
    pub fn register_mapper<S, T, M>(
        &self,
        factory: impl Fn(&WeakLocator) -> M + Send + Sync + 'static,
    )
    where
        S: Model,
        T: Model,
        M: Map<S, T> + 'static,
    {
        let factory: MapperFactory = Arc::new(move |locator: &WeakLocator| {
            let mapper: Arc<dyn Map<S, T>> = Arc::new(factory(locator));
            Arc::new(mapper) as Arc<dyn Any + Send + Sync>
        });

        self.shared
            .state
            .lock()
            .mapper_factories
            .insert(key::<S, T>(), factory);
    }

    /// Returns the adapter from `S` to `T`.
    pub fn locate_adapter<S, T>(&self) -> Result<Arc<dyn Adapt<S, T>>>
    where
        S: Model + Object,
        T: ?Sized + View + Object,
    {
        let key = key::<S, T>();

        let (factory, erased) = {
            let state = self.shared.state.lock();

            if let Some(typed) = state.typed_adapters.get(&key) {
                return downcast_adapter::<S, T>(typed);
            }

            (
                state.adapter_factories.get(&key).cloned(),
                state.adapters.get(&key).cloned(),
            )
        };

        let built = if let Some(erased) = erased {
            tracing::trace!(
                source = S::descriptor().name,
                target = T::descriptor().name,
                "typing resolved adapter"
            );
            Built {
                typed: typed_any::<S, T>(Arc::new(Typed::<S, T>::new(erased.clone()))),
                erased,
            }
        } else if let Some(factory) = factory {
            tracing::trace!(
                source = S::descriptor().name,
                target = T::descriptor().name,
                "building registered adapter"
            );
            factory(&self.downgrade())
        } else if let Some(erased) = self.fallback(S::descriptor(), T::descriptor()) {
            return Ok(Arc::new(Typed::<S, T>::new(erased)));
        } else {
            tracing::trace!(
                source = S::descriptor().name,
                target = T::descriptor().name,
                "building default adapter"
            );
            built::<S, T>(Arc::new(Adapter::<S, T>::with_weak_locator(
                &self.downgrade(),
                Defaults,
            )))
        };

        let (typed, _) = self.store(key, built);
        downcast_adapter::<S, T>(&typed)
    }

    /// Returns the mapper from `S` to `T`.
    pub fn locate_mapper<S: Model, T: Model>(&self) -> Result<Arc<dyn Map<S, T>>> {
        let key = key::<S, T>();

        let factory = {
            let state = self.shared.state.lock();

            if let Some(mapper) = state.mappers.get(&key) {
                return downcast_mapper::<S, T>(mapper);
            }

            state.mapper_factories.get(&key).cloned()
        };

        let mapper = match factory {
            Some(factory) => factory(&self.downgrade()),
            None => {
                let mapper: Arc<dyn Map<S, T>> = Arc::new(Mapper::<S, T>::default());
                Arc::new(mapper) as Arc<dyn Any + Send + Sync>
            }
        };

        let mapper = self
            .shared
            .state
            .lock()
            .mappers
            .entry(key)
            .or_insert(mapper)
            .clone();

        downcast_mapper::<S, T>(&mapper)
    }

    /// Returns the adapter between two types known only at runtime.
    ///
    /// Fails with [`Error::adapter_unavailable`](morph_core::Error) when no
    /// registration or fallback covers the pair, and `source` is not a model
    /// or `target` is not a view.
    pub fn resolve(
        &self,
        source: &'static ObjectDescriptor,
        target: &'static ObjectDescriptor,
    ) -> Result<Arc<dyn DynAdapt>> {
        let key = (source.type_id, target.type_id);

        let factory = {
            let state = self.shared.state.lock();

            if let Some(adapter) = state.adapters.get(&key) {
                return Ok(adapter.clone());
            }

            state.adapter_factories.get(&key).cloned()
        };

        if let Some(factory) = factory {
            tracing::trace!(source = source.name, target = target.name, "building registered adapter");
            let (_, erased) = self.store(key, factory(&self.downgrade()));
            return Ok(erased);
        }

        if let Some(adapter) = self.fallback(source, target) {
            return Ok(adapter);
        }

        tracing::trace!(source = source.name, target = target.name, "building default adapter");

        let adapter: Arc<dyn DynAdapt> = Arc::new(DynAdapter::new(
            source,
            target,
            LocatorRef::Weak(self.downgrade()),
        )?);

        Ok(self
            .shared
            .state
            .lock()
            .adapters
            .entry(key)
            .or_insert(adapter)
            .clone())
    }

    fn fallback(
        &self,
        source: &'static ObjectDescriptor,
        target: &'static ObjectDescriptor,
    ) -> Option<Arc<dyn DynAdapt>> {
        let adapter = self.shared.fallback.as_ref()?.locate(source, target)?;
        tracing::trace!(source = source.name, target = target.name, "adapter from fallback");
        Some(adapter)
    }

    /// Caches both forms of an adapter. Entries already present are kept
    /// and returned instead.
    fn store(&self, key: Key, built: Built) -> (Arc<dyn Any + Send + Sync>, Arc<dyn DynAdapt>) {
        let mut state = self.shared.state.lock();

        let erased = state.adapters.entry(key).or_insert(built.erased).clone();
        let typed = state
            .typed_adapters
            .entry(key)
            .or_insert(built.typed)
            .clone();

        (typed, erased)
    }
}

impl Default for Locator {
    fn default() -> Self {
        Locator::new()
    }
}

impl LocateAdapter for Locator {
    fn locate(
        &self,
        source: &'static ObjectDescriptor,
        target: &'static ObjectDescriptor,
    ) -> Option<Arc<dyn DynAdapt>> {
        self.resolve(source, target).ok()
    }
}

impl core::fmt::Debug for Locator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.shared.state.lock();

        f.debug_struct("Locator")
            .field("adapters", &state.adapters.len())
            .field("mappers", &state.mappers.len())
            .field("fallback", &self.shared.fallback.is_some())
            .finish()
    }
}

impl WeakLocator {
    pub fn upgrade(&self) -> Option<Locator> {
        self.shared.upgrade().map(|shared| Locator { shared })
    }
}

impl LocatorRef {
    pub(crate) fn upgrade(&self) -> Option<Locator> {
        match self {
            LocatorRef::Strong(locator) => Some(locator.clone()),
            LocatorRef::Weak(locator) => locator.upgrade(),
        }
    }
}

fn key<S: ?Sized + 'static, T: ?Sized + 'static>() -> Key {
    (TypeId::of::<S>(), TypeId::of::<T>())
}

fn built<S, T>(adapter: Arc<dyn Adapt<S, T>>) -> Built
where
    S: Model + Object,
    T: ?Sized + View + Object,
{
    Built {
        typed: typed_any(adapter.clone()),
        erased: Arc::new(Erased(adapter)),
    }
}

fn typed_any<S: 'static, T: ?Sized + 'static>(
    adapter: Arc<dyn Adapt<S, T>>,
) -> Arc<dyn Any + Send + Sync> {
    Arc::new(adapter)
}

fn downcast_adapter<S: 'static, T: ?Sized + 'static>(
    typed: &Arc<dyn Any + Send + Sync>,
) -> Result<Arc<dyn Adapt<S, T>>> {
    typed
        .downcast_ref::<Arc<dyn Adapt<S, T>>>()
        .cloned()
        .ok_or_else(|| err!("cached adapter has an unexpected type"))
}

fn downcast_mapper<S: 'static, T: 'static>(
    mapper: &Arc<dyn Any + Send + Sync>,
) -> Result<Arc<dyn Map<S, T>>> {
    mapper
        .downcast_ref::<Arc<dyn Map<S, T>>>()
        .cloned()
        .ok_or_else(|| err!("cached mapper has an unexpected type"))
}
