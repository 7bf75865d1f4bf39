use super::{Adapt, AdapterCore};
use crate::convention;
use crate::locator::LocatorRef;
use crate::AdapterFlags;
use morph_core::value::{ObjectDescriptor, ObjectRef};
use morph_core::{Adapted, Error, Member, Model, Object, Result, Value};

use std::marker::PhantomData;
use std::sync::Arc;

/// An adapter whose source and target types are known only at runtime.
///
/// This is what the locator hands out when a convention needs to adapt a
/// nested member.
pub trait DynAdapt: Send + Sync {
    fn source(&self) -> &'static ObjectDescriptor;

    fn target(&self) -> &'static ObjectDescriptor;

    fn validate(&self) -> Result<()>;

    /// `true` while the adapter's plan is being built.
    fn is_configuring(&self) -> bool;

    /// Adapts the referenced source object, returning the view as a
    /// [`Value::Object`].
    fn adapt(&self, source: &ObjectRef) -> Result<Value>;
}

/// Default adapter between a model and a view described only by their
/// [`ObjectDescriptor`]s.
pub struct DynAdapter {
    source: &'static ObjectDescriptor,
    target: &'static ObjectDescriptor,
    erase: fn(&ObjectRef) -> Option<Arc<dyn Model>>,
    wrap: fn(Adapted<dyn Model>) -> Value,
    core: AdapterCore<dyn Model>,
}

impl DynAdapter {
    pub(crate) fn new(
        source: &'static ObjectDescriptor,
        target: &'static ObjectDescriptor,
        locator: LocatorRef,
    ) -> Result<DynAdapter> {
        let Some(model) = source.model_hooks() else {
            return Err(Error::adapter_unavailable(
                source.name,
                target.name,
                "the source is not a model",
            ));
        };

        let Some(view) = target.view_hooks() else {
            return Err(Error::adapter_unavailable(
                source.name,
                target.name,
                "the target is not a view",
            ));
        };

        Ok(DynAdapter {
            source,
            target,
            erase: model.erase,
            wrap: view.wrap,
            core: AdapterCore::new((model.schema)(), (view.schema)(), locator),
        })
    }
}

impl DynAdapt for DynAdapter {
    fn source(&self) -> &'static ObjectDescriptor {
        self.source
    }

    fn target(&self) -> &'static ObjectDescriptor {
        self.target
    }

    fn validate(&self) -> Result<()> {
        self.core
            .compiled(
                |locator| convention::for_adapter(AdapterFlags::default(), locator),
                |_| {},
            )
            .map(|_| ())
    }

    fn is_configuring(&self) -> bool {
        self.core.is_configuring()
    }

    fn adapt(&self, source: &ObjectRef) -> Result<Value> {
        let Some(model) = (self.erase)(source) else {
            return Err(Error::type_conversion(
                Value::Object(source.clone()),
                self.source.name,
            ));
        };

        let compiled = self.core.compiled(
            |locator| convention::for_adapter(AdapterFlags::default(), locator),
            |_| {},
        )?;

        Ok((self.wrap)(compiled.create(model)))
    }
}

impl core::fmt::Debug for DynAdapter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynAdapter")
            .field("source", &self.source.name)
            .field("target", &self.target.name)
            .finish()
    }
}

/// A typed adapter seen through [`DynAdapt`].
pub(crate) struct Erased<S, T: ?Sized>(pub(crate) Arc<dyn Adapt<S, T>>);

impl<S: Object, T: ?Sized + Object> DynAdapt for Erased<S, T> {
    fn source(&self) -> &'static ObjectDescriptor {
        S::descriptor()
    }

    fn target(&self) -> &'static ObjectDescriptor {
        T::descriptor()
    }

    fn validate(&self) -> Result<()> {
        self.0.validate()
    }

    fn is_configuring(&self) -> bool {
        self.0.is_configuring()
    }

    fn adapt(&self, source: &ObjectRef) -> Result<Value> {
        let Some(source) = source.downcast::<S>() else {
            return Err(Error::type_conversion(
                Value::Object(source.clone()),
                S::descriptor().name,
            ));
        };

        Ok(self.0.create(source)?.into_value())
    }
}

/// A [`DynAdapt`] used where a typed adapter is expected.
pub(crate) struct Typed<S, T: ?Sized> {
    inner: Arc<dyn DynAdapt>,
    _p: PhantomData<fn(Arc<S>) -> Arc<T>>,
}

impl<S, T: ?Sized> Typed<S, T> {
    pub(crate) fn new(inner: Arc<dyn DynAdapt>) -> Typed<S, T> {
        Typed {
            inner,
            _p: PhantomData,
        }
    }
}

impl<S: Object, T: ?Sized + Object> Adapt<S, T> for Typed<S, T> {
    fn create(&self, source: Arc<S>) -> Result<Arc<T>> {
        Arc::<T>::from_value(self.inner.adapt(&ObjectRef::new(source))?)
    }

    fn validate(&self) -> Result<()> {
        self.inner.validate()
    }

    fn is_configuring(&self) -> bool {
        self.inner.is_configuring()
    }
}
