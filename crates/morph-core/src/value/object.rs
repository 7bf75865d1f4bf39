use super::{Member, Value};
use crate::{Adapted, Model, Schema, View};

use std::any::{Any, TypeId};
use std::sync::Arc;

/// A type that members may reference as `Arc<T>`.
///
/// Implemented by `#[derive(Model)]`, `#[derive(Object)]` and, for
/// `dyn Trait`, by `#[view]`.
pub trait Object: Send + Sync + 'static {
    fn descriptor() -> &'static ObjectDescriptor;
}

/// Runtime description of an [`Object`] type.
pub struct ObjectDescriptor {
    /// Name of the type, as written in diagnostics.
    pub name: &'static str,

    pub type_id: TypeId,

    pub kind: ObjectKind,
}

pub enum ObjectKind {
    /// Referenced as is; never adapted.
    Opaque,

    Model(ModelHooks),

    View(ViewHooks),
}

/// Entry points that let the engine read a model it only knows at runtime.
#[derive(Clone, Copy)]
pub struct ModelHooks {
    pub schema: fn() -> &'static Schema,

    /// Recovers the model from a reference produced by its own `Member`
    /// impl.
    pub erase: fn(&ObjectRef) -> Option<Arc<dyn Model>>,
}

/// Entry points that let the engine build a view it only knows at runtime.
#[derive(Clone, Copy)]
pub struct ViewHooks {
    pub schema: fn() -> &'static Schema,

    /// Wraps an adapted source as `Arc<dyn View>` inside a [`Value`].
    pub wrap: fn(Adapted<dyn Model>) -> Value,
}

impl ObjectDescriptor {
    pub fn opaque<T: ?Sized + 'static>(name: &'static str) -> ObjectDescriptor {
        ObjectDescriptor {
            name,
            type_id: TypeId::of::<T>(),
            kind: ObjectKind::Opaque,
        }
    }

    pub fn model<T: Model + Object>() -> ObjectDescriptor {
        ObjectDescriptor {
            name: T::schema().name,
            type_id: TypeId::of::<T>(),
            kind: ObjectKind::Model(ModelHooks {
                schema: T::schema,
                erase: erase_model::<T>,
            }),
        }
    }

    pub fn view<T: ?Sized + View + Object>() -> ObjectDescriptor {
        ObjectDescriptor {
            name: T::schema().name,
            type_id: TypeId::of::<T>(),
            kind: ObjectKind::View(ViewHooks {
                schema: T::schema,
                wrap: wrap_view::<T>,
            }),
        }
    }

    pub fn model_hooks(&self) -> Option<&ModelHooks> {
        match &self.kind {
            ObjectKind::Model(hooks) => Some(hooks),
            _ => None,
        }
    }

    pub fn view_hooks(&self) -> Option<&ViewHooks> {
        match &self.kind {
            ObjectKind::View(hooks) => Some(hooks),
            _ => None,
        }
    }
}

fn erase_model<T: Model + Object>(object: &ObjectRef) -> Option<Arc<dyn Model>> {
    object.downcast::<T>().map(|model| model as Arc<dyn Model>)
}

fn wrap_view<T: ?Sized + View + Object>(adapted: Adapted<dyn Model>) -> Value {
    T::wrap(adapted).into_value()
}

impl PartialEq for ObjectDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl core::fmt::Debug for ObjectDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = match self.kind {
            ObjectKind::Opaque => "Opaque",
            ObjectKind::Model(_) => "Model",
            ObjectKind::View(_) => "View",
        };

        f.debug_struct("ObjectDescriptor")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// A type-erased `Arc<T>` held by a [`Value`].
///
/// Equality is referent identity: two refs are equal when they point at the
/// same object.
#[derive(Clone)]
pub struct ObjectRef {
    descriptor: &'static ObjectDescriptor,

    /// Address of the referent, for identity comparisons
    addr: usize,

    /// Holds an `Arc<T>`
    inner: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
    pub fn new<T: ?Sized + Object>(object: Arc<T>) -> ObjectRef {
        ObjectRef {
            descriptor: T::descriptor(),
            addr: Arc::as_ptr(&object) as *const () as usize,
            inner: Arc::new(object),
        }
    }

    pub fn descriptor(&self) -> &'static ObjectDescriptor {
        self.descriptor
    }

    /// Returns the referenced object if it is a `T`.
    pub fn downcast<T: ?Sized + Object>(&self) -> Option<Arc<T>> {
        self.inner.downcast_ref::<Arc<T>>().cloned()
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.addr == other.addr && self.descriptor == other.descriptor
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl core::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ObjectRef({} @ {:#x})", self.descriptor.name, self.addr)
    }
}
