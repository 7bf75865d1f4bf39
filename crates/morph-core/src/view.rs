use crate::{Error, Member, Model, Result, Schema, Value};

use std::sync::Arc;

/// A trait that adapters can implement.
///
/// `#[view]` implements this for `dyn Trait`, and implements `Trait` itself
/// for [`Adapted<S>`].
pub trait View: Send + Sync + 'static {
    fn schema() -> &'static Schema;

    fn wrap<S: ?Sized + Model>(adapted: Adapted<S>) -> Arc<Self>;
}

/// Computes one member of an adapted view from its source.
pub type Getter<S> = Arc<dyn Fn(&S) -> Result<Value> + Send + Sync>;

/// The object behind every adapter-produced view.
///
/// Holds the source and one getter per target member. Reading a member runs
/// that member's getter, and only that one, each time it is read.
pub struct Adapted<S: ?Sized> {
    source: Arc<S>,
    target: &'static Schema,
    getters: Arc<[Getter<S>]>,
}

impl<S: ?Sized> Adapted<S> {
    pub fn new(source: Arc<S>, target: &'static Schema, getters: Arc<[Getter<S>]>) -> Adapted<S> {
        debug_assert_eq!(target.members.len(), getters.len());
        Adapted {
            source,
            target,
            getters,
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Schema of the view this object was created for.
    pub fn target(&self) -> &'static Schema {
        self.target
    }

    /// Evaluates member `index` of `view`, which is the adapted view or one
    /// it extends.
    pub fn read(&self, view: &'static Schema, index: usize) -> Result<Value> {
        let getter = self
            .target
            .translate(view, index)
            .and_then(|index| self.getters.get(index))
            .ok_or_else(|| Error::unknown_member(view.name, index))?;

        getter(&self.source)
    }

    pub fn try_read<M: Member>(&self, view: &'static Schema, index: usize) -> Result<M> {
        M::from_value(self.read(view, index)?)
    }

    /// Like [`Adapted::try_read`], for view methods that do not return a
    /// `Result`.
    ///
    /// # Panics
    ///
    /// Panics if the binding fails or yields a value of the wrong type.
    #[track_caller]
    pub fn read_or_panic<M: Member>(&self, view: &'static Schema, index: usize) -> M {
        match self.try_read(view, index) {
            Ok(value) => value,
            Err(err) => {
                let name = view.member(index).map(|member| member.name).unwrap_or("?");
                panic!("failed to read '{}.{}': {}", view.name, name, err)
            }
        }
    }
}

impl<S: ?Sized> Clone for Adapted<S> {
    fn clone(&self) -> Self {
        Adapted {
            source: self.source.clone(),
            target: self.target,
            getters: self.getters.clone(),
        }
    }
}

impl<S: ?Sized> core::fmt::Debug for Adapted<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Adapted")
            .field("target", &self.target.name)
            .finish_non_exhaustive()
    }
}
