use super::{Defaults, Map, Mapper, MapperProfile};
use crate::{MapperConfig, MapperFlags};
use morph_core::{Model, Result};

use std::sync::Arc;

/// Configures both directions of a [`BidirectionalMapper`].
pub trait BidirectionalProfile<A, B>: Send + Sync + 'static {
    fn flags(&self) -> MapperFlags {
        MapperFlags::default()
    }

    fn configure_forward(&self, config: &mut MapperConfig<A, B>) {
        let _ = config;
    }

    fn configure_reverse(&self, config: &mut MapperConfig<B, A>) {
        let _ = config;
    }
}

impl<A, B> BidirectionalProfile<A, B> for Defaults {}

/// A pair of mappers, `A` to `B` and back, configured by one profile.
///
/// Each direction is configured and compiled independently, on its first
/// use.
pub struct BidirectionalMapper<A, B> {
    forward: Mapper<A, B>,
    reverse: Mapper<B, A>,
}

struct Forward<P>(Arc<P>);

struct Reverse<P>(Arc<P>);

impl<A, B, P: BidirectionalProfile<A, B>> MapperProfile<A, B> for Forward<P> {
    fn flags(&self) -> MapperFlags {
        self.0.flags()
    }

    fn configure(&self, config: &mut MapperConfig<A, B>) {
        self.0.configure_forward(config);
    }
}

impl<A, B, P: BidirectionalProfile<A, B>> MapperProfile<B, A> for Reverse<P> {
    fn flags(&self) -> MapperFlags {
        self.0.flags()
    }

    fn configure(&self, config: &mut MapperConfig<B, A>) {
        self.0.configure_reverse(config);
    }
}

impl<A: Model, B: Model> BidirectionalMapper<A, B> {
    pub fn new(profile: impl BidirectionalProfile<A, B>) -> BidirectionalMapper<A, B> {
        let profile = Arc::new(profile);

        BidirectionalMapper {
            forward: Mapper::new(Forward(profile.clone())),
            reverse: Mapper::new(Reverse(profile)),
        }
    }

    pub fn map(&self, source: &A, target: &mut B) -> Result<()> {
        self.forward.map(source, target)
    }

    pub fn map_reverse(&self, source: &B, target: &mut A) -> Result<()> {
        self.reverse.map(source, target)
    }

    /// Validates the forward direction, then the reverse one.
    pub fn validate(&self) -> Result<()> {
        self.forward.validate()?;
        self.reverse.validate()
    }

    pub fn forward(&self) -> &Mapper<A, B> {
        &self.forward
    }

    pub fn reverse(&self) -> &Mapper<B, A> {
        &self.reverse
    }
}

impl<A: Model, B: Model> Default for BidirectionalMapper<A, B> {
    fn default() -> Self {
        BidirectionalMapper::new(Defaults)
    }
}
