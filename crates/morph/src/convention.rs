mod convertible;
pub use convertible::Convertible;

mod enum_match;
pub use enum_match::EnumMatch;

mod name_and_type;
pub use name_and_type::NameAndTypeMatch;

mod recursive_adapt;
pub use recursive_adapt::RecursiveAdapt;

use crate::{AdapterFlags, Conversions, Locator, MapperFlags};
use morph_core::schema::{MemberDescriptor, Policy};
use morph_core::{Result, Schema, Value};

use std::sync::Arc;

/// Post-processes a value read from a source member before it is stored.
pub type Transform = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A rule that discovers bindings for target members that have none yet.
///
/// Conventions run in order, before custom configuration. Each one only
/// binds members that are still unbound when it runs.
pub trait Convention: Send + Sync {
    fn apply(&self, config: &mut dyn Configuration) -> Result<()>;
}

/// The part of a mapping plan that conventions see.
pub trait Configuration {
    fn source(&self) -> &'static Schema;

    fn target(&self) -> &'static Schema;

    fn policy(&self) -> Policy;

    fn is_bound(&self, member: &str) -> bool;

    /// Binds the target member `target` to a read of source member
    /// `source`, passed through `transform` if given.
    fn bind_source_member(&mut self, target: &str, source: usize, transform: Option<Transform>);
}

/// The conventions a mapper applies for `flags`.
pub fn for_mapper(flags: MapperFlags) -> Vec<Box<dyn Convention>> {
    if !flags.contains(MapperFlags::DEFAULT_CONVENTIONS) {
        return vec![];
    }

    defaults()
}

/// The conventions an adapter applies for `flags`.
///
/// Recursive adaptation needs a locator to resolve nested adapters through,
/// and is left out without one.
pub fn for_adapter(flags: AdapterFlags, locator: Option<&Locator>) -> Vec<Box<dyn Convention>> {
    let mut conventions = vec![];

    if flags.contains(AdapterFlags::DEFAULT_CONVENTIONS) {
        conventions.extend(defaults());
    }

    if let (true, Some(locator)) = (flags.contains(AdapterFlags::RECURSIVE), locator) {
        conventions.push(Box::new(RecursiveAdapt::new(locator.clone())));
    }

    conventions
}

fn defaults() -> Vec<Box<dyn Convention>> {
    vec![
        Box::new(NameAndTypeMatch),
        Box::new(Convertible::new(Conversions::builtin())),
        Box::new(EnumMatch),
    ]
}

/// Runs each convention against `config`, in order.
pub(crate) fn apply_all(
    conventions: &[Box<dyn Convention>],
    config: &mut dyn Configuration,
) -> Result<()> {
    for convention in conventions {
        convention.apply(config)?;
    }

    Ok(())
}

/// Unbound eligible target members paired with their matching source
/// member.
fn candidates(config: &dyn Configuration) -> Vec<Candidate> {
    let source = config.source();

    config
        .target()
        .eligible_members(config.policy())
        .filter(|(_, member)| !config.is_bound(member.name))
        .filter_map(|(_, target)| {
            source
                .find_matching(target.name)
                .map(|(index, source)| Candidate {
                    target,
                    source_index: index,
                    source,
                })
        })
        .collect()
}

struct Candidate {
    target: &'static MemberDescriptor,
    source_index: usize,
    source: &'static MemberDescriptor,
}
