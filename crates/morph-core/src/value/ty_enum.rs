use super::Member;

/// Variant inventory of a reflected field-less enum.
///
/// Enum schemas are declared as `static` items and compared by address, so
/// two enums with identical variant names are still distinct types.
#[derive(Debug)]
pub struct EnumSchema {
    /// Name of the enum type
    pub name: &'static str,

    /// Variant names in declaration order
    pub variants: &'static [&'static str],
}

impl EnumSchema {
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> EnumSchema {
        EnumSchema { name, variants }
    }

    /// Returns the index of the variant with the given name.
    pub fn variant_by_name(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| *variant == name)
    }
}

impl PartialEq for EnumSchema {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for EnumSchema {}

/// A field-less enum usable as a mapped member.
///
/// Implemented by `#[derive(Enum)]`.
pub trait Enumeration: Member + Copy {
    fn schema() -> &'static EnumSchema;

    /// Declaration index of this variant.
    fn variant(&self) -> usize;

    fn from_variant(variant: usize) -> Option<Self>;
}
