use morph_core::value::{EnumSchema, ValueEnum};
use morph_core::{Error, Result, Type, Value};

use std::sync::Arc;

/// Builds the error raised when a source variant is mapped.
pub type RaiseFn = Arc<dyn Fn() -> Error + Send + Sync>;

/// What a single source variant maps to.
#[derive(Clone)]
pub(crate) enum Mapping {
    /// Variant index in the target enum
    To(usize),

    /// The target is nullable and the variant maps to `None`
    Null,

    Raise(RaiseFn),
}

/// Which side of the mapping must be fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Coverage {
    /// Every target variant is produced by some source variant
    Target,

    /// Every source variant has a mapping
    Source,
}

/// Maps values of one enum type to another, both known only at runtime.
///
/// Either side may be the nullable form of its enum, as long as both are.
/// A `Null` source always maps to `Null`.
#[derive(Clone)]
pub struct DynEnumMapper {
    source: Type,
    target: Type,
    source_enum: &'static EnumSchema,
    target_enum: &'static EnumSchema,
    table: Vec<Option<Mapping>>,
    coverage: Coverage,
}

impl DynEnumMapper {
    /// Maps each source variant to the target variant of the same name.
    pub fn new(source: &Type, target: &Type) -> Result<DynEnumMapper> {
        let mut mapper = DynEnumMapper::unmapped(source, target)?;

        mapper.table = mapper
            .source_enum
            .variants
            .iter()
            .map(|name| mapper.target_enum.variant_by_name(name).map(Mapping::To))
            .collect();
        mapper.coverage = Coverage::Target;

        Ok(mapper)
    }

    /// A mapper with no mappings, to be filled in by configuration.
    pub(crate) fn unmapped(source: &Type, target: &Type) -> Result<DynEnumMapper> {
        let source_enum = enum_schema(source)?;
        let target_enum = enum_schema(target)?;

        match (source.is_option(), target.is_option()) {
            (true, false) => {
                return Err(Error::invalid_type_argument(
                    target.to_string(),
                    "type must be nullable because the source is nullable",
                ))
            }
            (false, true) => {
                return Err(Error::invalid_type_argument(
                    target.to_string(),
                    "type must be non-nullable because the source is non-nullable",
                ))
            }
            _ => {}
        }

        Ok(DynEnumMapper {
            source: source.clone(),
            target: target.clone(),
            source_enum,
            target_enum,
            table: vec![None; source_enum.variants.len()],
            coverage: Coverage::Source,
        })
    }

    pub fn source(&self) -> &Type {
        &self.source
    }

    pub fn target(&self) -> &Type {
        &self.target
    }

    pub fn is_nullable(&self) -> bool {
        self.source.is_option()
    }

    pub(crate) fn source_enum(&self) -> &'static EnumSchema {
        self.source_enum
    }

    pub(crate) fn set(&mut self, variant: usize, mapping: Mapping) {
        if let Some(slot) = self.table.get_mut(variant) {
            *slot = Some(mapping);
        }
    }

    /// Checks that every variant on the covered side is mapped.
    pub fn validate(&self) -> Result<()> {
        let unmapped: Vec<&str> = match self.coverage {
            Coverage::Target => self
                .target_enum
                .variants
                .iter()
                .enumerate()
                .filter(|(index, _)| {
                    !self
                        .table
                        .iter()
                        .any(|mapping| matches!(mapping, Some(Mapping::To(to)) if to == index))
                })
                .map(|(_, name)| *name)
                .collect(),
            Coverage::Source => self
                .source_enum
                .variants
                .iter()
                .zip(&self.table)
                .filter(|(_, mapping)| mapping.is_none())
                .map(|(name, _)| *name)
                .collect(),
        };

        if unmapped.is_empty() {
            return Ok(());
        }

        let diagnostic = match self.coverage {
            Coverage::Target => format!(
                "type '{}' contains unmapped members: {}.",
                self.target_enum.name,
                unmapped.join(", ")
            ),
            Coverage::Source => format!(
                "source type '{}' contains unmapped members: {}.",
                self.source_enum.name,
                unmapped.join(", ")
            ),
        };

        Err(Error::invalid_configuration([diagnostic]))
    }

    pub fn map_value(&self, value: Value) -> Result<Value> {
        let variant = match value {
            Value::Null if self.is_nullable() => return Ok(Value::Null),
            Value::Enum(variant) if variant.schema() == self.source_enum => variant,
            value => return Err(Error::type_conversion(value, &self.source)),
        };

        match self.table.get(variant.variant()) {
            Some(Some(Mapping::To(to))) => Ok(Value::Enum(ValueEnum::new(self.target_enum, *to))),
            Some(Some(Mapping::Null)) => Ok(Value::Null),
            Some(Some(Mapping::Raise(raise))) => Err(raise()),
            _ => Err(Error::unmapped_value(variant.name(), self.source_enum.name)),
        }
    }

    pub(crate) fn with_coverage(mut self, coverage: Coverage) -> DynEnumMapper {
        self.coverage = coverage;
        self
    }
}

fn enum_schema(ty: &Type) -> Result<&'static EnumSchema> {
    match ty.unwrap_option().as_enum() {
        Some(schema) => Ok(schema),
        None if ty.is_option() => Err(Error::invalid_type_argument(
            ty.to_string(),
            "underlying type must be an enum",
        )),
        None => Err(Error::invalid_type_argument(
            ty.to_string(),
            "type must be an enum",
        )),
    }
}

impl core::fmt::Debug for DynEnumMapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynEnumMapper")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("coverage", &self.coverage)
            .finish()
    }
}
