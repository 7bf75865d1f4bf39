use super::EnumSchema;

/// A value of a reflected field-less enum: the schema plus a variant index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueEnum {
    schema: &'static EnumSchema,
    variant: usize,
}

impl ValueEnum {
    pub fn new(schema: &'static EnumSchema, variant: usize) -> ValueEnum {
        debug_assert!(variant < schema.variants.len());
        ValueEnum { schema, variant }
    }

    pub fn schema(&self) -> &'static EnumSchema {
        self.schema
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    /// Declared name of the variant.
    pub fn name(&self) -> &'static str {
        self.schema.variants[self.variant]
    }
}
