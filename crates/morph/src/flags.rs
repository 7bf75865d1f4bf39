bitflags::bitflags! {
    /// Selects the conventions a mapper applies before custom configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapperFlags: u8 {
        /// Name and type match, convertible types, enum translation.
        const DEFAULT_CONVENTIONS = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Selects the conventions an adapter applies before custom
    /// configuration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AdapterFlags: u8 {
        /// Name and type match, convertible types, enum translation.
        const DEFAULT_CONVENTIONS = 1 << 0;
        /// Adapt nested model members to nested view members.
        const RECURSIVE = 1 << 1;
    }
}

impl Default for MapperFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl Default for AdapterFlags {
    fn default() -> Self {
        Self::all()
    }
}
