pub mod adapter;
pub use adapter::{Adapt, AdaptExt, Adapter, AdapterProfile, DynAdapt, DynAdapter};

mod compile;

pub mod convention;
pub use convention::Convention;

pub mod convert;
pub use convert::{Conversions, Converter};

pub mod enumeration;
pub use enumeration::{DefaultEnumMapper, DynEnumMapper, EnumConfig, EnumMapper, EnumProfile};

mod flags;
pub use flags::{AdapterFlags, MapperFlags};

mod lazy;

pub mod locator;
pub use locator::{LocateAdapter, Locator, WeakLocator};

pub mod mapper;
pub use mapper::{
    BidirectionalMapper, BidirectionalProfile, Defaults, Map, MapExt, Mapper, MapperProfile,
};

pub mod plan;
pub use plan::{AdapterConfig, MapperConfig, Plan};

pub use morph_core::{
    bail, err,
    schema::{self, MemberDescriptor, Schema},
    value::{self, Enumeration, Member, Object, Type, Value},
    Adapted, Error, Model, Result, View,
};

pub use morph_macros::{view, Enum, Model, Object};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Adapted, Error, Model, Result, View};
    pub use morph_core::{
        schema::{MemberDescriptor, Schema, Setter},
        value::{
            EnumSchema, Enumeration, Member, Object, ObjectDescriptor, Type, Value, ValueEnum,
        },
    };
    pub use std::{
        clone::Clone,
        option::Option,
        sync::{Arc, OnceLock},
        vec::Vec,
    };
}
