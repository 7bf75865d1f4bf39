mod adapter;
pub(crate) use adapter::CompiledAdapter;

mod mapper;
pub(crate) use mapper::CompiledMap;
