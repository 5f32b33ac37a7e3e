//! Concrete course backend adapters and registry assembly.
//!
//! One module per integration style (`AdapterKind`), plus the builder that
//! turns startup configuration into a populated `BackendRegistry`.

pub mod direct;
pub mod registry_builder;
pub mod remote;
