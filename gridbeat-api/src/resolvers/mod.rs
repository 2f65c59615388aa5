//! Operation resolvers
//!
//! The query/mutation semantics, one module per entity. Mutations return a
//! structured response envelope (`code` is always 200; `success` is the
//! actual signal, with `messageTemplate` carrying the i18n key). Only
//! validation failures on sample creation and unexpected system errors
//! escape as `Err` to the transport layer.

pub mod instrument;
pub mod sample;
pub mod session;
