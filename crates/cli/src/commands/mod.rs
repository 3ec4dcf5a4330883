#[cfg(feature = "postgres")]
pub(crate) mod migrate;
pub(crate) mod query;
pub(crate) mod serve;
