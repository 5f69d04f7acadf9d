//! Session accessor implementations

pub mod cached;
pub mod fixture;

pub use cached::CachedAccessor;
pub use fixture::FixtureAccessor;
