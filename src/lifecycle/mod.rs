//! Session wiring and observability setup.

mod session;
mod tracing;

pub use session::PokedexSession;
pub use self::tracing::setup_tracing;
