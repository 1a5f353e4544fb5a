//! endprobe-runner: authenticated session, fixture discovery and the probe pass

pub mod discovery;
pub mod prober;
pub mod session;

#[cfg(test)]
mod testing;

pub use discovery::discover;
pub use prober::{ProbeError, ProbeRun, ProbeRunner, authenticate};
pub use session::{ApiClient, ApiResponse, Session, SessionError};
