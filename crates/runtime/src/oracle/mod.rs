//! In-memory adapters for the squad ports.
//!
//! Engines supply their own perception and navigation; the sandbox serves the
//! headless client and scenario tests.
mod sandbox;

pub use sandbox::{Arena, SandboxWorld};
