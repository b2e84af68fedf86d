//! Write authorization.
//!
//! Reads are public; `add` and `dup` require the shared passphrase.

mod passphrase;

pub use passphrase::{authorize_write, Unauthorized};
