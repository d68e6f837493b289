//! Credential handling.
//!
//! The password given on the command line or prompt is held in a
//! [`Credentials`] value that clears its memory on drop and redacts itself in
//! debug output. It is only unwrapped when building driver connect options.

mod credentials;

pub use credentials::Credentials;
