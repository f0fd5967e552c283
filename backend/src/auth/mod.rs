//! Authentication module
//!
//! Provides the credential codec that turns a name and password into the
//! token stored at signup and presented as a bearer credential at login.

mod credentials;

pub use credentials::CredentialCodec;
