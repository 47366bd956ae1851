//! Infrastructure layer for keyterm.
//!
//! Contains the adapters around the translator: configuration storage, the
//! key-script loader, console collaborators for the replay tool and the
//! recording collaborators used by tests.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keyterm_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod console;
pub mod mock;
pub mod script;
pub mod storage;
