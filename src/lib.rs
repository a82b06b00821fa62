//! Library entry for libmgr exposing the library-manager core for the binary and integration tests.

pub mod index;
pub mod install;
pub mod logic;
pub mod state;
pub mod util;
