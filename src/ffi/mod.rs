//! FFI module - Safe wrappers around Win32 handles
//!
//! RAII wrappers for Windows handles ensure cleanup via CloseHandle when
//! handles go out of scope.

mod handles;

pub use handles::{ProcessHandle, SnapshotHandle};
