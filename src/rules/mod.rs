//! Rule catalogues.
//!
//! Catalogues are plain data built from the types in the crate root. Each one
//! is constructed on demand; callers that run many words build it once (see
//! `api.rs`) and share it between derivers.

pub mod french;
pub mod orthography;
