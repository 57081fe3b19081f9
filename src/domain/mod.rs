//! Domain logic module containing pure graph functions.
//!
//! This module provides pure, testable functions over the dependency
//! declarations of a configuration document.

pub mod dependency;
