//! Provides stable problem codes for diagnostics.
//!
//! The codes and messages are defined in `resources/problem-codes.csv`
//! and turned into the `Problem` enumeration by the build script.

include!(concat!(env!("OUT_DIR"), "/problems.rs"));
