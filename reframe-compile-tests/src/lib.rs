//! Compile-time checks for the `reframe` attribute macros; see `tests/compile.rs`.
