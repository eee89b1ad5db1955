//! Core engine: debounced search input and the pagination state machine.

pub mod controller;
pub mod debounce;
