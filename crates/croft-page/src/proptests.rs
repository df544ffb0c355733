//! Property-based tests for the page state machines.
