//! Property-based tests for the frontmatter reader.
