//! Text procedures: in-memory rewrites of site source files.
//!
//! Each submodule pairs a pure `&str → String` transformation, tested
//! directly, with a file-level entry point that resolves paths against the
//! site root, validates, and writes atomically.
//!
//! 1. [`locale`]: splice a duplicated section out of a locale JSON backup
//! 2. [`markup`]: ordered regex deletions/replacement on a page file
//! 3. [`reorder`]: move a line range to a new position

pub mod locale;
pub mod markup;
pub mod reorder;
