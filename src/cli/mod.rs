//! # CLI Module
//!
//! Command-line entry points. Each command loads its configuration, hands it
//! to the library and presents the result; no collection logic lives here.
//!
//! ## Commands
//!
//! - [`collect`] - Runs the collection pipeline and prints a per-track summary
//!
//! ## Usage Patterns
//!
//! ```bash
//! lyricollect collect                                  # configured artist and album
//! lyricollect collect --artist "Mac Miller" --album Circles
//! lyricollect collect --concurrency 4 --output data/circles.jsonl
//! ```

mod collect;

pub use collect::CollectOverrides;
pub use collect::collect;
