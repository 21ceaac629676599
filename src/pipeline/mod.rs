//! Pipeline stages for the PDF-bytes-to-Markdown adapter.
//!
//! Each submodule implements exactly one transformation step, so every step
//! is independently testable and the side-effecting parts stay fenced off
//! from the pure ones.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ spool ──▶ convert ──▶ scan ──▶ upload/open ──▶ rewrite
//!        (tempfile) (external)   (regex)  (I/O, parser)    (pure)
//! ```
//!
//! 1. [`spool`]   — persist the incoming bytes to a self-removing temp file
//! 2. *convert*   — the [`crate::converter::MarkdownConverter`] seam, driven
//!    from `spawn_blocking` by the parser
//! 3. [`rewrite`] — scan for local image references, then (after the parser
//!    has uploaded and opened them) rewrite the links as a pure text pass

pub mod rewrite;
pub mod spool;
