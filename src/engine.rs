//! Tokenization and rule-matching engine.
//!
//! Everything that turns address text into tokens, and decides whether one
//! address falls inside a delivery rule, lives under `src/engine/`. The public
//! types in `api.rs` are thin value wrappers that call into these modules.
//!
//! ## How the parts work together
//!
//! ```text
//! rule text ── normalize ── extract_qualifiers ──┬── qualifiers (ordered)
//!             (normalize.rs)  (extract.rs)        │
//!                                                 └── residual text ──┐
//!                                                                     │
//! address text ── normalize ─────────────────────────────────────────┤
//!                                                                     v
//!                                                      tokenize (tokenizer.rs)
//!                                                                     │
//!                                                                     v
//!                                                evaluate (matcher.rs)
//!                                                  - anchor on first rule unit
//!                                                  - compare fixed context
//!                                                  - check qualifiers
//!                                                                     │
//!                                                                     v
//!                                                                  Verdict
//! ```
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: whitespace stripping shared by every entry point.
//! - `tokenizer.rs`: splits normalized text into `Token`s with one regex.
//! - `extract.rs`: pulls qualifier phrases (以上, 至, 單, ...) out of rule text
//!   and leaves an address-shaped residual behind.
//! - `matcher.rs`: aligns a rule against an address and evaluates qualifiers,
//!   producing a `Verdict` that explains the outcome.
//!
//! The engine is total. Malformed text yields fewer tokens and therefore a
//! non-match; nothing here returns an error or panics on input.
//!
//! ## Debugging
//!
//! Matching emits `tracing` events (`trace` level per verdict). The `twzip`
//! binary shows them with `TWZIP_LOG=twzip=trace`.

#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/tokenizer.rs"]
mod tokenizer;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use extract::extract_qualifiers;
pub(crate) use matcher::evaluate;
pub use matcher::Verdict;
pub use normalize::normalize;
pub use tokenizer::tokenize;
