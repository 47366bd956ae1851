//! Application layer: turning key events into terminal output.
//!
//! # What lives here? (for beginners)
//!
//! This layer holds the translation rules and nothing else.  It talks to the
//! outside world only through the traits in [`translate_key`] (`Transport`,
//! `TerminalBuffer`, `TerminalHost`, `Clipboard`), so it can be driven by a
//! real session, by the console replay tool or by test doubles alike.
//!
//! # Sub-modules
//!
//! - **`context`**       – Shared translation state (modifier bits, dead key,
//!   selection, preferences) and the `Outcome`/`Effect` values strategies
//!   return.
//!
//! - **`keyboard`**      – The two keyboard strategies, Standard and
//!   Alternate, behind one closed enum.
//!
//! - **`translate_key`** – The orchestrator.  It picks the strategy, runs it
//!   and applies the result to the collaborators, including the
//!   write-failure and not-yet-connected paths.

pub mod context;
pub mod keyboard;
pub mod translate_key;
