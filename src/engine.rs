//! Intent dispatch engine.
//!
//! Dispatching an utterance is a short, strictly ordered pipeline:
//!
//! ```text
//! rules (declaration order) ── RuleSet::new        (rule_set.rs)
//!                               - unique intents
//!                               - catch-all last
//!                                     │
//! raw text ── normalize ──────────────┼─ Dispatcher::run   (dispatcher.rs)
//!                                     │   - try each pattern in order
//!                                     │   - first match wins
//!                                     │   - run that handler
//!                                     v
//!                             Resolution { matched, tried, metrics }
//! ```
//!
//! There is no scoring and no backtracking: the position of a rule in the
//! table *is* its priority. `greeting` is tried before the catch-all
//! `kb_direct`, `exit` before `kb_what_is`, and so on.
//!
//! ## Responsibilities by module
//!
//! - `rule_set.rs`: validates the table and keeps it in evaluation order.
//! - `dispatcher.rs`: runs the first-match loop over normalized text.
//! - `metrics.rs`: timing and evaluation counts for a single dispatch.
//!
//! ## Adding an intent
//!
//! Write a rule under `src/rules/**` and add it to `rules::get()` at the
//! position that gives it the right priority. Anything placed after the
//! catch-all is rejected by `RuleSet::new`.

#[path = "engine/dispatcher.rs"]
mod dispatcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/rule_set.rs"]
mod rule_set;

pub(crate) use dispatcher::Dispatcher;
pub use metrics::DispatchMetrics;
pub use rule_set::RuleTraits;
pub(crate) use rule_set::RuleSet;
