//! # block-access: time-of-day access windows
//!
//! Admits an authenticated principal only while the server's wall-clock time
//! lies inside a configured window, unless the principal is excluded from that
//! window's restriction.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Settings snapshot                           │
//! │  block_access.intervals                      │
//! │  block_access.exclude_roles                  │
//! └─────────────────┬───────────────────────────┘
//!                   │  parse_configuration
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  RuleSet                                     │
//! │  ├─ days, start, end per interval            │
//! │  └─ excluded principals per interval         │
//! └─────────────────┬───────────────────────────┘
//!                   │  decide(now, principal)
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Decision                                    │
//! │  - Effect (Allow/Deny)                       │
//! │  - Deciding interval                         │
//! │  - Reason (server log only)                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! - No intervals configured: everyone is admitted.
//! - The first interval listing today's week day is the only one consulted.
//! - Inside its `[start, end]` window (inclusive): admitted.
//! - Outside it: admitted only if named in that interval's exclusion group.
//! - A week day no interval lists: nobody is admitted.
//! - A malformed configuration rejects the connection attempt.
//!
//! ## Examples
//!
//! ```
//! use block_access::{LocalTime, WeekDay, Effect, evaluate};
//!
//! let intervals = "mon,tue,wed,thu,fri - 08:00-18:00 ; sat - 08:00-12:00";
//! let exclude_roles = "postgres, euler ; postgres, bob, alice";
//!
//! let tuesday_evening = LocalTime::new(WeekDay::Tue, 20, 0);
//! let decision = evaluate(Some(intervals), Some(exclude_roles), tuesday_evening, "euler")?;
//! assert_eq!(decision.effect, Effect::Allow);
//!
//! let saturday_afternoon = LocalTime::new(WeekDay::Sat, 15, 0);
//! let decision = evaluate(Some(intervals), Some(exclude_roles), saturday_afternoon, "euler")?;
//! assert_eq!(decision.effect, Effect::Deny);
//! # Ok::<(), block_access::ConfigError>(())
//! ```

pub mod clock;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod parser;
pub mod rule;
pub mod settings;
pub mod text;

// Kani proofs for bounded model checking
#[cfg(any(test, kani))]
mod kani_proofs;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ConfigError;
pub use evaluator::{Decision, Effect, LocalTime, decide, evaluate};
pub use gate::{
    AuthStatus, BlockAccessGate, ClientAuthHook, ConnectionInfo, GateError, HookRegistry,
};
pub use parser::parse_configuration;
pub use rule::{Rule, RuleSet, TimeOfDay, WeekDay};
pub use settings::{AccessSettings, SettingsSource, StaticSettings};
