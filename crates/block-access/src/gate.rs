//! Authentication gate.
//!
//! The host verifies credentials first and then runs its installed
//! [`ClientAuthHook`]. [`BlockAccessGate`] calls the hook it replaced, then
//! rejects the connection if the current time falls outside every permitted
//! window for the authenticated identity.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::evaluator::{Decision, Effect, LocalTime, decide};
use crate::settings::{AccessSettings, SettingsSource};

// ============================================================================
// Hook surface
// ============================================================================

/// What the host knows about a connection after authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Verified user name.
    pub identity: String,
}

impl ConnectionInfo {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

/// Result of the host's own credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Ok,
    Failed,
}

/// Why a connection was rejected by a hook.
#[derive(Debug, Error)]
pub enum GateError {
    /// Outside every permitted window.
    #[error("access denied because it is outside permitted date and time")]
    AccessDenied,

    /// The settings could not be parsed. Access is denied until they are fixed.
    #[error("invalid block_access configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Raised by another hook in the chain.
    #[error("authentication hook failed: {0}")]
    Hook(String),
}

impl GateError {
    /// Text safe to send to the rejected client.
    ///
    /// Never mentions rules, windows or configuration problems.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::AccessDenied | Self::Configuration(_) => "access denied",
            Self::Hook(_) => "authentication failed",
        }
    }
}

/// Called by the host after its own credential check.
///
/// Returning an error aborts the connection attempt.
pub trait ClientAuthHook: Send + Sync {
    fn on_client_authenticated(
        &self,
        conn: &ConnectionInfo,
        status: AuthStatus,
    ) -> Result<(), GateError>;
}

impl<F> ClientAuthHook for F
where
    F: Fn(&ConnectionInfo, AuthStatus) -> Result<(), GateError> + Send + Sync,
{
    fn on_client_authenticated(
        &self,
        conn: &ConnectionInfo,
        status: AuthStatus,
    ) -> Result<(), GateError> {
        self(conn, status)
    }
}

/// The host's hook slot.
///
/// Installing a hook hands it whatever was installed before, so extensions
/// compose in installation order instead of overwriting each other.
#[derive(Default)]
pub struct HookRegistry {
    current: Option<Arc<dyn ClientAuthHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the installed hook with `make(previous)`.
    pub fn install<F, H>(&mut self, make: F)
    where
        F: FnOnce(Option<Arc<dyn ClientAuthHook>>) -> H,
        H: ClientAuthHook + 'static,
    {
        let previous = self.current.take();
        self.current = Some(Arc::new(make(previous)));
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Runs the installed chain. An empty registry admits everything.
    pub fn run(&self, conn: &ConnectionInfo, status: AuthStatus) -> Result<(), GateError> {
        match &self.current {
            Some(hook) => hook.on_client_authenticated(conn, status),
            None => Ok(()),
        }
    }
}

// ============================================================================
// BlockAccessGate
// ============================================================================

/// Enforces access windows on authenticated connections.
pub struct BlockAccessGate {
    previous: Option<Arc<dyn ClientAuthHook>>,
    settings: Arc<dyn SettingsSource>,
    clock: Arc<dyn Clock>,
}

impl BlockAccessGate {
    /// Creates a gate reading `settings` and the system clock.
    pub fn new(settings: Arc<dyn SettingsSource>) -> Self {
        Self {
            previous: None,
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the hook to run before this one.
    pub fn with_previous(mut self, previous: Option<Arc<dyn ClientAuthHook>>) -> Self {
        self.previous = previous;
        self
    }

    /// Replaces the clock (tests and dry runs).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Installs a gate into `registry`, chained after the current hook.
    pub fn install(registry: &mut HookRegistry, settings: Arc<dyn SettingsSource>) {
        registry.install(|previous| Self::new(settings).with_previous(previous));
    }

    /// Evaluates `identity` at `now` against the current settings snapshot.
    ///
    /// The snapshot is parsed afresh on every call.
    pub fn check(&self, identity: &str, now: LocalTime) -> Result<Decision, GateError> {
        Self::check_snapshot(&self.settings.snapshot(), identity, now)
    }

    fn check_snapshot(
        settings: &AccessSettings,
        identity: &str,
        now: LocalTime,
    ) -> Result<Decision, GateError> {
        if let Some(intervals) = &settings.intervals {
            debug!(intervals = %intervals, "block_access.intervals");
        }
        if let Some(roles) = &settings.exclude_roles {
            debug!(exclude_roles = %roles, "block_access.exclude_roles");
        }

        let rules = settings.parse().inspect_err(|err| {
            error!(error = %err, "block_access configuration is invalid, denying access");
        })?;

        Ok(decide(&rules, now, identity))
    }
}

impl ClientAuthHook for BlockAccessGate {
    fn on_client_authenticated(
        &self,
        conn: &ConnectionInfo,
        status: AuthStatus,
    ) -> Result<(), GateError> {
        if let Some(previous) = &self.previous {
            previous.on_client_authenticated(conn, status)?;
        }

        if status == AuthStatus::Failed {
            return Ok(());
        }

        // No intervals configured: nothing to enforce.
        let settings = self.settings.snapshot();
        if !settings.is_enabled() {
            return Ok(());
        }

        let started = Instant::now();
        let decision = Self::check_snapshot(&settings, &conn.identity, self.clock.now())?;
        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            "access window check finished"
        );

        match decision.effect {
            Effect::Allow => {
                info!(principal = %conn.identity, reason = %decision.reason, "access allowed");
                Ok(())
            }
            Effect::Deny => {
                warn!(principal = %conn.identity, reason = %decision.reason, "access denied");
                Err(GateError::AccessDenied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rule::WeekDay;
    use crate::settings::StaticSettings;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn settings(intervals: &str, roles: &str) -> Arc<dyn SettingsSource> {
        Arc::new(StaticSettings::new(AccessSettings::new(intervals, roles)))
    }

    fn gate_at(intervals: &str, roles: &str, weekday: WeekDay, hour: u8) -> BlockAccessGate {
        BlockAccessGate::new(settings(intervals, roles))
            .with_clock(FixedClock(LocalTime::new(weekday, hour, 0)))
    }

    #[test]
    fn test_allows_inside_window() {
        let gate = gate_at("mon - 08:00-18:00", "", WeekDay::Mon, 9);
        assert!(
            gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
                .is_ok()
        );
    }

    #[test]
    fn test_denies_outside_window() {
        let gate = gate_at("mon - 08:00-18:00", "", WeekDay::Mon, 20);
        let err = gate
            .on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
            .unwrap_err();
        assert!(matches!(err, GateError::AccessDenied));
        assert_eq!(err.client_message(), "access denied");
    }

    #[test]
    fn test_disabled_allows_everything() {
        let gate = BlockAccessGate::new(Arc::new(StaticSettings::default()))
            .with_clock(FixedClock(LocalTime::new(WeekDay::Sun, 3, 0)));
        assert!(
            gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
                .is_ok()
        );
    }

    /// Counts how often the gate asks for the time.
    struct CountingClock {
        reads: Arc<AtomicUsize>,
        now: LocalTime,
    }

    impl Clock for CountingClock {
        fn now(&self) -> LocalTime {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.now
        }
    }

    fn counting_gate(settings: AccessSettings) -> (BlockAccessGate, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let gate = BlockAccessGate::new(Arc::new(StaticSettings::new(settings))).with_clock(
            CountingClock {
                reads: Arc::clone(&reads),
                now: LocalTime::new(WeekDay::Sun, 3, 0),
            },
        );
        (gate, reads)
    }

    #[test]
    fn test_disabled_skips_evaluation() {
        for settings in [
            AccessSettings::default(),
            AccessSettings::new(" \t ", "postgres ; bob"),
        ] {
            let (gate, reads) = counting_gate(settings);
            assert!(
                gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
                    .is_ok()
            );
            assert_eq!(reads.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn test_enabled_reads_clock_once() {
        let (gate, reads) = counting_gate(AccessSettings::new("sun - 00:00-23:59", ""));
        assert!(
            gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
                .is_ok()
        );
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_status_skips_evaluation() {
        // Broken configuration would error if it were parsed.
        let gate = gate_at("mon - 08:00-18:00 ; sat - 08:00-12:00", "x", WeekDay::Mon, 9);
        assert!(
            gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Failed)
                .is_ok()
        );
    }

    #[test]
    fn test_configuration_error_fails_closed() {
        let gate = gate_at("mon - 08:00-18:00 ; sat - 08:00-12:00", "x", WeekDay::Mon, 9);
        let err = gate
            .on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::Configuration(ConfigError::GroupCountMismatch { .. })
        ));
        assert_eq!(err.client_message(), "access denied");
        assert!(!err.client_message().contains("interval"));
    }

    #[test]
    fn test_previous_hook_runs_first() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let previous: Arc<dyn ClientAuthHook> =
            Arc::new(move |conn: &ConnectionInfo, status: AuthStatus| -> Result<(), GateError> {
                seen.lock().unwrap().push((conn.identity.clone(), status));
                Ok(())
            });

        let gate = gate_at("mon - 08:00-18:00", "", WeekDay::Mon, 20).with_previous(Some(previous));
        let result = gate.on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Failed);

        assert!(result.is_ok());
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            &[("bob".to_string(), AuthStatus::Failed)]
        );
    }

    #[test]
    fn test_previous_hook_error_propagates() {
        let previous: Arc<dyn ClientAuthHook> =
            Arc::new(|_: &ConnectionInfo, _: AuthStatus| -> Result<(), GateError> {
                Err(GateError::Hook("nope".to_string()))
            });
        let gate = gate_at("mon - 00:00-23:59", "", WeekDay::Mon, 9).with_previous(Some(previous));

        let err = gate
            .on_client_authenticated(&ConnectionInfo::new("bob"), AuthStatus::Ok)
            .unwrap_err();
        assert!(matches!(err, GateError::Hook(ref msg) if msg == "nope"));
    }

    #[test]
    fn test_registry_chains_in_install_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&counter);

        let mut registry = HookRegistry::new();
        assert!(registry.is_empty());
        registry.install(move |_previous| {
            move |_: &ConnectionInfo, _: AuthStatus| -> Result<(), GateError> {
                first.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        BlockAccessGate::install(&mut registry, settings("sat - 08:00-12:00", "postgres"));

        // The gate reads the system clock here, so its verdict varies. Only
        // check that the earlier hook ran exactly once.
        let _ = registry.run(&ConnectionInfo::new("postgres"), AuthStatus::Ok);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_registry_admits() {
        let registry = HookRegistry::new();
        assert!(
            registry
                .run(&ConnectionInfo::new("bob"), AuthStatus::Ok)
                .is_ok()
        );
    }

    #[test]
    fn test_check_returns_decision() {
        let gate = gate_at(
            "mon,tue,wed,thu,fri - 08:00-18:00 ; sat - 08:00-12:00",
            "postgres, euler ; postgres, bob, alice",
            WeekDay::Sat,
            15,
        );
        let decision = gate
            .check("bob", LocalTime::new(WeekDay::Sat, 15, 0))
            .unwrap();
        assert_eq!(decision.effect, Effect::Allow);
        assert_eq!(decision.matched_rule, Some(1));
    }
}
