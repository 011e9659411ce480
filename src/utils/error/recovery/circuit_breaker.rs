//! Per-provider circuit breaker

use super::types::{CircuitBreakerConfig, CircuitSnapshot, CircuitState, ProviderCircuit};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Circuit breakers for every provider, created lazily on first reference
///
/// Each entry is guarded by its own mutex, so transitions for one provider are
/// linearizable without serializing unrelated providers. No lock is held beyond a
/// single method call.
#[derive(Debug)]
pub struct CircuitBreakerRegistry {
    config: CircuitBreakerConfig,
    circuits: DashMap<String, Mutex<ProviderCircuit>>,
}

impl Default for CircuitBreakerRegistry {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreakerRegistry {
    /// Create a registry sharing one configuration across providers
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            circuits: DashMap::new(),
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Check whether a call to `provider` may proceed
    ///
    /// An open circuit whose reset timeout has elapsed moves to half-open and admits
    /// exactly one trial; further checks are denied until that trial is recorded.
    pub fn can_execute(&self, provider: &str) -> bool {
        self.can_execute_at(provider, Utc::now())
    }

    /// Claim admission for one call, settled through the returned permit
    ///
    /// A permit dropped before its outcome is recorded counts as a failure, so a
    /// half-open trial abandoned by its caller never holds the trial slot.
    pub fn try_acquire(&self, provider: &str) -> Option<CircuitPermit<'_>> {
        self.can_execute(provider).then(|| CircuitPermit {
            registry: self,
            provider: provider.to_string(),
            settled: false,
        })
    }

    /// Record a successful call
    pub fn record_success(&self, provider: &str) {
        self.with_circuit(provider, |circuit| match circuit.state {
            CircuitState::Closed => {
                circuit.failure_count = circuit.failure_count.saturating_sub(1);
            }
            CircuitState::HalfOpen => {
                debug!(provider, "Circuit breaker transitioning from HalfOpen to Closed");
                *circuit = ProviderCircuit::default();
            }
            CircuitState::Open => {
                // Late result from a call admitted before the circuit opened
                circuit.failure_count = circuit.failure_count.saturating_sub(1);
            }
        });
    }

    /// Record a failed call
    pub fn record_failure(&self, provider: &str) {
        self.record_failure_at(provider, Utc::now());
    }

    /// Current state, `Closed` for providers never seen
    pub fn state(&self, provider: &str) -> CircuitState {
        self.circuits
            .get(provider)
            .map(|entry| entry.lock().state)
            .unwrap_or(CircuitState::Closed)
    }

    /// Snapshot of one provider's circuit
    pub fn snapshot(&self, provider: &str) -> CircuitSnapshot {
        match self.circuits.get(provider) {
            Some(entry) => to_snapshot(provider, &entry.lock()),
            None => to_snapshot(provider, &ProviderCircuit::default()),
        }
    }

    /// Snapshots of every provider referenced so far, sorted by provider id
    pub fn snapshot_all(&self) -> Vec<CircuitSnapshot> {
        let mut snapshots: Vec<CircuitSnapshot> = self
            .circuits
            .iter()
            .map(|entry| to_snapshot(entry.key(), &entry.value().lock()))
            .collect();
        snapshots.sort_by(|a, b| a.provider.cmp(&b.provider));
        snapshots
    }

    /// Force a provider back to closed
    pub fn reset(&self, provider: &str) {
        if let Some(entry) = self.circuits.get(provider) {
            *entry.lock() = ProviderCircuit::default();
            debug!(provider, "Circuit breaker reset");
        }
    }

    pub(crate) fn can_execute_at(&self, provider: &str, now: DateTime<Utc>) -> bool {
        self.with_circuit(provider, |circuit| match circuit.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if circuit.open_until.is_none_or(|until| now >= until) {
                    debug!(provider, "Circuit breaker transitioning from Open to HalfOpen");
                    circuit.state = CircuitState::HalfOpen;
                    circuit.trial_in_flight = true;
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if circuit.trial_in_flight {
                    false
                } else {
                    circuit.trial_in_flight = true;
                    true
                }
            }
        })
    }

    pub(crate) fn record_failure_at(&self, provider: &str, now: DateTime<Utc>) {
        let threshold = self.config.failure_threshold;
        let open_until = now
            .checked_add_signed(self.reset_timeout())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.with_circuit(provider, |circuit| {
            circuit.failure_count = circuit.failure_count.saturating_add(1);
            circuit.last_failure_at = Some(now);

            match circuit.state {
                CircuitState::Closed => {
                    if circuit.failure_count >= threshold {
                        warn!(
                            provider,
                            failures = circuit.failure_count,
                            "Circuit breaker opened"
                        );
                        circuit.state = CircuitState::Open;
                        circuit.open_until = Some(open_until);
                    }
                }
                CircuitState::HalfOpen => {
                    warn!(provider, "Half-open trial failed, circuit re-opened");
                    circuit.state = CircuitState::Open;
                    circuit.open_until = Some(open_until);
                    circuit.trial_in_flight = false;
                }
                CircuitState::Open => {}
            }
        });
    }

    fn reset_timeout(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.config.reset_timeout)
            .unwrap_or_else(|_| chrono::Duration::MAX)
    }

    fn with_circuit<R>(&self, provider: &str, f: impl FnOnce(&mut ProviderCircuit) -> R) -> R {
        if let Some(entry) = self.circuits.get(provider) {
            return f(&mut entry.lock());
        }
        let entry = self.circuits.entry(provider.to_string()).or_default();
        let mut circuit = entry.lock();
        f(&mut circuit)
    }
}

/// Admission for one provider call
#[must_use = "dropping a permit without an outcome records a failure"]
#[derive(Debug)]
pub struct CircuitPermit<'a> {
    registry: &'a CircuitBreakerRegistry,
    provider: String,
    settled: bool,
}

impl CircuitPermit<'_> {
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn record_success(mut self) {
        self.settled = true;
        self.registry.record_success(&self.provider);
    }

    pub fn record_failure(mut self) {
        self.settled = true;
        self.registry.record_failure(&self.provider);
    }
}

impl Drop for CircuitPermit<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(provider = %self.provider, "call abandoned before completion");
            self.registry.record_failure(&self.provider);
        }
    }
}

fn to_snapshot(provider: &str, circuit: &ProviderCircuit) -> CircuitSnapshot {
    CircuitSnapshot {
        provider: provider.to_string(),
        state: circuit.state,
        failure_count: circuit.failure_count,
        last_failure_at: circuit.last_failure_at,
        open_until: circuit.open_until,
        trial_in_flight: circuit.trial_in_flight,
    }
}
