//! Navigator configuration.

use super::ResistanceModel;
use crate::error::{GridError, Result};
use crate::solver::{Pivoting, SolverConfig, PIVOT_EPSILON};
use crate::{DEFAULT_BLOCKED_RESISTANCE, DEFAULT_BLOCKED_THRESHOLD, DEFAULT_OPEN_RESISTANCE};

/// Configuration for a [`ResistorCircuit`](super::ResistorCircuit).
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Intensity below which a node is blocked, in `[0, 1]`.
    pub blocked_threshold: f64,
    /// Resistance between open nodes (ohms).
    pub open_resistance: f64,
    /// Resistance of any resistor touching a blocked node (ohms).
    pub blocked_resistance: f64,
    /// Replacement for exactly-zero LU pivots.
    pub pivot_epsilon: f64,
    /// LU row exchange strategy.
    pub pivoting: Pivoting,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            blocked_threshold: DEFAULT_BLOCKED_THRESHOLD,
            open_resistance: DEFAULT_OPEN_RESISTANCE,
            blocked_resistance: DEFAULT_BLOCKED_RESISTANCE,
            pivot_epsilon: PIVOT_EPSILON,
            pivoting: Pivoting::default(),
        }
    }
}

impl NavigatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blocked-node intensity threshold.
    pub fn with_blocked_threshold(mut self, threshold: f64) -> Self {
        self.blocked_threshold = threshold;
        self
    }

    /// Set the open resistance (ohms).
    pub fn with_open_resistance(mut self, resistance: f64) -> Self {
        self.open_resistance = resistance;
        self
    }

    /// Set the blocked resistance (ohms).
    ///
    /// The larger the ratio to the open resistance, the harder paths avoid
    /// dark regions, at the cost of a worse conditioned system.
    pub fn with_blocked_resistance(mut self, resistance: f64) -> Self {
        self.blocked_resistance = resistance;
        self
    }

    /// Set the zero-pivot replacement.
    pub fn with_pivot_epsilon(mut self, epsilon: f64) -> Self {
        self.pivot_epsilon = epsilon;
        self
    }

    /// Set the LU pivoting strategy.
    pub fn with_pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = pivoting;
        self
    }

    /// Check every value is inside its domain.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.blocked_threshold) {
            return Err(GridError::invalid_config(format!(
                "blocked threshold {} outside [0, 1]",
                self.blocked_threshold
            )));
        }
        for (name, value) in [
            ("open resistance", self.open_resistance),
            ("blocked resistance", self.blocked_resistance),
            ("pivot epsilon", self.pivot_epsilon),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::invalid_config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Resistance sampling part of this configuration.
    pub fn resistance_model(&self) -> ResistanceModel {
        ResistanceModel {
            threshold: self.blocked_threshold,
            open_resistance: self.open_resistance,
            blocked_resistance: self.blocked_resistance,
        }
    }

    /// Solver part of this configuration.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new()
            .with_pivot_epsilon(self.pivot_epsilon)
            .with_pivoting(self.pivoting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(NavigatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            NavigatorConfig::new().with_blocked_threshold(1.5),
            NavigatorConfig::new().with_blocked_threshold(f64::NAN),
            NavigatorConfig::new().with_open_resistance(0.0),
            NavigatorConfig::new().with_blocked_resistance(-3.0),
            NavigatorConfig::new().with_blocked_resistance(f64::INFINITY),
            NavigatorConfig::new().with_pivot_epsilon(0.0),
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GridError::InvalidConfig { .. })));
        }
    }

    #[test]
    fn test_splits_into_parts() {
        let config = NavigatorConfig::new()
            .with_blocked_threshold(0.2)
            .with_blocked_resistance(500.0)
            .with_pivoting(Pivoting::Disabled)
            .with_pivot_epsilon(1e-30);

        let model = config.resistance_model();
        assert_eq!(model.threshold, 0.2);
        assert_eq!(model.blocked_resistance, 500.0);

        let solver = config.solver_config();
        assert_eq!(solver.pivoting, Pivoting::Disabled);
        assert_eq!(solver.pivot_epsilon, 1e-30);
    }
}
