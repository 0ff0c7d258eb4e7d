use serde::{Deserialize, Serialize};

use crate::systems::collision::SolverParams;

/// Simulation tunables, loadable from a camelCase JSON document.
///
/// Every field is optional in JSON; missing ones keep their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// 1 = elastic, 0 = fully inelastic
    pub restitution: f64,
    /// Length of one physics sub-step in milliseconds
    pub fixed_timestep_ms: f64,
    pub max_iterations: u32,
    pub impulse_tolerance: f64,
    /// Upper bound on the time fed into one `advance` call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frame_ms: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            restitution: 1.0,
            fixed_timestep_ms: 10.0,
            max_iterations: 50,
            impulse_tolerance: 0.001,
            max_frame_ms: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(format!("restitution must be within [0, 1], got {}", self.restitution));
        }
        if !self.fixed_timestep_ms.is_finite() || self.fixed_timestep_ms <= 0.0 {
            return Err(format!(
                "fixedTimestepMs must be positive, got {}",
                self.fixed_timestep_ms
            ));
        }
        if self.max_iterations == 0 {
            return Err("maxIterations must be at least 1".to_string());
        }
        if !(self.impulse_tolerance >= 0.0) {
            return Err(format!(
                "impulseTolerance must not be negative, got {}",
                self.impulse_tolerance
            ));
        }
        if let Some(max) = self.max_frame_ms {
            if !(max > 0.0) {
                return Err(format!("maxFrameMs must be positive, got {}", max));
            }
        }
        Ok(())
    }

    /// Sub-step length in seconds.
    pub fn fixed_timestep(&self) -> f64 {
        self.fixed_timestep_ms / 1000.0
    }

    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            max_iterations: self.max_iterations,
            impulse_tolerance: self.impulse_tolerance,
        }
    }
}
