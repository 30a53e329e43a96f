// src/utils/simulation_params.rs
use log::warn;
use crate::utils::{
    DEFAULT_SIMULATION_PARAMS,
    errors::SimulationError
};

/// World-level settings every simulation is built from.
///
/// `board_size` is in world units (the recipe's `window` command), `friction` is the fraction
/// of velocity removed per generation, `grid_resolution` is the number of spatial cells per
/// axis and `workers` is the size of the update thread pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub board_size: (i32, i32),
    pub friction: f32,
    pub grid_resolution: usize,
    pub workers: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        DEFAULT_SIMULATION_PARAMS
    }
}

impl SimulationParams {
    /// Creates a new set of parameters, falling back to the defaults for any `None`.
    ///
    /// # Example
    /// ```
    /// use particle_life::utils::SimulationParams;
    ///
    /// let params = SimulationParams::new(Some((200, 200)), None, Some(10), Some(2));
    /// assert_eq!(params.board_size, (200, 200));
    /// assert_eq!(params.friction, 0.0);
    /// assert_eq!(params.grid_resolution, 10);
    /// ```
    pub fn new(
        board_size: Option<(i32, i32)>,
        friction: Option<f32>,
        grid_resolution: Option<usize>,
        workers: Option<usize>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_PARAMS;
        Self {
            board_size: board_size.unwrap_or(default.board_size),
            friction: friction.unwrap_or(default.friction),
            grid_resolution: grid_resolution.unwrap_or(default.grid_resolution),
            workers: workers.unwrap_or(default.workers),
        }
    }

    /// World bounds as floats, the form the grid and the integrator work with.
    pub fn bounds(&self) -> (f32, f32) {
        (self.board_size.0 as f32, self.board_size.1 as f32)
    }

    /// Checks the parameters for values the engine cannot run with.
    ///
    /// A worker count of zero is not an error here; the scheduler clamps it to one.
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidParameter` for a non-positive board dimension, a zero
    /// grid resolution or a non-finite friction.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.board_size.0 <= 0 || self.board_size.1 <= 0 {
            return Err(SimulationError::InvalidParameter(format!(
                "board size must be positive, got {}x{}",
                self.board_size.0, self.board_size.1
            )));
        }
        if self.grid_resolution == 0 {
            return Err(SimulationError::InvalidParameter(
                "grid resolution must be at least 1".to_string(),
            ));
        }
        // The offset table holds one entry per cell; more cells than board units is never useful.
        let board_area = self.board_size.0 as u64 * self.board_size.1 as u64;
        let cells = (self.grid_resolution as u64).checked_mul(self.grid_resolution as u64);
        if !matches!(cells, Some(cells) if cells <= board_area) {
            return Err(SimulationError::InvalidParameter(format!(
                "grid resolution {} gives more cells than the {}x{} board has units",
                self.grid_resolution, self.board_size.0, self.board_size.1
            )));
        }
        if !self.friction.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "friction must be finite, got {}",
                self.friction
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            warn!("Friction {} is outside [0, 1]; particles will gain energy or reverse each generation", self.friction);
        }
        Ok(())
    }
}
