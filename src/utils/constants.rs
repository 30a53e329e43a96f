use crate::utils;

pub const DEFAULT_SIMULATION_PARAMS: utils::SimulationParams = utils::SimulationParams {
    board_size: (800, 600),
    friction: 0.0,
    grid_resolution: 16,
    workers: 8,
};

pub const DEFAULT_TARGET_FPS: u32 = 60;
