use std::error::Error;
use std::fmt;
use std::io;

/// Represents errors that can occur while configuring, loading or running a simulation.
///
/// The update pass itself never produces errors: degenerate rules and numeric corruption
/// are clamped or zeroed in place. These variants cover everything around it.
#[derive(Debug)]
pub enum SimulationError {
    /// Indicates a simulation parameter that cannot be used (e.g. a zero grid resolution).
    InvalidParameter(String),
    /// Indicates a color name or RGB triple outside the known palette.
    UnknownColor(String),
    /// A recipe could not be loaded; holds one message per offending line.
    InvalidRecipe(Vec<String>),
    /// An engine config file could not be loaded; holds one message per offending line.
    InvalidConfig(Vec<String>),
    /// A frame recording is truncated or otherwise unreadable.
    MalformedRecording(String),
    /// A worker thread hung up before finishing its share of a generation.
    WorkerDisconnected(usize),
    /// An underlying I/O failure.
    Io(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimulationError::UnknownColor(name) => write!(f, "\"{}\" is not a valid color", name),
            SimulationError::InvalidRecipe(errors) => {
                write!(f, "Invalid recipe:")?;
                for error in errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
            SimulationError::InvalidConfig(errors) => {
                write!(f, "Invalid config:")?;
                for error in errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
            SimulationError::MalformedRecording(msg) => write!(f, "Malformed recording: {}", msg),
            SimulationError::WorkerDisconnected(worker) => {
                write!(f, "Worker {} disconnected before finishing its partition", worker)
            }
            SimulationError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulationError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(e: io::Error) -> Self {
        SimulationError::Io(e)
    }
}
