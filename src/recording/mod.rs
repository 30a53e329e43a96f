mod recorder;
mod replayer;

pub use recorder::*;
pub use replayer::*;
