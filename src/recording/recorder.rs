//! Binary frame dumps.
//!
//! A recording starts with a 12-byte header, `width: i32`, `height: i32` and
//! `particle_count: i32`, followed by one frame per generation. A frame is `particle_count`
//! records of [`RECORD_SIZE`] bytes each:
//!
//! | bytes  | field                     |
//! |--------|---------------------------|
//! | 0..8   | position x, y (`f32`)     |
//! | 8..16  | velocity x, y (`f32`)     |
//! | 16..19 | color r, g, b (`u8`)      |
//! | 19     | padding, always zero      |
//!
//! Everything is little-endian.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::particles::Particle;
use crate::utils::SimulationError;

pub const HEADER_SIZE: usize = 12;
pub const RECORD_SIZE: usize = 20;

/// Serializes one particle into its 20-byte record.
pub fn encode_particle(particle: &Particle) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    record[0..4].copy_from_slice(&particle.position.0.to_le_bytes());
    record[4..8].copy_from_slice(&particle.position.1.to_le_bytes());
    record[8..12].copy_from_slice(&particle.velocity.0.to_le_bytes());
    record[12..16].copy_from_slice(&particle.velocity.1.to_le_bytes());
    record[16..19].copy_from_slice(&particle.color.rgb());
    record
}

/// Writes generations to a recording.
///
/// The particle count is fixed by the header, so every frame must hold exactly that many
/// particles.
///
/// # Examples
///
/// ```
/// use particle_life::particles::{Color, Particle};
/// use particle_life::recording::{FrameRecorder, HEADER_SIZE, RECORD_SIZE};
///
/// let particles = vec![Particle::at_rest((1.0, 2.0), Color::Red)];
/// let mut recorder = FrameRecorder::new(Vec::new(), (100, 100), particles.len()).unwrap();
/// recorder.record(&particles).unwrap();
/// recorder.record(&particles).unwrap();
///
/// assert_eq!(recorder.frames_written(), 2);
/// let bytes = recorder.into_inner().unwrap();
/// assert_eq!(bytes.len(), HEADER_SIZE + 2 * RECORD_SIZE);
/// ```
pub struct FrameRecorder<W: Write> {
    writer: W,
    particle_count: usize,
    frames_written: u64,
    buffer: Vec<u8>,
}

impl FrameRecorder<BufWriter<File>> {
    /// Creates (or truncates) a recording file.
    pub fn create<P: AsRef<Path>>(
        path: P,
        board_size: (i32, i32),
        particle_count: usize,
    ) -> Result<Self, SimulationError> {
        let file = File::create(path.as_ref())?;
        debug!("Recording frames to {}", path.as_ref().display());
        FrameRecorder::new(BufWriter::new(file), board_size, particle_count)
    }
}

impl<W: Write> FrameRecorder<W> {
    /// Writes the header to `writer`.
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidParameter` if `particle_count` does not fit the
    /// header's `i32`, or `SimulationError::Io` if the header cannot be written.
    pub fn new(mut writer: W, board_size: (i32, i32), particle_count: usize) -> Result<Self, SimulationError> {
        let count = i32::try_from(particle_count).map_err(|_| {
            SimulationError::InvalidParameter(format!(
                "{} particles do not fit a recording header",
                particle_count
            ))
        })?;

        let mut header = [0u8; HEADER_SIZE];
        header[0..4].copy_from_slice(&board_size.0.to_le_bytes());
        header[4..8].copy_from_slice(&board_size.1.to_le_bytes());
        header[8..12].copy_from_slice(&count.to_le_bytes());
        writer.write_all(&header)?;

        Ok(FrameRecorder {
            writer,
            particle_count,
            frames_written: 0,
            buffer: Vec::with_capacity(particle_count * RECORD_SIZE),
        })
    }

    /// Appends one frame.
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidParameter` if `particles` does not hold the count
    /// given in the header; nothing is written in that case.
    pub fn record(&mut self, particles: &[Particle]) -> Result<(), SimulationError> {
        if particles.len() != self.particle_count {
            return Err(SimulationError::InvalidParameter(format!(
                "frame has {} particles, recording expects {}",
                particles.len(),
                self.particle_count
            )));
        }

        self.buffer.clear();
        for particle in particles {
            self.buffer.extend_from_slice(&encode_particle(particle));
        }
        self.writer.write_all(&self.buffer)?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, SimulationError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
