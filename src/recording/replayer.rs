use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::particles::{Color, Particle};
use crate::recording::{HEADER_SIZE, RECORD_SIZE};
use crate::utils::SimulationError;

/// Parses one 20-byte record.
///
/// # Errors
/// Returns `SimulationError::UnknownColor` if the RGB bytes are not one of the palette
/// colors.
pub fn decode_particle(record: &[u8; RECORD_SIZE]) -> Result<Particle, SimulationError> {
    let float_at = |offset: usize| {
        f32::from_le_bytes([record[offset], record[offset + 1], record[offset + 2], record[offset + 3]])
    };
    let rgb = [record[16], record[17], record[18]];
    let color = Color::from_rgb(rgb)
        .ok_or_else(|| SimulationError::UnknownColor(format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])))?;

    Ok(Particle::new(
        (float_at(0), float_at(4)),
        (float_at(8), float_at(12)),
        color,
    ))
}

/// Reads a recording back one frame at a time.
///
/// # Examples
///
/// ```
/// use particle_life::particles::{Color, Particle};
/// use particle_life::recording::{FrameRecorder, FrameReplayer};
///
/// let frame = vec![
///     Particle::new((3.0, 4.0), (0.5, -0.5), Color::Cyan),
///     Particle::at_rest((7.0, 1.0), Color::Black),
/// ];
/// let mut recorder = FrameRecorder::new(Vec::new(), (10, 10), frame.len()).unwrap();
/// recorder.record(&frame).unwrap();
/// let bytes = recorder.into_inner().unwrap();
///
/// let mut replayer = FrameReplayer::new(bytes.as_slice()).unwrap();
/// assert_eq!(replayer.board_size(), (10, 10));
/// assert_eq!(replayer.next_frame().unwrap(), Some(frame.as_slice()));
/// assert_eq!(replayer.next_frame().unwrap(), None);
/// ```
pub struct FrameReplayer<R: Read> {
    reader: R,
    board_size: (i32, i32),
    particle_count: usize,
    frames_read: u64,
    bytes: Vec<u8>,
    frame: Vec<Particle>,
}

impl FrameReplayer<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let file = File::open(path)?;
        FrameReplayer::new(BufReader::new(file))
    }
}

impl<R: Read> FrameReplayer<R> {
    /// Reads the header from `reader`.
    ///
    /// # Errors
    /// Returns `SimulationError::MalformedRecording` for a truncated header or a negative
    /// particle count.
    pub fn new(mut reader: R) -> Result<Self, SimulationError> {
        let mut header = [0u8; HEADER_SIZE];
        match fill(&mut reader, &mut header)? {
            Filled::Complete => {}
            Filled::Empty | Filled::Partial(_) => {
                return Err(SimulationError::MalformedRecording(
                    "recording is shorter than its header".to_string(),
                ))
            }
        }

        let int_at = |offset: usize| {
            i32::from_le_bytes([header[offset], header[offset + 1], header[offset + 2], header[offset + 3]])
        };
        let board_size = (int_at(0), int_at(4));
        let count = int_at(8);
        let particle_count = usize::try_from(count).map_err(|_| {
            SimulationError::MalformedRecording(format!("negative particle count {}", count))
        })?;

        Ok(FrameReplayer {
            reader,
            board_size,
            particle_count,
            frames_read: 0,
            bytes: vec![0u8; particle_count * RECORD_SIZE],
            frame: Vec::with_capacity(particle_count),
        })
    }

    pub fn board_size(&self) -> (i32, i32) {
        self.board_size
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Decodes the next frame.
    ///
    /// Returns `Ok(None)` at a clean end of stream. A recording of zero particles has no
    /// frame boundaries to find, so it always reports the end of stream.
    ///
    /// # Errors
    /// Returns `SimulationError::MalformedRecording` if the stream ends inside a frame and
    /// `SimulationError::UnknownColor` for a record with an unknown RGB triple.
    pub fn next_frame(&mut self) -> Result<Option<&[Particle]>, SimulationError> {
        if self.particle_count == 0 {
            return Ok(None);
        }

        match fill(&mut self.reader, &mut self.bytes)? {
            Filled::Empty => return Ok(None),
            Filled::Partial(read) => {
                return Err(SimulationError::MalformedRecording(format!(
                    "frame {} is truncated after {} of {} bytes",
                    self.frames_read,
                    read,
                    self.bytes.len()
                )))
            }
            Filled::Complete => {}
        }

        self.frame.clear();
        for chunk in self.bytes.chunks_exact(RECORD_SIZE) {
            let mut record = [0u8; RECORD_SIZE];
            record.copy_from_slice(chunk);
            self.frame.push(decode_particle(&record)?);
        }
        self.frames_read += 1;
        Ok(Some(&self.frame))
    }
}

enum Filled {
    Empty,
    Partial(usize),
    Complete,
}

/// `read_exact` that tells a clean end of stream apart from a short read.
fn fill<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<Filled, SimulationError> {
    let mut read = 0;
    while read < buffer.len() {
        match reader.read(&mut buffer[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(match read {
        0 if !buffer.is_empty() => Filled::Empty,
        n if n == buffer.len() => Filled::Complete,
        n => Filled::Partial(n),
    })
}
