//! Recording decoded images to disk

mod tiff_recorder;

pub use tiff_recorder::{RecordCompression, TiffRecorder};
