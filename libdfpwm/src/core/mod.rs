pub mod analysis;
pub mod audio_constants;
pub mod error;
pub mod types;

pub use audio_constants::*;
pub use error::{DfpwmError, DfpwmResult};
pub use types::*;

pub use analysis::{fingerprint, fingerprint_hex, mean, peak, rms, settling_index, snr_db};
