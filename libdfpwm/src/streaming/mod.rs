//! streaming encode/decode for dfpwm
//!
//! incremental encoding and decoding for audio that arrives in arbitrary chunks
mod decoder;
mod encoder;

pub use decoder::StreamingDecoder;
pub use encoder::StreamingEncoder;

#[cfg(test)]
mod tests;
