//! Entity models

pub mod instrument;
pub mod processing;
pub mod sample;
pub mod session;

pub use instrument::{
    Instrument, InstrumentMapping, InstrumentMappingView, InstrumentView, DEFAULT_INSTRUMENT_GROUP,
};
pub use processing::{
    AudioProcessing, DelayProcessing, DistortionProcessing, FilterKind, FilterProcessing,
    GainProcessing, Oversample,
};
pub use sample::Sample;
pub use session::{
    Cell, Session, SessionView, Track, TrackView, DEFAULT_TEMPO, DEFAULT_TRACK_LABEL,
    PATTERN_LENGTH,
};
