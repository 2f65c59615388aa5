//! Session aggregate: the sequencer project
//!
//! A session owns an ordered list of tracks (each a 64-cell pattern grid
//! bound to one instrument) plus denormalized reference lists of every
//! instrument and sample used across its tracks. All schema defaults are
//! explicit constructor steps here; nothing is backfilled by a mapping
//! layer.

use chrono::{DateTime, Utc};
use gridbeat_common::color::MaterialColor;
use gridbeat_common::validators::{
    is_integer_positive, is_null_or, is_number_positive, is_valid_gain, is_valid_note_resolution,
    is_valid_track_color,
};
use gridbeat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AudioProcessing, InstrumentView, Sample};

/// Fixed pattern grid length
pub const PATTERN_LENGTH: usize = 64;

pub const DEFAULT_TRACK_LABEL: &str = "Untitled track";
pub const DEFAULT_TEMPO: f64 = 120.0;

/// One step slot in a track's pattern grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub scheduled: bool,
    pub midi: Option<i64>,
    pub processing: AudioProcessing,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            scheduled: false,
            midi: None,
            processing: AudioProcessing::default(),
        }
    }
}

/// One sequencer lane. Stored form references its instrument by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: Uuid,
    pub color: MaterialColor,
    pub label: String,
    pub note_resolution: i64,
    pub instrument: Uuid,
    pub muted: bool,
    pub soloed: bool,
    pub cells: Vec<Cell>,
    pub processing: AudioProcessing,
}

impl Track {
    /// New track with every schema default applied: fresh id, untitled
    /// label, whole-beat resolution, 64 empty cells, unity-gain processing.
    pub fn new(instrument: Uuid, color: MaterialColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            color,
            label: DEFAULT_TRACK_LABEL.to_string(),
            note_resolution: 1,
            instrument,
            muted: false,
            soloed: false,
            cells: (0..PATTERN_LENGTH).map(|_| Cell::default()).collect(),
            processing: AudioProcessing::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_track_color(self.color) {
            return Err(Error::Validation(format!(
                "Not an assignable track color: {:?}",
                self.color
            )));
        }
        if !is_valid_note_resolution(self.note_resolution) {
            return Err(Error::Validation(format!(
                "Not a valid note resolution: {}",
                self.note_resolution
            )));
        }
        if self.cells.len() != PATTERN_LENGTH {
            return Err(Error::Validation(format!(
                "Pattern grid must hold exactly {} cells, {} given",
                PATTERN_LENGTH,
                self.cells.len()
            )));
        }
        Ok(())
    }
}

/// Stored session document. Reference lists hold ids; see `SessionView` for
/// the resolved read path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    #[serde(rename = "creatorID")]
    pub creator_id: String,
    pub tempo: f64,
    pub master_gain: f64,
    #[serde(rename = "activeTrackID")]
    pub active_track_id: Option<Uuid>,
    pub active_cell_beat: Option<i64>,
    pub track_order: Vec<Uuid>,
    pub tracks: Vec<Track>,
    pub instruments: Vec<Uuid>,
    pub samples: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// New empty session: no tracks, default transport/mixer state
    pub fn new(creator_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creator_id,
            tempo: DEFAULT_TEMPO,
            master_gain: 1.0,
            active_track_id: None,
            active_cell_beat: None,
            track_order: Vec::new(),
            tracks: Vec::new(),
            instruments: Vec::new(),
            samples: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.creator_id.is_empty() {
            return Err(Error::Validation("Session creatorID required".to_string()));
        }
        if !is_number_positive(self.tempo) {
            return Err(Error::Validation(format!(
                "Tempo must be positive, {} given",
                self.tempo
            )));
        }
        if !is_valid_gain(self.master_gain) {
            return Err(Error::Validation(format!(
                "Master gain out of range: {}",
                self.master_gain
            )));
        }
        if !is_null_or(|beat: i64| is_integer_positive(beat as f64))(self.active_cell_beat) {
            return Err(Error::Validation(format!(
                "Active cell beat must be a positive integer, {:?} given",
                self.active_cell_beat
            )));
        }
        for track in &self.tracks {
            track.validate()?;
        }
        Ok(())
    }

    /// Append a new track built from `instrument` to all four collections.
    /// No dedup on `instruments`/`samples`: repeated attaches append
    /// duplicate references, and stored sessions rely on that shape.
    /// `track_order` is append-only, reflecting attach order.
    pub fn attach_track(&mut self, track: Track, instrument: &InstrumentView) {
        self.track_order.push(track.id);
        self.instruments.push(instrument.id);
        for sample in &instrument.samples {
            self.samples.push(sample.id);
        }
        self.tracks.push(track);
    }
}

/// Track with its instrument resolved. `instrument` is `None` only when the
/// stored reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub id: Uuid,
    pub color: MaterialColor,
    pub label: String,
    pub note_resolution: i64,
    pub instrument: Option<InstrumentView>,
    pub muted: bool,
    pub soloed: bool,
    pub cells: Vec<Cell>,
    pub processing: AudioProcessing,
}

/// Session with tracks' instruments and the denormalized reference lists
/// resolved transitively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    #[serde(rename = "creatorID")]
    pub creator_id: String,
    pub tempo: f64,
    pub master_gain: f64,
    #[serde(rename = "activeTrackID")]
    pub active_track_id: Option<Uuid>,
    pub active_cell_beat: Option<i64>,
    pub track_order: Vec<Uuid>,
    pub tracks: Vec<TrackView>,
    pub instruments: Vec<InstrumentView>,
    pub samples: Vec<Sample>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument_view(samples: Vec<Sample>) -> InstrumentView {
        let now = Utc::now();
        InstrumentView {
            id: Uuid::new_v4(),
            label: "Drums".into(),
            group: "NO_GROUP".into(),
            samples,
            mapping: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn sample(label: &str) -> Sample {
        Sample::new(
            Uuid::new_v4(),
            format!("/samples/{label}.wav"),
            format!("{label}.wav"),
            "audio/wave".into(),
            Some(label.into()),
            None,
        )
    }

    #[test]
    fn new_session_is_empty_with_default_transport() {
        let session = Session::new("foo".into());
        assert!(session.tracks.is_empty());
        assert!(session.track_order.is_empty());
        assert!(session.instruments.is_empty());
        assert!(session.samples.is_empty());
        assert_eq!(session.tempo, 120.0);
        assert_eq!(session.master_gain, 1.0);
        assert_eq!(session.active_track_id, None);
        assert_eq!(session.active_cell_beat, None);
    }

    #[test]
    fn new_track_gets_full_default_grid() {
        let track = Track::new(Uuid::new_v4(), MaterialColor::Pink);
        assert_eq!(track.cells.len(), PATTERN_LENGTH);
        assert_eq!(track.cells[0], Cell::default());
        assert!(!track.cells[0].scheduled);
        assert_eq!(track.cells[0].midi, None);
        assert_eq!(track.cells[0].processing.gain.gain, 1.0);
        assert_eq!(track.label, "Untitled track");
        assert_eq!(track.note_resolution, 1);
        assert!(!track.muted);
        assert!(!track.soloed);
    }

    #[test]
    fn validate_rejects_non_positive_tempo() {
        let mut session = Session::new("foo".into());
        session.tempo = 0.0;
        assert!(session.validate().is_err());
    }

    #[test]
    fn validate_rejects_master_gain_at_float32_max() {
        let mut session = Session::new("foo".into());
        session.master_gain = 3.402_823_5e38;
        assert!(session.validate().is_err());
        session.master_gain = 9_007_199_254_740_991.0;
        assert!(session.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_creator() {
        let session = Session::new(String::new());
        assert!(session.validate().is_err());
    }

    #[test]
    fn validate_rejects_truncated_grid() {
        let mut session = Session::new("foo".into());
        let mut track = Track::new(Uuid::new_v4(), MaterialColor::Teal);
        track.cells.truncate(63);
        session.tracks.push(track);
        assert!(session.validate().is_err());
    }

    #[test]
    fn attach_appends_to_all_four_collections() {
        let mut session = Session::new("foo".into());
        let instrument = instrument_view(vec![sample("kick"), sample("snare")]);
        let track = Track::new(instrument.id, MaterialColor::Pink);
        let track_id = track.id;

        session.attach_track(track, &instrument);

        assert_eq!(session.tracks.len(), 1);
        assert_eq!(session.track_order, vec![track_id]);
        assert_eq!(session.instruments, vec![instrument.id]);
        assert_eq!(session.samples.len(), 2);
    }

    #[test]
    fn repeated_attach_duplicates_references() {
        let mut session = Session::new("foo".into());
        let instrument = instrument_view(vec![sample("kick"), sample("snare")]);

        session.attach_track(Track::new(instrument.id, MaterialColor::Pink), &instrument);
        session.attach_track(Track::new(instrument.id, MaterialColor::Pink), &instrument);

        assert_eq!(session.tracks.len(), 2);
        assert_eq!(session.track_order.len(), 2);
        assert_eq!(session.instruments.len(), 2);
        assert_eq!(session.samples.len(), 4);
    }
}
