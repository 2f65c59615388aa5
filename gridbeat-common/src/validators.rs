//! Pure validation predicates over scalar and array inputs
//!
//! Every function here is side-effect free and total, so field validation
//! stays unit-testable without a database.

use crate::color::MaterialColor;

/// True iff `v` matches the canonical UUIDv4 textual form:
/// 8-4-4-4-12 lowercase hex groups, version nibble 1-5, variant nibble 8/9/a/b.
pub fn is_valid_uuid(v: &str) -> bool {
    let bytes = v.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    for (i, &b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if b != b'-' {
                    return false;
                }
            }
            14 => {
                if !(b'1'..=b'5').contains(&b) {
                    return false;
                }
            }
            19 => {
                if !matches!(b, b'8' | b'9' | b'a' | b'b') {
                    return false;
                }
            }
            _ => {
                if !matches!(b, b'0'..=b'9' | b'a'..=b'f') {
                    return false;
                }
            }
        }
    }
    true
}

/// True iff `v` carries an `audio/*` MIME type
pub fn is_valid_audio_mime_type(v: &str) -> bool {
    v.starts_with("audio/")
}

/// MIDI note range: 0 inclusive to 128 exclusive
pub fn is_valid_midi_note(v: i64) -> bool {
    (0..128).contains(&v)
}

/// Detune range in cents: [-1200, 1200]
pub fn is_valid_detune(v: i64) -> bool {
    (-1200..=1200).contains(&v)
}

/// Gain magnitude bounded by 32-bit float max, exclusive on both sides.
/// Legacy constraint: gain values were historically 32-bit floats, so the
/// bound is f32's, not f64's.
pub fn is_valid_gain(v: f64) -> bool {
    v > -3.402_823_5e38 && v < 3.402_823_5e38
}

pub fn is_number_positive(v: f64) -> bool {
    v > 0.0
}

pub fn is_integer_positive(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && is_number_positive(v)
}

/// Short-circuits true on `None`, otherwise delegates to `pred`
pub fn is_null_or<T, F>(pred: F) -> impl Fn(Option<T>) -> bool
where
    F: Fn(T) -> bool,
{
    move |v| match v {
        None => true,
        Some(value) => pred(value),
    }
}

/// Short-circuits true on an empty slice, otherwise delegates to `pred`
pub fn is_empty_array_or<T, F>(pred: F) -> impl Fn(&[T]) -> bool
where
    F: Fn(&[T]) -> bool,
{
    move |v| v.is_empty() || pred(v)
}

/// Every element must satisfy `pred`; vacuously true on an empty slice
pub fn each_array_item<T, F>(pred: F) -> impl Fn(&[T]) -> bool
where
    F: Fn(&T) -> bool,
{
    move |v| v.iter().all(&pred)
}

/// Membership in the 16-color runtime palette assignable to tracks.
/// `MaterialColor` itself parses 19 tokens; see the module docs in `color`.
pub fn is_valid_track_color(v: MaterialColor) -> bool {
    matches!(
        v,
        MaterialColor::Red
            | MaterialColor::Pink
            | MaterialColor::Purple
            | MaterialColor::DeepPurple
            | MaterialColor::Indigo
            | MaterialColor::Blue
            | MaterialColor::LightBlue
            | MaterialColor::Cyan
            | MaterialColor::Teal
            | MaterialColor::Green
            | MaterialColor::LightGreen
            | MaterialColor::Lime
            | MaterialColor::Yellow
            | MaterialColor::Amber
            | MaterialColor::Orange
            | MaterialColor::DeepOrange
    )
}

/// Note resolution: whole, half, or quarter beat
pub fn is_valid_note_resolution(v: i64) -> bool {
    matches!(v, 1 | 2 | 4)
}

/// At least one `.` separator in the filename
pub fn has_file_extension(v: &str) -> bool {
    v.split('.').count() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_accepts_canonical_v4() {
        assert!(is_valid_uuid("9b2a4f0e-6f3d-4c8a-9b1e-0d2c4a6e8f01"));
        assert!(is_valid_uuid("00000000-0000-4000-8000-000000000000"));
    }

    #[test]
    fn uuid_rejects_wrong_length() {
        assert!(!is_valid_uuid(""));
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-4c8a-9b1e-0d2c4a6e8f0"));
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-4c8a-9b1e-0d2c4a6e8f011"));
    }

    #[test]
    fn uuid_rejects_bad_version_nibble() {
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-0c8a-9b1e-0d2c4a6e8f01"));
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-6c8a-9b1e-0d2c4a6e8f01"));
    }

    #[test]
    fn uuid_rejects_bad_variant_nibble() {
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-4c8a-7b1e-0d2c4a6e8f01"));
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-4c8a-cb1e-0d2c4a6e8f01"));
    }

    #[test]
    fn uuid_rejects_non_hex_and_uppercase() {
        assert!(!is_valid_uuid("9b2a4f0e-6f3d-4c8a-9b1e-0d2c4a6e8g01"));
        assert!(!is_valid_uuid("9B2A4F0E-6F3D-4C8A-9B1E-0D2C4A6E8F01"));
    }

    #[test]
    fn midi_note_boundaries() {
        assert!(is_valid_midi_note(0));
        assert!(is_valid_midi_note(127));
        assert!(!is_valid_midi_note(128));
        assert!(!is_valid_midi_note(-1));
    }

    #[test]
    fn detune_boundaries() {
        assert!(is_valid_detune(1200));
        assert!(!is_valid_detune(1201));
        assert!(is_valid_detune(-1200));
        assert!(!is_valid_detune(-1201));
        assert!(is_valid_detune(0));
    }

    #[test]
    fn gain_uses_float32_bounds() {
        assert!(is_valid_gain(1.0));
        assert!(is_valid_gain(9_007_199_254_740_991.0)); // MAX_SAFE_INTEGER scale
        assert!(!is_valid_gain(3.402_823_5e38));
        assert!(!is_valid_gain(-3.402_823_5e38));
        assert!(!is_valid_gain(f64::MAX));
    }

    #[test]
    fn positivity() {
        assert!(is_number_positive(0.5));
        assert!(!is_number_positive(0.0));
        assert!(is_integer_positive(3.0));
        assert!(!is_integer_positive(3.5));
        assert!(!is_integer_positive(0.0));
        assert!(!is_integer_positive(-1.0));
    }

    #[test]
    fn null_or_combinator() {
        let check = is_null_or(|v: i64| is_valid_midi_note(v));
        assert!(check(None));
        assert!(check(Some(64)));
        assert!(!check(Some(200)));
    }

    #[test]
    fn empty_array_or_combinator() {
        let check = is_empty_array_or(each_array_item(|v: &i64| *v > 0));
        assert!(check(&[]));
        assert!(check(&[1, 2]));
        assert!(!check(&[1, -2]));
    }

    #[test]
    fn each_array_item_is_vacuously_true() {
        let check = each_array_item(|v: &i64| *v > 0);
        assert!(check(&[]));
    }

    #[test]
    fn track_color_palette_excludes_neutral_tokens() {
        assert!(is_valid_track_color(MaterialColor::Pink));
        assert!(is_valid_track_color(MaterialColor::DeepOrange));
        assert!(!is_valid_track_color(MaterialColor::Brown));
        assert!(!is_valid_track_color(MaterialColor::Grey));
        assert!(!is_valid_track_color(MaterialColor::BlueGrey));
    }

    #[test]
    fn note_resolution_membership() {
        assert!(is_valid_note_resolution(1));
        assert!(is_valid_note_resolution(2));
        assert!(is_valid_note_resolution(4));
        assert!(!is_valid_note_resolution(3));
        assert!(!is_valid_note_resolution(8));
    }

    #[test]
    fn file_extension_detection() {
        assert!(has_file_extension("toto.wav"));
        assert!(has_file_extension("loop.tar.gz"));
        assert!(has_file_extension("trailing."));
        assert!(!has_file_extension("noextension"));
    }

    #[test]
    fn audio_mime_type_prefix() {
        assert!(is_valid_audio_mime_type("audio/wave"));
        assert!(is_valid_audio_mime_type("audio/mpeg"));
        assert!(!is_valid_audio_mime_type("video/mp4"));
        assert!(!is_valid_audio_mime_type("text/plain"));
    }
}
