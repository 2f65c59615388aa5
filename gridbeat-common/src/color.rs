//! Track color palette
//!
//! The wire enum carries 19 Material Design tokens; persisted sessions may
//! use any of them. New and updated tracks are restricted to the 16-color
//! palette checked by `validators::is_valid_track_color` (the three neutral
//! tokens are not assignable).

use serde::{Deserialize, Serialize};

/// Named color token for track UI coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialColor {
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    LightBlue,
    Cyan,
    Teal,
    Green,
    LightGreen,
    Lime,
    Yellow,
    Amber,
    Orange,
    DeepOrange,
    Brown,
    Grey,
    BlueGrey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_camel_case_token() {
        assert_eq!(
            serde_json::to_string(&MaterialColor::DeepPurple).unwrap(),
            "\"deepPurple\""
        );
        assert_eq!(
            serde_json::to_string(&MaterialColor::Pink).unwrap(),
            "\"pink\""
        );
    }

    #[test]
    fn parses_neutral_tokens_from_stored_data() {
        let color: MaterialColor = serde_json::from_str("\"blueGrey\"").unwrap();
        assert_eq!(color, MaterialColor::BlueGrey);
    }

    #[test]
    fn rejects_unknown_token() {
        assert!(serde_json::from_str::<MaterialColor>("\"magenta\"").is_err());
    }
}
