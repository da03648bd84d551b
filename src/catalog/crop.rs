use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Crop identifier attached to a detection request.
///
/// The ten named variants are the crops the service knows about. Any other
/// identifier a caller sends is kept verbatim in `Other` so it can be echoed
/// back; lookups for it fall through to the catalog's default crop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CropType {
    Tomato,
    Potato,
    Corn,
    Rice,
    Wheat,
    Cotton,
    Apple,
    Grape,
    Pepper,
    Strawberry,
    Other(String),
}

impl CropType {
    /// Canonical lowercase name, as used on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            CropType::Tomato     => "tomato",
            CropType::Potato     => "potato",
            CropType::Corn       => "corn",
            CropType::Rice       => "rice",
            CropType::Wheat      => "wheat",
            CropType::Cotton     => "cotton",
            CropType::Apple      => "apple",
            CropType::Grape      => "grape",
            CropType::Pepper     => "pepper",
            CropType::Strawberry => "strawberry",
            CropType::Other(name) => name,
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, CropType::Other(_))
    }
}

impl FromStr for CropType {
    type Err = Infallible;

    /// Never fails: unrecognized names become `CropType::Other`.
    /// Matching is exact, so `"Tomato"` is not `CropType::Tomato`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "tomato"     => CropType::Tomato,
            "potato"     => CropType::Potato,
            "corn"       => CropType::Corn,
            "rice"       => CropType::Rice,
            "wheat"      => CropType::Wheat,
            "cotton"     => CropType::Cotton,
            "apple"      => CropType::Apple,
            "grape"      => CropType::Grape,
            "pepper"     => CropType::Pepper,
            "strawberry" => CropType::Strawberry,
            other        => CropType::Other(other.to_owned()),
        })
    }
}

impl From<&str> for CropType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(crop) => crop,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CropType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CropType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(CropType::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_crops() {
        assert_eq!(CropType::from("tomato"), CropType::Tomato);
        assert_eq!(CropType::from("strawberry"), CropType::Strawberry);
        assert_eq!(CropType::from("wheat").as_str(), "wheat");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let crop = CropType::from("Tomato");
        assert_eq!(crop, CropType::Other("Tomato".to_string()));
        assert!(crop.is_other());
    }

    #[test]
    fn test_unknown_crop_keeps_its_name() {
        let crop = CropType::from("banana");
        assert_eq!(crop.to_string(), "banana");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&CropType::Corn).unwrap();
        assert_eq!(json, "\"corn\"");

        let back: CropType = serde_json::from_str("\"rice\"").unwrap();
        assert_eq!(back, CropType::Rice);

        let other: CropType = serde_json::from_str("\"okra\"").unwrap();
        assert_eq!(other, CropType::Other("okra".to_string()));
    }
}
