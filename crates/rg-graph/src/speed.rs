//! Speed-limit inference from way tags.
//!
//! An explicit `maxspeed` wins; otherwise the `highway` class decides.
//!
//! `maxspeed` is read by keeping every ASCII digit and dropping everything
//! else, so `"50 mph"` → 50 and `"signals"` → fallback.  Multi-valued
//! limits are not understood: `"50;40"` reads as 5040.
//!
//! Only ASCII `0`-`9` count as digits, deliberately: a value written in
//! another script's decimal digits (`"٥٠"`) falls back to the `highway`
//! table rather than being read as 50.

use crate::Tags;

/// Coarse road class derived from the `highway` tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoadClass {
    /// `motorway`, `trunk`
    Major,
    /// `primary`, `secondary`, `tertiary`
    Arterial,
    /// Everything else, including a missing tag.
    Local,
}

impl RoadClass {
    pub fn from_highway(highway: Option<&str>) -> Self {
        match highway {
            Some("motorway" | "trunk")                   => RoadClass::Major,
            Some("primary" | "secondary" | "tertiary")   => RoadClass::Arterial,
            _                                            => RoadClass::Local,
        }
    }

    /// Speed assumed when a way has no usable `maxspeed`, in km/h.
    pub fn default_speed_kmph(self) -> u32 {
        match self {
            RoadClass::Major    => 90,
            RoadClass::Arterial => 60,
            RoadClass::Local    => 40,
        }
    }
}

/// Speed limit in km/h for a way with these tags.  Always > 0.
pub fn infer_speed<T: Tags + ?Sized>(tags: &T) -> u32 {
    tags.tag("maxspeed")
        .and_then(parse_maxspeed)
        .unwrap_or_else(|| RoadClass::from_highway(tags.tag("highway")).default_speed_kmph())
}

/// ASCII digits of `value` read as one integer.  `None` when there are no
/// ASCII digits, the number is zero, or it overflows `u32`.
fn parse_maxspeed(value: &str) -> Option<u32> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().filter(|&kmph| kmph > 0)
}
