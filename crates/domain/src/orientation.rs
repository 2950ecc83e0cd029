/// Counter-clockwise rotation needed to display an image upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    pub fn from_exif_orientation(value: u16) -> Self {
        match value {
            3 => Self::Ccw180,
            6 => Self::Ccw270,
            8 => Self::Ccw90,
            _ => Self::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Ccw90 => 90,
            Self::Ccw180 => 180,
            Self::Ccw270 => 270,
        }
    }
}
