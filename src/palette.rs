//! Colours shared by every figure.
//!
//! The four accent colours come from a colourblind-safe palette and must not
//! drift between figures.

use crate::scene::Color;

/// Fill of the position angle sector.
pub const PSI: Color = Color::rgb(0xe5, 0x7a, 0x77);

/// Fill of the ellipticity angle sector.
pub const CHI: Color = Color::rgb(0x7c, 0xa1, 0xcc);

/// Line through the major axis.
pub const MAJOR: Color = Color::rgb(0xf0, 0x50, 0x39);

/// Line through the minor axis.
pub const MINOR: Color = Color::rgb(0x1f, 0x44, 0x9c);

pub const BLACK: Color = Color::rgb(0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PSI, "#e57a77")]
    #[case(CHI, "#7ca1cc")]
    #[case(MAJOR, "#f05039")]
    #[case(MINOR, "#1f449c")]
    fn palette_hex(#[case] color: Color, #[case] hex: &str) {
        assert_eq!(color.to_hex(), hex);
        assert_eq!(Color::from_hex(hex), Some(color));
    }
}
