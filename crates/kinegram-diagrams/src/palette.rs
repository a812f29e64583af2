//! Named colors shared by the built-in scenes.

use kinegram_core::Color;

/// `#4A90D9`
pub const ACCENT_BLUE: Color = Color::rgb(0.290, 0.565, 0.851);
/// `#9B59B6`
pub const ACCENT_PURPLE: Color = Color::rgb(0.608, 0.349, 0.714);
/// `#F4D03F`
pub const ACCENT_GOLD: Color = Color::rgb(0.957, 0.816, 0.247);
/// `#1ABC9C`
pub const ACCENT_TEAL: Color = Color::rgb(0.102, 0.737, 0.612);
/// `#E74C3C`
pub const ACCENT_CORAL: Color = Color::rgb(0.906, 0.298, 0.235);
/// `#E91E63`
pub const ACCENT_PINK: Color = Color::rgb(0.914, 0.118, 0.388);
/// `#2C3E50`
pub const DEEP_BLUE: Color = Color::rgb(0.173, 0.243, 0.314);
/// `#ECF0F1`
pub const SOFT_WHITE: Color = Color::rgb(0.925, 0.941, 0.945);
/// `#00D4FF`
pub const GLOW_BLUE: Color = Color::rgb(0.0, 0.831, 1.0);
/// `#A855F7`
pub const GLOW_PURPLE: Color = Color::rgb(0.659, 0.333, 0.969);
/// `#0D1117`, the dark backdrop of the architecture walkthrough.
pub const NIGHT: Color = Color::rgb(0.051, 0.067, 0.090);
/// `#FF6B6B`
pub const SALMON: Color = Color::rgb(1.0, 0.420, 0.420);
/// `#4ECDC4`
pub const MINT: Color = Color::rgb(0.306, 0.804, 0.769);

/// `#1A1A2E`, backdrop of the intuition walkthrough.
pub const MIDNIGHT: Color = Color::rgb(0.102, 0.102, 0.180);
/// `#EAEAEA`
pub const MIST: Color = Color::rgb(0.918, 0.918, 0.918);
/// `#4A4A6A`, for de-emphasised captions.
pub const DUSK: Color = Color::rgb(0.290, 0.290, 0.416);
/// `#4FACFE`
pub const SKY: Color = Color::rgb(0.310, 0.675, 0.996);
/// `#FBBF24`
pub const AMBER: Color = Color::rgb(0.984, 0.749, 0.141);
/// `#F472B6`
pub const ROSE: Color = Color::rgb(0.957, 0.447, 0.714);
/// `#2DD4BF`
pub const AQUA: Color = Color::rgb(0.176, 0.831, 0.749);
/// `#A78BFA`
pub const LAVENDER: Color = Color::rgb(0.655, 0.545, 0.980);
/// `#34D399`
pub const EMERALD: Color = Color::rgb(0.204, 0.827, 0.600);

/// One color per attention head, in head order.
pub const HEAD_COLORS: [Color; 8] = [
    ACCENT_CORAL,
    ACCENT_GOLD,
    ACCENT_TEAL,
    ACCENT_BLUE,
    ACCENT_PURPLE,
    ACCENT_PINK,
    SALMON,
    MINT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_matches_hex() {
        for (color, hex) in [
            (ACCENT_BLUE, "#4A90D9"),
            (ACCENT_GOLD, "#F4D03F"),
            (NIGHT, "#0D1117"),
            (GLOW_BLUE, "#00D4FF"),
            (MIDNIGHT, "#1A1A2E"),
            (SKY, "#4FACFE"),
            (AMBER, "#FBBF24"),
            (LAVENDER, "#A78BFA"),
        ] {
            let parsed = Color::from_hex(hex).unwrap();
            let (a, b) = (color.to_rgba8(), parsed.to_rgba8());
            for i in 0..3 {
                assert!((a[i] as i32 - b[i] as i32).abs() <= 1, "{} channel {}", hex, i);
            }
        }
    }
}
