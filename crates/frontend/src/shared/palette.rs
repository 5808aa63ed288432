//! Accent palettes for department cards and member avatars.
//!
//! The palette is picked from the first UTF-16 unit of the name so the same
//! name always gets the same colour.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Card background
    pub bg: &'static str,
    pub accent: &'static str,
    pub light: &'static str,
    pub border: &'static str,
    /// Avatar gradient stops
    pub gradient: [&'static str; 2],
}

impl Palette {
    /// `linear-gradient(...)` for avatar circles
    pub fn avatar_background(&self) -> String {
        format!(
            "linear-gradient(135deg, {}, {})",
            self.gradient[0], self.gradient[1]
        )
    }

    /// Inline style exposing the palette as CSS custom properties
    pub fn css_vars(&self) -> String {
        format!(
            "--accent: {}; --accent-light: {}; --accent-border: {}; --card-bg: {};",
            self.accent, self.light, self.border, self.bg
        )
    }
}

const fn palette(
    bg: &'static str,
    accent: &'static str,
    light: &'static str,
    border: &'static str,
    dark: &'static str,
) -> Palette {
    Palette {
        bg,
        accent,
        light,
        border,
        gradient: [accent, dark],
    }
}

pub const DEPARTMENT_PALETTES: [Palette; 8] = [
    palette("linear-gradient(135deg, #f5f3ff, #ede9fe)", "#8b5cf6", "rgba(139,92,246,0.08)", "rgba(139,92,246,0.12)", "#7c3aed"),
    palette("linear-gradient(135deg, #eff6ff, #dbeafe)", "#3b82f6", "rgba(59,130,246,0.08)", "rgba(59,130,246,0.12)", "#2563eb"),
    palette("linear-gradient(135deg, #ecfdf5, #d1fae5)", "#10b981", "rgba(16,185,129,0.08)", "rgba(16,185,129,0.12)", "#059669"),
    palette("linear-gradient(135deg, #fdf2f8, #fce7f3)", "#ec4899", "rgba(236,72,153,0.08)", "rgba(236,72,153,0.12)", "#db2777"),
    palette("linear-gradient(135deg, #f2f8fd, #e8f1fa)", "#f97316", "rgba(249,115,22,0.08)", "rgba(249,115,22,0.12)", "#ea580c"),
    palette("linear-gradient(135deg, #f0fdfa, #ccfbf1)", "#14b8a6", "rgba(20,184,166,0.08)", "rgba(20,184,166,0.12)", "#0d9488"),
    palette("linear-gradient(135deg, #fefce8, #fef9c3)", "#eab308", "rgba(234,179,8,0.08)", "rgba(234,179,8,0.12)", "#ca8a04"),
    palette("linear-gradient(135deg, #fef2f2, #fecaca)", "#ef4444", "rgba(239,68,68,0.08)", "rgba(239,68,68,0.12)", "#dc2626"),
];

pub const MEMBER_PALETTES: [Palette; 8] = [
    palette("linear-gradient(135deg, #ecfeff, #cffafe)", "#06b6d4", "rgba(6,182,212,0.08)", "rgba(6,182,212,0.12)", "#0891b2"),
    palette("linear-gradient(135deg, #f5f3ff, #ede9fe)", "#8b5cf6", "rgba(139,92,246,0.08)", "rgba(139,92,246,0.12)", "#7c3aed"),
    palette("linear-gradient(135deg, #fdf2f8, #fce7f3)", "#ec4899", "rgba(236,72,153,0.08)", "rgba(236,72,153,0.12)", "#db2777"),
    palette("linear-gradient(135deg, #fffbeb, #fef3c7)", "#f59e0b", "rgba(245,158,11,0.08)", "rgba(245,158,11,0.12)", "#d97706"),
    palette("linear-gradient(135deg, #ecfdf5, #d1fae5)", "#10b981", "rgba(16,185,129,0.08)", "rgba(16,185,129,0.12)", "#059669"),
    palette("linear-gradient(135deg, #eff6ff, #dbeafe)", "#3b82f6", "rgba(59,130,246,0.08)", "rgba(59,130,246,0.12)", "#2563eb"),
    palette("linear-gradient(135deg, #fef2f2, #fecaca)", "#ef4444", "rgba(239,68,68,0.08)", "rgba(239,68,68,0.12)", "#dc2626"),
    palette("linear-gradient(135deg, #f0fdfa, #ccfbf1)", "#14b8a6", "rgba(20,184,166,0.08)", "rgba(20,184,166,0.12)", "#0d9488"),
];

fn pick(palettes: &'static [Palette; 8], name: &str) -> &'static Palette {
    let index = name
        .encode_utf16()
        .next()
        .map(|unit| unit as usize % palettes.len())
        .unwrap_or(0);
    &palettes[index]
}

pub fn department_palette(name: &str) -> &'static Palette {
    pick(&DEPARTMENT_PALETTES, name)
}

pub fn member_palette(name: &str) -> &'static Palette {
    pick(&MEMBER_PALETTES, name)
}

/// Up to two initials for an avatar ("Abebe Kebede" -> "AK")
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_uses_first_palette() {
        assert_eq!(department_palette("").accent, "#8b5cf6");
        assert_eq!(member_palette("").accent, "#06b6d4");
    }

    #[test]
    fn test_first_char_selects_palette() {
        // 'A' = 65, 65 % 8 = 1
        assert_eq!(department_palette("Audio").accent, "#3b82f6");
        assert_eq!(member_palette("Abebe").accent, "#8b5cf6");
        // 'H' = 72, 72 % 8 = 0
        assert_eq!(department_palette("Hospitality").accent, "#8b5cf6");
        // same first letter, same palette
        assert_eq!(member_palette("Sara"), member_palette("Samuel"));
    }

    #[test]
    fn test_avatar_background() {
        assert_eq!(
            MEMBER_PALETTES[0].avatar_background(),
            "linear-gradient(135deg, #06b6d4, #0891b2)"
        );
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("abebe kebede tesfaye"), "AK");
        assert_eq!(initials("Sara"), "S");
        assert_eq!(initials("  "), "");
    }
}
