//! Marker colours per gubernija (group)

use crate::config::ShapeColor;

/// Groups with a fixed colour
pub const KNOWN_GROUPS: [(&str, ShapeColor); 3] = [
    ("Kauno", ShapeColor::Rgb(0xe7, 0x4c, 0x3c)),
    ("Vilniaus", ShapeColor::Rgb(0x34, 0x98, 0xdb)),
    ("Suvalkų", ShapeColor::Rgb(0x27, 0xae, 0x60)),
];

/// Colour of points without a group
pub const UNGROUPED: ShapeColor = ShapeColor::Rgb(0xe7, 0x4c, 0x3c);

/// Colour for a group label
///
/// Unknown groups get a hue from a 32-bit string hash over UTF-16 code
/// units, so existing maps keep their colours.
pub fn group_color(group: &str) -> ShapeColor {
    if let Some((_, color)) = KNOWN_GROUPS.iter().find(|(name, _)| *name == group) {
        return *color;
    }
    let hue = (i64::from(group_hash(group)).abs() % 360) as u16;
    ShapeColor::Hsl(hue, 70, 50)
}

/// Colour for an optional group
pub fn point_color(group: Option<&str>) -> ShapeColor {
    group.map_or(UNGROUPED, group_color)
}

fn group_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |a, c| {
        a.wrapping_shl(5).wrapping_sub(a).wrapping_add(i32::from(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_groups() {
        assert_eq!(group_color("Vilniaus").to_string(), "#3498db");
        assert_eq!(group_color("Suvalkų").to_string(), "#27ae60");
        assert_eq!(point_color(None).to_string(), "#e74c3c");
    }

    #[test]
    fn test_hash_matches_java_style_string_hash() {
        // "Gardino".hashCode() in the 31-multiplier scheme
        let expected = "Gardino"
            .encode_utf16()
            .fold(0i64, |a, c| (a * 31 + i64::from(c)) as i32 as i64);
        assert_eq!(i64::from(group_hash("Gardino")), expected);
        assert_eq!(group_hash(""), 0);
        assert_eq!(group_hash("a"), 97);
    }

    #[test]
    fn test_unknown_group_is_deterministic_hsl() {
        let a = group_color("Gardino");
        assert_eq!(a, group_color("Gardino"));
        match a {
            ShapeColor::Hsl(h, 70, 50) => assert!(h < 360),
            other => panic!("unexpected colour {other:?}"),
        }
        // 97 % 360
        assert_eq!(group_color("a"), ShapeColor::Hsl(97, 70, 50));
    }
}
