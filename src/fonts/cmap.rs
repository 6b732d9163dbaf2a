//! ToUnicode CMap parsing.
//!
//! Only the `bfchar` and `bfrange` sections matter here. Source codes are
//! glyph ids of the embedded font; destinations are UTF-16BE hex strings, so
//! supplementary codepoints arrive as surrogate pairs (`<D83EDF00>`).

use crate::Result;

use regex::Regex;
use std::collections::BTreeMap;

/// Glyph id to Unicode scalar.
pub type GlyphMap = BTreeMap<u32, u32>;

/// Decode a destination hex string to one scalar value.
///
/// UTF-16BE is tried first; short strings that are not valid UTF-16 (some
/// producers write `<1FB00>` directly) fall back to a plain hex number.
pub fn decode_destination(hex: &str) -> Option<u32> {
    if !hex.is_empty() && hex.len() % 4 == 0 {
        let units = hex
            .as_bytes()
            .chunks(4)
            .map(|chunk| std::str::from_utf8(chunk).ok().and_then(|s| u16::from_str_radix(s, 16).ok()))
            .collect::<Option<Vec<u16>>>()?;
        let mut chars = char::decode_utf16(units);
        if let (Some(Ok(ch)), None) = (chars.next(), chars.next()) {
            return Some(ch as u32);
        }
    }
    if hex.len() <= 6 {
        return u32::from_str_radix(hex, 16).ok().filter(|v| char::from_u32(*v).is_some());
    }
    None
}

/// Parse every `bfchar` and `bfrange` record of a CMap.
pub fn parse_cmap(text: &str) -> Result<GlyphMap> {
    const BFCHAR_RE: &str = r"(?s)beginbfchar(.*?)endbfchar";
    const BFRANGE_RE: &str = r"(?s)beginbfrange(.*?)endbfrange";
    const PAIR_RE: &str = r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>";
    // <lo> <hi> <dst>   or   <lo> <hi> [<dst> <dst> ...]
    const RANGE_RE: &str = r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*(?:<([0-9A-Fa-f]+)>|\[([^\]]*)\])";
    const HEX_RE: &str = r"<([0-9A-Fa-f]+)>";

    let bfchar = Regex::new(BFCHAR_RE)?;
    let bfrange = Regex::new(BFRANGE_RE)?;
    let pair = Regex::new(PAIR_RE)?;
    let range = Regex::new(RANGE_RE)?;
    let hex = Regex::new(HEX_RE)?;

    let mut out = GlyphMap::new();

    for section in bfchar.captures_iter(text) {
        for caps in pair.captures_iter(&section[1]) {
            let src = u32::from_str_radix(&caps[1], 16)?;
            match decode_destination(&caps[2]) {
                Some(dst) => {
                    out.insert(src, dst);
                }
                None => log::debug!("bfchar <{}>: undecodable destination <{}>", &caps[1], &caps[2]),
            }
        }
    }

    for section in bfrange.captures_iter(text) {
        for caps in range.captures_iter(&section[1]) {
            let lo = u32::from_str_radix(&caps[1], 16)?;
            let hi = u32::from_str_radix(&caps[2], 16)?;

            if let Some(dst) = caps.get(3) {
                let Some(base) = decode_destination(dst.as_str()) else {
                    log::debug!("bfrange <{:X}>: undecodable destination <{}>", lo, dst.as_str());
                    continue;
                };
                for (i, src) in (lo..=hi).enumerate() {
                    out.insert(src, base + i as u32);
                }
            } else if let Some(array) = caps.get(4) {
                for (src, item) in (lo..=hi).zip(hex.captures_iter(array.as_str())) {
                    if let Some(dst) = decode_destination(&item[1]) {
                        out.insert(src, dst);
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Keep only mappings whose codepoint falls inside `range`.
pub fn filter_range(map: &GlyphMap, range: std::ops::RangeInclusive<u32>) -> GlyphMap {
    map.iter()
        .filter(|(_, cp)| range.contains(*cp))
        .map(|(gid, cp)| (*gid, *cp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMAP: &str = r"
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfchar
<0003> <0041>
<0004> <D83EDF00>
endbfchar
2 beginbfrange
<0010> <0012> <D83EDF10>
<0020> <0021> [<D83EDF3C> <D83EDF3D>]
endbfrange
1 beginbfrange
<0030> <0031> <1CC00>
endbfrange
endcmap
";

    #[test]
    fn destinations() {
        assert_eq!(decode_destination("0041"), Some(0x41));
        assert_eq!(decode_destination("D83EDF00"), Some(0x1FB00));
        assert_eq!(decode_destination("D833DC00"), Some(0x1CC00));
        assert_eq!(decode_destination("1FB00"), Some(0x1FB00));
        // Lone surrogate.
        assert_eq!(decode_destination("D83E"), None);
        assert_eq!(decode_destination(""), None);
    }

    #[test]
    fn parses_chars_and_ranges() {
        let map = parse_cmap(CMAP).unwrap();
        assert_eq!(map.get(&0x03), Some(&0x41));
        assert_eq!(map.get(&0x04), Some(&0x1FB00));
        assert_eq!(map.get(&0x10), Some(&0x1FB10));
        assert_eq!(map.get(&0x12), Some(&0x1FB12));
        assert_eq!(map.get(&0x20), Some(&0x1FB3C));
        assert_eq!(map.get(&0x21), Some(&0x1FB3D));
        assert_eq!(map.get(&0x31), Some(&0x1CC01));
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn filters_to_block() {
        let map = parse_cmap(CMAP).unwrap();
        let block = filter_range(&map, 0x1FB00..=0x1FBFF);
        assert_eq!(block.len(), 6);
        assert!(block.values().all(|cp| (0x1FB00..=0x1FBFF).contains(cp)));
    }

    #[test]
    fn empty_cmap() {
        assert!(parse_cmap("begincmap endcmap").unwrap().is_empty());
    }
}
