// Dakuten / handakuten variants for both syllabaries.
//
// Each map sends a base glyph to its marked variant; the romanization is
// rewritten alongside it by `DiacriticMap::romanize`.

/// Which diacritic a map applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// ゛ voicing mark (か → が).
    Dakuten,
    /// ゜ semi-voicing mark (は → ぱ).
    Handakuten,
}

pub struct DiacriticMap {
    pub mark: Mark,
    pub pairs: &'static [(&'static str, &'static str)],
}

impl DiacriticMap {
    pub fn variant(&self, base: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(from, _)| *from == base)
            .map(|(_, to)| *to)
    }

    pub fn romanize(&self, romaji: &str) -> String {
        match self.mark {
            Mark::Dakuten => voiced_romaji(romaji),
            Mark::Handakuten => semi_voiced_romaji(romaji),
        }
    }
}

pub static DAKUTEN: DiacriticMap = DiacriticMap {
    mark: Mark::Dakuten,
    pairs: &[
        ("か", "が"), ("き", "ぎ"), ("く", "ぐ"), ("け", "げ"), ("こ", "ご"),
        ("さ", "ざ"), ("し", "じ"), ("す", "ず"), ("せ", "ぜ"), ("そ", "ぞ"),
        ("た", "だ"), ("ち", "ぢ"), ("つ", "づ"), ("て", "で"), ("と", "ど"),
        ("は", "ば"), ("ひ", "び"), ("ふ", "ぶ"), ("へ", "べ"), ("ほ", "ぼ"),
        ("カ", "ガ"), ("キ", "ギ"), ("ク", "グ"), ("ケ", "ゲ"), ("コ", "ゴ"),
        ("サ", "ザ"), ("シ", "ジ"), ("ス", "ズ"), ("セ", "ゼ"), ("ソ", "ゾ"),
        ("タ", "ダ"), ("チ", "ヂ"), ("ツ", "ヅ"), ("テ", "デ"), ("ト", "ド"),
        ("ハ", "バ"), ("ヒ", "ビ"), ("フ", "ブ"), ("ヘ", "ベ"), ("ホ", "ボ"),
    ],
};

pub static HANDAKUTEN: DiacriticMap = DiacriticMap {
    mark: Mark::Handakuten,
    pairs: &[
        ("は", "ぱ"), ("ひ", "ぴ"), ("ふ", "ぷ"), ("へ", "ぺ"), ("ほ", "ぽ"),
        ("ハ", "パ"), ("ヒ", "ピ"), ("フ", "プ"), ("ヘ", "ペ"), ("ホ", "ポ"),
    ],
};

/// Maps applied during pool expansion, voiced before semi-voiced.
pub static MAPS: [&DiacriticMap; 2] = [&DAKUTEN, &HANDAKUTEN];

/// Romaji of the dakuten variant: k→g, s→z, t→d, h/f→b, with the
/// irregular し/ち → ji and つ → zu.
pub fn voiced_romaji(romaji: &str) -> String {
    match romaji {
        "shi" | "chi" => return "ji".to_string(),
        "tsu" => return "zu".to_string(),
        _ => {}
    }
    let voiced = match romaji.chars().next() {
        Some('k') => 'g',
        Some('s') => 'z',
        Some('t') => 'd',
        Some('h') | Some('f') => 'b',
        _ => return romaji.to_string(),
    };
    replace_initial(romaji, voiced)
}

/// Romaji of the handakuten variant: h/f → p.
pub fn semi_voiced_romaji(romaji: &str) -> String {
    match romaji.chars().next() {
        Some('h') | Some('f') => replace_initial(romaji, 'p'),
        _ => romaji.to_string(),
    }
}

fn replace_initial(romaji: &str, initial: char) -> String {
    let mut out = String::with_capacity(romaji.len());
    out.push(initial);
    out.push_str(&romaji[1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voiced_regular_rows() {
        assert_eq!(voiced_romaji("ka"), "ga");
        assert_eq!(voiced_romaji("su"), "zu");
        assert_eq!(voiced_romaji("to"), "do");
        assert_eq!(voiced_romaji("ho"), "bo");
    }

    #[test]
    fn test_voiced_irregulars() {
        assert_eq!(voiced_romaji("shi"), "ji");
        assert_eq!(voiced_romaji("chi"), "ji");
        assert_eq!(voiced_romaji("tsu"), "zu");
        assert_eq!(voiced_romaji("fu"), "bu");
    }

    #[test]
    fn test_semi_voiced() {
        assert_eq!(semi_voiced_romaji("ha"), "pa");
        assert_eq!(semi_voiced_romaji("fu"), "pu");
        assert_eq!(semi_voiced_romaji("ka"), "ka");
    }

    #[test]
    fn test_variant_lookup() {
        assert_eq!(DAKUTEN.variant("し"), Some("じ"));
        assert_eq!(HANDAKUTEN.variant("フ"), Some("プ"));
        assert_eq!(HANDAKUTEN.variant("か"), None);
        assert_eq!(DAKUTEN.variant("あ"), None);
    }
}
