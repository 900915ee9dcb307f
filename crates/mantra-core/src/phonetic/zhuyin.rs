//! Pinyin <-> Zhuyin (Bopomofo) conversion.

/// Pinyin initials, two-letter ones first for prefix matching.
const INITIALS: &[(&str, &str)] = &[
    ("zh", "ㄓ"),
    ("ch", "ㄔ"),
    ("sh", "ㄕ"),
    ("b", "ㄅ"),
    ("p", "ㄆ"),
    ("m", "ㄇ"),
    ("f", "ㄈ"),
    ("d", "ㄉ"),
    ("t", "ㄊ"),
    ("n", "ㄋ"),
    ("l", "ㄌ"),
    ("g", "ㄍ"),
    ("k", "ㄎ"),
    ("h", "ㄏ"),
    ("j", "ㄐ"),
    ("q", "ㄑ"),
    ("x", "ㄒ"),
    ("r", "ㄖ"),
    ("z", "ㄗ"),
    ("c", "ㄘ"),
    ("s", "ㄙ"),
];

/// Finals after an initial, and standalone syllables without y/w.
const FINALS: &[(&str, &str)] = &[
    ("a", "ㄚ"),
    ("o", "ㄛ"),
    ("e", "ㄜ"),
    ("ê", "ㄝ"),
    ("ai", "ㄞ"),
    ("ei", "ㄟ"),
    ("ao", "ㄠ"),
    ("ou", "ㄡ"),
    ("an", "ㄢ"),
    ("en", "ㄣ"),
    ("ang", "ㄤ"),
    ("eng", "ㄥ"),
    ("ong", "ㄨㄥ"),
    ("er", "ㄦ"),
    ("i", "ㄧ"),
    ("ia", "ㄧㄚ"),
    ("io", "ㄧㄛ"),
    ("ie", "ㄧㄝ"),
    ("iao", "ㄧㄠ"),
    ("iu", "ㄧㄡ"),
    ("ian", "ㄧㄢ"),
    ("in", "ㄧㄣ"),
    ("iang", "ㄧㄤ"),
    ("ing", "ㄧㄥ"),
    ("iong", "ㄩㄥ"),
    ("u", "ㄨ"),
    ("ua", "ㄨㄚ"),
    ("uo", "ㄨㄛ"),
    ("uai", "ㄨㄞ"),
    ("ui", "ㄨㄟ"),
    ("uan", "ㄨㄢ"),
    ("un", "ㄨㄣ"),
    ("uang", "ㄨㄤ"),
    ("ü", "ㄩ"),
    ("üe", "ㄩㄝ"),
    ("üan", "ㄩㄢ"),
    ("ün", "ㄩㄣ"),
];

/// Syllables spelled with a y/w onset.
const Y_W_SYLLABLES: &[(&str, &str)] = &[
    ("yi", "ㄧ"),
    ("ya", "ㄧㄚ"),
    ("yo", "ㄧㄛ"),
    ("ye", "ㄧㄝ"),
    ("yai", "ㄧㄞ"),
    ("yao", "ㄧㄠ"),
    ("you", "ㄧㄡ"),
    ("yan", "ㄧㄢ"),
    ("yin", "ㄧㄣ"),
    ("yang", "ㄧㄤ"),
    ("ying", "ㄧㄥ"),
    ("yong", "ㄩㄥ"),
    ("yu", "ㄩ"),
    ("yue", "ㄩㄝ"),
    ("yuan", "ㄩㄢ"),
    ("yun", "ㄩㄣ"),
    ("wu", "ㄨ"),
    ("wa", "ㄨㄚ"),
    ("wo", "ㄨㄛ"),
    ("wai", "ㄨㄞ"),
    ("wei", "ㄨㄟ"),
    ("wan", "ㄨㄢ"),
    ("wen", "ㄨㄣ"),
    ("wang", "ㄨㄤ"),
    ("weng", "ㄨㄥ"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Split a numbered pinyin syllable (`"zhong1"`) into base and tone.
/// A syllable without a digit is neutral tone (5).
fn split_tone(syllable: &str) -> (&str, u8) {
    match syllable.chars().last().and_then(|c| c.to_digit(10)) {
        Some(d) if (1..=5).contains(&d) => (&syllable[..syllable.len() - 1], d as u8),
        _ => (syllable, 5),
    }
}

fn tone_mark(tone: u8) -> &'static str {
    match tone {
        2 => "ˊ",
        3 => "ˇ",
        4 => "ˋ",
        _ => "",
    }
}

/// Convert one numbered pinyin syllable to Zhuyin.
///
/// First tone carries no mark; neutral tone is written with a leading `˙`.
/// Returns `None` for strings that are not a pinyin syllable.
pub fn pinyin_to_zhuyin(syllable: &str) -> Option<String> {
    let lower = syllable.trim().to_lowercase().replace('v', "ü");
    let (base, tone) = split_tone(&lower);
    if base.is_empty() {
        return None;
    }

    let body = if let Some(z) = lookup(Y_W_SYLLABLES, base) {
        z.to_string()
    } else if let Some((init, init_z)) = INITIALS
        .iter()
        .find(|(init, _)| base.starts_with(init))
        .copied()
    {
        let fin = &base[init.len()..];
        let fin_z = match (init, fin) {
            // zhi chi shi ri zi ci si: the initial stands alone
            ("zh" | "ch" | "sh" | "r" | "z" | "c" | "s", "i") => "",
            // ju qu xu: u is written ü
            ("j" | "q" | "x", f) if f.starts_with('u') => {
                let fronted = f.replacen('u', "ü", 1);
                lookup(FINALS, &fronted)?
            }
            (_, "") => return None,
            (_, f) => lookup(FINALS, f)?,
        };
        format!("{init_z}{fin_z}")
    } else {
        lookup(FINALS, base)?.to_string()
    };

    Some(if tone == 5 {
        format!("˙{body}")
    } else {
        format!("{body}{}", tone_mark(tone))
    })
}

/// Symbol-wise Zhuyin -> pinyin spelling with a trailing tone digit.
///
/// Each symbol maps to its pinyin letters; a tone mark becomes the digit
/// appended at the end (`ˉ` 1, `ˊ` 2, `ˇ` 3, `ˋ` 4) and `˙` is dropped.
/// Spelling rules such as `ㄧㄚ` -> `ya` are not applied, so the result is
/// a phonetic key rather than orthographic pinyin. Other characters pass
/// through.
pub fn zhuyin_to_pinyin(zhuyin: &str) -> String {
    let mut out = String::new();
    let mut tone = None;
    for c in zhuyin.chars() {
        match c {
            'ˉ' => tone = Some('1'),
            'ˊ' => tone = Some('2'),
            'ˇ' => tone = Some('3'),
            'ˋ' => tone = Some('4'),
            '˙' => {}
            _ => match zhuyin_symbol(c) {
                Some(p) => out.push_str(p),
                None => out.push(c),
            },
        }
    }
    if let Some(t) = tone {
        out.push(t);
    }
    out
}

fn zhuyin_symbol(c: char) -> Option<&'static str> {
    let p = match c {
        'ㄅ' => "b",
        'ㄆ' => "p",
        'ㄇ' => "m",
        'ㄈ' => "f",
        'ㄉ' => "d",
        'ㄊ' => "t",
        'ㄋ' => "n",
        'ㄌ' => "l",
        'ㄍ' => "g",
        'ㄎ' => "k",
        'ㄏ' => "h",
        'ㄐ' => "j",
        'ㄑ' => "q",
        'ㄒ' => "x",
        'ㄓ' => "zh",
        'ㄔ' => "ch",
        'ㄕ' => "sh",
        'ㄖ' => "r",
        'ㄗ' => "z",
        'ㄘ' => "c",
        'ㄙ' => "s",
        'ㄚ' => "a",
        'ㄛ' => "o",
        'ㄜ' => "e",
        'ㄝ' => "ê",
        'ㄞ' => "ai",
        'ㄟ' => "ei",
        'ㄠ' => "ao",
        'ㄡ' => "ou",
        'ㄢ' => "an",
        'ㄣ' => "en",
        'ㄤ' => "ang",
        'ㄥ' => "eng",
        'ㄦ' => "er",
        'ㄧ' => "i",
        'ㄨ' => "u",
        'ㄩ' => "ü",
        _ => return None,
    };
    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_plus_final() {
        assert_eq!(pinyin_to_zhuyin("zhong1").as_deref(), Some("ㄓㄨㄥ"));
        assert_eq!(pinyin_to_zhuyin("da2").as_deref(), Some("ㄉㄚˊ"));
        assert_eq!(pinyin_to_zhuyin("luo2").as_deref(), Some("ㄌㄨㄛˊ"));
        assert_eq!(pinyin_to_zhuyin("he1").as_deref(), Some("ㄏㄜ"));
    }

    #[test]
    fn zero_initial() {
        assert_eq!(pinyin_to_zhuyin("a1").as_deref(), Some("ㄚ"));
        assert_eq!(pinyin_to_zhuyin("an4").as_deref(), Some("ㄢˋ"));
        assert_eq!(pinyin_to_zhuyin("er2").as_deref(), Some("ㄦˊ"));
    }

    #[test]
    fn y_and_w_onsets() {
        assert_eq!(pinyin_to_zhuyin("ye1").as_deref(), Some("ㄧㄝ"));
        assert_eq!(pinyin_to_zhuyin("yuan2").as_deref(), Some("ㄩㄢˊ"));
        assert_eq!(pinyin_to_zhuyin("wo3").as_deref(), Some("ㄨㄛˇ"));
    }

    #[test]
    fn apical_and_fronted_finals() {
        assert_eq!(pinyin_to_zhuyin("shi4").as_deref(), Some("ㄕˋ"));
        assert_eq!(pinyin_to_zhuyin("si1").as_deref(), Some("ㄙ"));
        assert_eq!(pinyin_to_zhuyin("ju4").as_deref(), Some("ㄐㄩˋ"));
        assert_eq!(pinyin_to_zhuyin("xue2").as_deref(), Some("ㄒㄩㄝˊ"));
        assert_eq!(pinyin_to_zhuyin("lü4").as_deref(), Some("ㄌㄩˋ"));
        assert_eq!(pinyin_to_zhuyin("lv4").as_deref(), Some("ㄌㄩˋ"));
    }

    #[test]
    fn neutral_tone() {
        assert_eq!(pinyin_to_zhuyin("ma").as_deref(), Some("˙ㄇㄚ"));
        assert_eq!(pinyin_to_zhuyin("ma5").as_deref(), Some("˙ㄇㄚ"));
    }

    #[test]
    fn not_a_syllable() {
        assert_eq!(pinyin_to_zhuyin(""), None);
        assert_eq!(pinyin_to_zhuyin("zh1"), None);
        assert_eq!(pinyin_to_zhuyin("qqq"), None);
    }

    #[test]
    fn zhuyin_to_pinyin_symbolwise() {
        assert_eq!(zhuyin_to_pinyin("ㄉㄚˊ"), "da2");
        assert_eq!(zhuyin_to_pinyin("ㄚˉ"), "a1");
        assert_eq!(zhuyin_to_pinyin("ㄌㄨㄛ"), "luo");
        assert_eq!(zhuyin_to_pinyin("˙ㄇㄚ"), "ma");
        assert_eq!(zhuyin_to_pinyin("ㄥˋ"), "eng4");
    }

    #[test]
    fn zhuyin_to_pinyin_passes_unknown() {
        assert_eq!(zhuyin_to_pinyin("？"), "？");
    }
}
