// Hiragana (primary syllabary) table, gojuon order.
use super::{KanaTable, ROMAJI};

pub static HIRAGANA: KanaTable = KanaTable {
    name: "hiragana",
    kana: &[
        "あ", "い", "う", "え", "お",
        "か", "き", "く", "け", "こ",
        "さ", "し", "す", "せ", "そ",
        "た", "ち", "つ", "て", "と",
        "な", "に", "ぬ", "ね", "の",
        "は", "ひ", "ふ", "へ", "ほ",
        "ま", "み", "む", "め", "も",
        "や", "ゆ", "よ",
        "ら", "り", "る", "れ", "ろ",
        "わ", "を", "ん",
    ],
    romaji: &ROMAJI,
};
