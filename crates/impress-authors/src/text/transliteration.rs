//! Cyrillic to Latin transliteration
//!
//! Russian letters follow the GOST-like table used by the registry's
//! Estonian-language sources (`ю` → `ju`, `я` → `ja`, `х` → `h`), with the
//! Ukrainian and Belarusian extras added. Soft and hard signs are dropped
//! before mapping so no apostrophes end up in names.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CYRILLIC: Regex = Regex::new(r"\p{Cyrillic}").unwrap();

    /// Two-letter capitalized fragments left behind by transliterated
    /// initials: "Systra, Ju.J" → "Systra, J.J"
    static ref TWO_LETTER_FRAGMENT: Regex = Regex::new(r"\b(\p{Lu})\p{L}\b").unwrap();

    static ref CYRILLIC_TO_LATIN: HashMap<char, &'static str> = {
        let pairs: [(char, &str); 74] = [
            ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"),
            ('е', "e"), ('ё', "e"), ('ж', "zh"), ('з', "z"), ('и', "i"),
            ('й', "j"), ('к', "k"), ('л', "l"), ('м', "m"), ('н', "n"),
            ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"),
            ('у', "u"), ('ф', "f"), ('х', "h"), ('ц', "ts"), ('ч', "ch"),
            ('ш', "sh"), ('щ', "sch"), ('ы', "y"), ('э', "e"), ('ю', "ju"),
            ('я', "ja"), ('і', "i"), ('ї', "ji"), ('є', "je"), ('ґ', "g"),
            ('ў', "u"), ('ъ', ""),
            ('А', "A"), ('Б', "B"), ('В', "V"), ('Г', "G"), ('Д', "D"),
            ('Е', "E"), ('Ё', "E"), ('Ж', "Zh"), ('З', "Z"), ('И', "I"),
            ('Й', "J"), ('К', "K"), ('Л', "L"), ('М', "M"), ('Н', "N"),
            ('О', "O"), ('П', "P"), ('Р', "R"), ('С', "S"), ('Т', "T"),
            ('У', "U"), ('Ф', "F"), ('Х', "H"), ('Ц', "Ts"), ('Ч', "Ch"),
            ('Ш', "Sh"), ('Щ', "Sch"), ('Ы', "Y"), ('Э', "E"), ('Ю', "Ju"),
            ('Я', "Ja"), ('І', "I"), ('Ї', "Ji"), ('Є', "Je"), ('Ґ', "G"),
            ('Ў', "U"), ('Ъ', ""),
        ];
        pairs.into_iter().collect()
    };
}

/// True if the string contains any character of the Cyrillic script
pub fn contains_cyrillic(s: &str) -> bool {
    CYRILLIC.is_match(s)
}

/// Transliterate a string to Latin script.
///
/// Strings without Cyrillic characters are returned unchanged.
pub fn latinize(s: &str) -> String {
    if !contains_cyrillic(s) {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            'ь' | 'Ь' | 'ъ' | 'Ъ' => {}
            _ => match CYRILLIC_TO_LATIN.get(&c) {
                Some(latin) => result.push_str(latin),
                None => result.push(c),
            },
        }
    }

    let result = result.replace(['\'', '’'], "");
    TWO_LETTER_FRAGMENT.replace_all(&result, "$1").into_owned()
}
