use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Letters that carry no canonical decomposition but have an obvious ASCII spelling.
fn transliterate(c: char) -> Option<&'static str> {
    Some(match c {
        'ø' => "o",
        'Ø' => "O",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ß' => "ss",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ħ' => "h",
        'Ħ' => "H",
        'ŧ' => "t",
        'Ŧ' => "T",
        _ => return None,
    })
}

/// Fold text to ASCII for the smart-lookup heuristic.
///
/// Compatibility-decomposes the input, drops combining marks, transliterates
/// the letters listed above and removes every remaining non-ASCII code point.
///
/// ```rust
/// use crudcrate_unaccent::filtering::fold;
///
/// assert_eq!(fold("Ééüçñøà"), "Eeucnoa");
/// ```
#[must_use]
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii() {
            folded.push(c);
        } else if let Some(ascii) = transliterate(c) {
            folded.push_str(ascii);
        }
    }
    folded
}

/// Whether `text` holds anything [`fold`] would change: diacritics, ligatures,
/// or characters without an ASCII spelling.
#[must_use]
pub fn has_non_ascii_content(text: &str) -> bool {
    !text.is_ascii() && fold(text) != text
}
