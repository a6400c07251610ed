//! Diacritic folding.
//!
//! Maps accented Latin letters to their base ASCII letter or digraph so that
//! case-insensitive searches typed without accents still match accented
//! labels. Implemented as a static lookup over code points; no regexes and no
//! allocation beyond the output string.

/// Fold the accented characters of `text` to their ASCII base form.
///
/// Characters without a fold pass through unchanged, so the result is only
/// useful for matching, not for display.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        match fold_char(ch) {
            Some(base) => folded.push_str(base),
            None => folded.push(ch),
        }
    }
    folded
}

/// The ASCII fold for a single character, if it has one.
///
/// Folds are lowercase; matching through this table only ever happens
/// case-insensitively.
pub fn fold_char(ch: char) -> Option<&'static str> {
    let base = match ch {
        'à' | 'á' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' | 'À' | 'Á' | 'Â' | 'Ã' | 'Å' | 'Ā'
        | 'Ă' | 'Ą' => "a",
        'ä' | 'Ä' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' | 'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "c",
        'ď' | 'đ' | 'ð' | 'Ď' | 'Đ' | 'Ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' | 'È' | 'É' | 'Ê' | 'Ë' | 'Ē'
        | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' | 'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "g",
        'ĥ' | 'ħ' | 'Ĥ' | 'Ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' | 'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ'
        | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "i",
        'ĵ' | 'Ĵ' => "j",
        'ķ' | 'Ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' | 'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' | 'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ'
        | 'Ő' | 'Ø' => "o",
        'ö' | 'Ö' => "oe",
        'œ' | 'Œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' | 'Ŕ' | 'Ŗ' | 'Ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' | 'Ś' | 'Ŝ' | 'Ş' | 'Š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' | 'Ţ' | 'Ť' | 'Ŧ' => "t",
        'þ' | 'Þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' | 'Ù' | 'Ú' | 'Û' | 'Ü'
        | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "u",
        'ŵ' | 'Ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' | 'Ý' | 'Ÿ' | 'Ŷ' => "y",
        'ź' | 'ż' | 'ž' | 'Ź' | 'Ż' | 'Ž' => "z",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(fold("Banana"), "Banana");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_base_letter_folds() {
        assert_eq!(fold("München"), "Munchen");
        assert_eq!(fold("café"), "cafe");
        assert_eq!(fold("Señor"), "Senor");
        // Folds are lowercase; the unfolded characters keep their case.
        assert_eq!(fold("Łódź"), "lodz");
    }

    #[test]
    fn test_digraph_folds() {
        assert_eq!(fold("straße"), "strasse");
        assert_eq!(fold("Köln"), "Koeln");
        assert_eq!(fold("Ærø"), "aero");
    }

    #[test]
    fn test_fold_char() {
        assert_eq!(fold_char('é'), Some("e"));
        assert_eq!(fold_char('ß'), Some("ss"));
        assert_eq!(fold_char('x'), None);
        assert_eq!(fold_char('漢'), None);
    }
}
