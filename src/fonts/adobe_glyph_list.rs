//! Adobe Glyph List: standard PostScript glyph names mapped to Unicode.
//!
//! PDF Spec: ISO 32000-1:2008, Annex D. Used to resolve `/Differences`
//! array names and as a CID -> GID -> glyph-name -> Unicode fallback for
//! fonts without a ToUnicode CMap. This is a practical subset covering
//! the StandardEncoding/WinAnsiEncoding/MacRomanEncoding glyph names plus
//! common Latin-1 accented letters, punctuation and ligatures, rather than
//! the full ~4,300-entry AGL 2.0 table.

use phf::phf_map;

pub(crate) static ADOBE_GLYPH_LIST: phf::Map<&'static str, char> = phf_map! {
    "space" => ' ',
    "exclam" => '!',
    "quotedbl" => '"',
    "numbersign" => '#',
    "dollar" => '$',
    "percent" => '%',
    "ampersand" => '&',
    "quotesingle" => '\'',
    "parenleft" => '(',
    "parenright" => ')',
    "asterisk" => '*',
    "plus" => '+',
    "comma" => ',',
    "hyphen" => '-',
    "period" => '.',
    "slash" => '/',
    "zero" => '0',
    "one" => '1',
    "two" => '2',
    "three" => '3',
    "four" => '4',
    "five" => '5',
    "six" => '6',
    "seven" => '7',
    "eight" => '8',
    "nine" => '9',
    "colon" => ':',
    "semicolon" => ';',
    "less" => '<',
    "equal" => '=',
    "greater" => '>',
    "question" => '?',
    "at" => '@',
    "A" => 'A', "B" => 'B', "C" => 'C', "D" => 'D', "E" => 'E',
    "F" => 'F', "G" => 'G', "H" => 'H', "I" => 'I', "J" => 'J',
    "K" => 'K', "L" => 'L', "M" => 'M', "N" => 'N', "O" => 'O',
    "P" => 'P', "Q" => 'Q', "R" => 'R', "S" => 'S', "T" => 'T',
    "U" => 'U', "V" => 'V', "W" => 'W', "X" => 'X', "Y" => 'Y',
    "Z" => 'Z',
    "bracketleft" => '[',
    "backslash" => '\\',
    "bracketright" => ']',
    "asciicircum" => '^',
    "underscore" => '_',
    "grave" => '`',
    "a" => 'a', "b" => 'b', "c" => 'c', "d" => 'd', "e" => 'e',
    "f" => 'f', "g" => 'g', "h" => 'h', "i" => 'i', "j" => 'j',
    "k" => 'k', "l" => 'l', "m" => 'm', "n" => 'n', "o" => 'o',
    "p" => 'p', "q" => 'q', "r" => 'r', "s" => 's', "t" => 't',
    "u" => 'u', "v" => 'v', "w" => 'w', "x" => 'x', "y" => 'y',
    "z" => 'z',
    "braceleft" => '{',
    "bar" => '|',
    "braceright" => '}',
    "asciitilde" => '~',
    "exclamdown" => '¡',
    "cent" => '¢',
    "sterling" => '£',
    "currency" => '¤',
    "yen" => '¥',
    "brokenbar" => '¦',
    "section" => '§',
    "dieresis" => '¨',
    "copyright" => '©',
    "ordfeminine" => 'ª',
    "guillemotleft" => '«',
    "logicalnot" => '¬',
    "registered" => '®',
    "macron" => '¯',
    "degree" => '°',
    "plusminus" => '±',
    "twosuperior" => '²',
    "threesuperior" => '³',
    "acute" => '´',
    "mu" => 'µ',
    "paragraph" => '¶',
    "periodcentered" => '·',
    "cedilla" => '¸',
    "onesuperior" => '¹',
    "ordmasculine" => 'º',
    "guillemotright" => '»',
    "onequarter" => '¼',
    "onehalf" => '½',
    "threequarters" => '¾',
    "questiondown" => '¿',
    "Agrave" => 'À',
    "Aacute" => 'Á',
    "Acircumflex" => 'Â',
    "Atilde" => 'Ã',
    "Adieresis" => 'Ä',
    "Aring" => 'Å',
    "AE" => 'Æ',
    "Ccedilla" => 'Ç',
    "Egrave" => 'È',
    "Eacute" => 'É',
    "Ecircumflex" => 'Ê',
    "Edieresis" => 'Ë',
    "Igrave" => 'Ì',
    "Iacute" => 'Í',
    "Icircumflex" => 'Î',
    "Idieresis" => 'Ï',
    "Eth" => 'Ð',
    "Ntilde" => 'Ñ',
    "Ograve" => 'Ò',
    "Oacute" => 'Ó',
    "Ocircumflex" => 'Ô',
    "Otilde" => 'Õ',
    "Odieresis" => 'Ö',
    "multiply" => '×',
    "Oslash" => 'Ø',
    "Ugrave" => 'Ù',
    "Uacute" => 'Ú',
    "Ucircumflex" => 'Û',
    "Udieresis" => 'Ü',
    "Yacute" => 'Ý',
    "Thorn" => 'Þ',
    "germandbls" => 'ß',
    "agrave" => 'à',
    "aacute" => 'á',
    "acircumflex" => 'â',
    "atilde" => 'ã',
    "adieresis" => 'ä',
    "aring" => 'å',
    "ae" => 'æ',
    "ccedilla" => 'ç',
    "egrave" => 'è',
    "eacute" => 'é',
    "ecircumflex" => 'ê',
    "edieresis" => 'ë',
    "igrave" => 'ì',
    "iacute" => 'í',
    "icircumflex" => 'î',
    "idieresis" => 'ï',
    "eth" => 'ð',
    "ntilde" => 'ñ',
    "ograve" => 'ò',
    "oacute" => 'ó',
    "ocircumflex" => 'ô',
    "otilde" => 'õ',
    "odieresis" => 'ö',
    "divide" => '÷',
    "oslash" => 'ø',
    "ugrave" => 'ù',
    "uacute" => 'ú',
    "ucircumflex" => 'û',
    "udieresis" => 'ü',
    "yacute" => 'ý',
    "thorn" => 'þ',
    "ydieresis" => 'ÿ',
    "Amacron" => 'Ā',
    "amacron" => 'ā',
    "Abreve" => 'Ă',
    "abreve" => 'ă',
    "Aogonek" => 'Ą',
    "aogonek" => 'ą',
    "Cacute" => 'Ć',
    "cacute" => 'ć',
    "Ccaron" => 'Č',
    "ccaron" => 'č',
    "Dcaron" => 'Ď',
    "dcaron" => 'ď',
    "Dcroat" => 'Đ',
    "dcroat" => 'đ',
    "Emacron" => 'Ē',
    "emacron" => 'ē',
    "Eogonek" => 'Ę',
    "eogonek" => 'ę',
    "Ecaron" => 'Ě',
    "ecaron" => 'ě',
    "Lacute" => 'Ĺ',
    "lacute" => 'ĺ',
    "Lcaron" => 'Ľ',
    "lcaron" => 'ľ',
    "Lslash" => 'Ł',
    "lslash" => 'ł',
    "Nacute" => 'Ń',
    "nacute" => 'ń',
    "Ncaron" => 'Ň',
    "ncaron" => 'ň',
    "Omacron" => 'Ō',
    "omacron" => 'ō',
    "Racute" => 'Ŕ',
    "racute" => 'ŕ',
    "Rcaron" => 'Ř',
    "rcaron" => 'ř',
    "Sacute" => 'Ś',
    "sacute" => 'ś',
    "Scedilla" => 'Ş',
    "scedilla" => 'ş',
    "Scaron" => 'Š',
    "scaron" => 'š',
    "Tcaron" => 'Ť',
    "tcaron" => 'ť',
    "Umacron" => 'Ū',
    "umacron" => 'ū',
    "Uring" => 'Ů',
    "uring" => 'ů',
    "Uhungarumlaut" => 'Ű',
    "uhungarumlaut" => 'ű',
    "Uogonek" => 'Ų',
    "uogonek" => 'ų',
    "Zacute" => 'Ź',
    "zacute" => 'ź',
    "Zdotaccent" => 'Ż',
    "zdotaccent" => 'ż',
    "Zcaron" => 'Ž',
    "zcaron" => 'ž',
    "florin" => 'ƒ',
    "euro" => '€',
    "circumflex" => 'ˆ',
    "OE" => 'Œ',
    "oe" => 'œ',
    "middot" => '·',
    "breve" => '˘',
    "dotaccent" => '˙',
    "ring" => '˚',
    "ogonek" => '˛',
    "tilde" => '˜',
    "hungarumlaut" => '˝',
    "Gamma" => 'Γ',
    "Delta" => 'Δ',
    "Theta" => 'Θ',
    "Lambda" => 'Λ',
    "Xi" => 'Ξ',
    "Pi" => 'Π',
    "Sigma" => 'Σ',
    "Phi" => 'Φ',
    "Psi" => 'Ψ',
    "Omega" => 'Ω',
    "alpha" => 'α',
    "beta" => 'β',
    "gamma" => 'γ',
    "delta" => 'δ',
    "epsilon" => 'ε',
    "zeta" => 'ζ',
    "eta" => 'η',
    "theta" => 'θ',
    "iota" => 'ι',
    "kappa" => 'κ',
    "lambda" => 'λ',
    "pi" => 'π',
    "rho" => 'ρ',
    "sigma" => 'σ',
    "tau" => 'τ',
    "phi" => 'φ',
    "chi" => 'χ',
    "psi" => 'ψ',
    "omega" => 'ω',
    "endash" => '–',
    "emdash" => '—',
    "quoteleft" => '\u{2018}',
    "quoteright" => '\u{2019}',
    "quotesinglbase" => '\u{201A}',
    "quotedblleft" => '\u{201C}',
    "quotedblright" => '\u{201D}',
    "quotedblbase" => '\u{201E}',
    "dagger" => '†',
    "daggerdbl" => '‡',
    "bullet" => '•',
    "ellipsis" => '…',
    "perthousand" => '‰',
    "guilsinglleft" => '‹',
    "guilsinglright" => '›',
    "fraction" => '⁄',
    "Euro" => '€',
    "trademark" => '™',
    "minus" => '−',
    "fi" => 'ﬁ',
    "fl" => 'ﬂ',
    "ff" => 'ﬀ',
    "ffi" => 'ﬃ',
    "ffl" => 'ﬄ',
    "nbspace" => '\u{00A0}',
    "apple" => '\u{F8FF}',
};
