//! MetaPost reserved words.
//!
//! Two immutable tables decide the style of a completed word: keywords
//! (macros and primitives that shape control flow or drawing) and datatypes
//! (the declarable variable types). Both are sorted so lookups can use
//! `binary_search`; a test guards the ordering.

/// Keywords, sorted.
pub const KEYWORDS: &[&str] = &[
    "beginfig",
    "begingroup",
    "btex",
    "cycle",
    "dashed",
    "def",
    "dir",
    "draw",
    "drawarrow",
    "drawdblarrow",
    "else",
    "elseif",
    "end",
    "enddef",
    "endfig",
    "endfor",
    "endgroup",
    "etex",
    "evenly",
    "exitif",
    "exitunless",
    "fi",
    "fill",
    "filldraw",
    "for",
    "forever",
    "forsuffixes",
    "fullcircle",
    "if",
    "label",
    "pencircle",
    "pickup",
    "reflectedabout",
    "reverse",
    "rotated",
    "rotatedaround",
    "save",
    "scaled",
    "shifted",
    "step",
    "transformed",
    "undraw",
    "unfill",
    "unfilldraw",
    "unitsquare",
    "until",
    "upto",
    "vardef",
    "verbatimtex",
    "withcolor",
    "withdots",
    "withpen",
    "xscaled",
    "yscaled",
];

/// Datatypes, sorted.
pub const DATATYPES: &[&str] = &[
    "boolean",
    "cmykcolor",
    "color",
    "numeric",
    "pair",
    "path",
    "pen",
    "picture",
    "rgbcolor",
    "string",
    "transform",
];

/// Whether `word` is a MetaPost keyword.
#[inline]
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// Whether `word` is a MetaPost datatype.
#[inline]
#[must_use]
pub fn is_datatype(word: &str) -> bool {
    DATATYPES.binary_search(&word).is_ok()
}
