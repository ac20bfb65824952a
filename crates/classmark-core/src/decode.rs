use std::collections::HashMap;

use ammonia::Builder;
use once_cell::sync::Lazy;

use crate::options::Decoder;

static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{a0}'),
    ])
});

/// Longest reference body we try to resolve, e.g. `#x10FFFF`.
const MAX_REFERENCE_LEN: usize = 8;

/// Turns escaped markup back into authored text so control tokens such as
/// `[TABLE]` or `Q:` are recognized by the later stages.
pub fn decode(text: &str, decoder: Decoder) -> String {
    match decoder {
        Decoder::TextContent => text_content(text),
        Decoder::EntityTable => decode_entities(text),
    }
}

/// Parses `text` as an HTML fragment and returns its text content: tags are
/// dropped, their children kept, and character references resolved.
fn text_content(text: &str) -> String {
    // Nothing to parse: skip the HTML5 round trip.
    if !text.contains(['<', '&']) {
        return text.to_string();
    }
    let serialized = Builder::empty().clean(text).to_string();
    decode_entities(&serialized)
}

/// Single-pass decoding of named and numeric character references. Unknown
/// references are left as written.
pub(crate) fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match resolve_reference(after) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolves the reference starting right after a `&`. Returns the character
/// and the number of bytes consumed including the closing `;`.
fn resolve_reference(after_amp: &str) -> Option<(char, usize)> {
    let semi = after_amp
        .char_indices()
        .take(MAX_REFERENCE_LEN + 1)
        .find(|(_, ch)| *ch == ';')
        .map(|(idx, _)| idx)?;
    let name = &after_amp[..semi];
    let ch = if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        *NAMED_ENTITIES.get(name)?
    };
    Some((ch, semi + 1))
}
