// src/core/html.rs
//! Raw markup event walk: one pass over the document, yielding open/close/text
//! events in order. Not a general HTML parser — just enough discipline for the
//! pages we read: quote-aware openers, void elements, script/style bodies
//! swallowed raw, comments and doctype skipped.

use super::sanitize::normalize_entities;

/// Ordered (name, value) attribute pairs from one opener.
pub type Attrs = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    Open {
        tag: String,
        attrs: Attrs,
        /// `<br/>` style openers and void elements; these never close.
        self_closing: bool,
    },
    Close {
        tag: String,
    },
    Text(&'a str),
}

/// Elements that never take a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

/// Case-insensitive substring search from `from`.
fn find_ci(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let h = hay.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from >= h.len() || h.len() - from < n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

fn find_byte(hay: &[u8], b: u8, from: usize) -> Option<usize> {
    hay.get(from..)?.iter().position(|&c| c == b).map(|off| from + off)
}

/// `<` starts markup only when followed by a letter, '/', '!' or '?';
/// anything else is literal text.
fn is_markup_start(bytes: &[u8], lt: usize) -> bool {
    match bytes.get(lt + 1) {
        Some(c) => c.is_ascii_alphabetic() || *c == b'/' || *c == b'!' || *c == b'?',
        None => false,
    }
}

pub struct Tokenizer<'a> {
    doc: &'a str,
    pos: usize,
    /// Set after a `<script>`/`<style>` opener: contents are raw text
    /// (may contain stray `<`) until this close tag.
    raw_until: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(doc: &'a str) -> Self {
        Self { doc, pos: 0, raw_until: None }
    }

    fn skip_past(&mut self, b: u8) {
        let bytes = self.doc.as_bytes();
        self.pos = match find_byte(bytes, b, self.pos) {
            Some(p) => p + 1,
            None => self.doc.len(),
        };
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            let bytes = self.doc.as_bytes();
            let n = bytes.len();
            if self.pos >= n {
                return None;
            }

            // Inside <script>/<style>: jump straight to the close tag.
            if let Some(close) = self.raw_until.take() {
                match find_ci(self.doc, close, self.pos) {
                    Some(idx) => {
                        self.pos = match find_byte(bytes, b'>', idx + close.len()) {
                            Some(g) => g + 1,
                            None => n,
                        };
                        return Some(Event::Close { tag: s!(&close[2..]) });
                    }
                    None => {
                        self.pos = n;
                        return None;
                    }
                }
            }

            // Text run (including any stray '<' that isn't markup).
            if bytes[self.pos] != b'<' || !is_markup_start(bytes, self.pos) {
                let start = self.pos;
                let mut j = start + 1;
                loop {
                    match find_byte(bytes, b'<', j) {
                        Some(lt) if is_markup_start(bytes, lt) => { j = lt; break; }
                        Some(lt) => j = lt + 1,
                        None => { j = n; break; }
                    }
                }
                self.pos = j;
                let text = &self.doc[start..j];
                if text.trim().is_empty() {
                    continue; // indentation noise between tags
                }
                return Some(Event::Text(text));
            }

            // Markup.
            match bytes[self.pos + 1] {
                b'!' => {
                    if self.doc[self.pos..].starts_with("<!--") {
                        self.pos = match find_ci(self.doc, "-->", self.pos + 4) {
                            Some(e) => e + 3,
                            None => n,
                        };
                    } else {
                        self.skip_past(b'>'); // doctype and friends
                    }
                }
                b'?' => self.skip_past(b'>'),
                b'/' => {
                    let name_start = self.pos + 2;
                    let Some(gt) = find_byte(bytes, b'>', name_start) else {
                        self.pos = n;
                        continue;
                    };
                    let tag = self.doc[name_start..gt].trim().to_ascii_lowercase();
                    self.pos = gt + 1;
                    return Some(Event::Close { tag });
                }
                _ => {
                    // Open tag: scan for the closing '>' outside quotes
                    // (attribute values may contain '>').
                    let mut j = self.pos + 1;
                    let mut quote: Option<u8> = None;
                    let mut gt = None;
                    while j < n {
                        let b = bytes[j];
                        match quote {
                            Some(q) => {
                                if b == q { quote = None; }
                            }
                            None => match b {
                                b'"' | b'\'' => quote = Some(b),
                                b'>' => { gt = Some(j); break; }
                                _ => {}
                            },
                        }
                        j += 1;
                    }
                    let Some(gt) = gt else {
                        self.pos = n; // truncated opener
                        continue;
                    };

                    let opener = self.doc[self.pos + 1..gt].trim_end();
                    self.pos = gt + 1;

                    let (body, slash) = match opener.strip_suffix('/') {
                        Some(rest) => (rest.trim_end(), true),
                        None => (opener, false),
                    };
                    let name_end = body
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(body.len());
                    let tag = body[..name_end].to_ascii_lowercase();
                    let attrs = parse_attrs(&body[name_end..]);
                    let self_closing = slash || VOID_TAGS.contains(&tag.as_str());

                    if !self_closing {
                        if tag == "script" {
                            self.raw_until = Some("</script");
                        } else if tag == "style" {
                            self.raw_until = Some("</style");
                        }
                    }

                    return Some(Event::Open { tag, attrs, self_closing });
                }
            }
        }
    }
}

/// Attribute scan over the opener body after the tag name.
/// Tolerates double quotes, single quotes, unquoted values and bare names.
fn parse_attrs(s: &str) -> Attrs {
    let bytes = s.as_bytes();
    let n = bytes.len();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < n {
        while i < n && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= n {
            break;
        }

        let name_start = i;
        while i < n && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = s[name_start..i].to_ascii_lowercase();
        if name.is_empty() {
            i += 1;
            continue;
        }

        while i < n && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= n || bytes[i] != b'=' {
            out.push((name, s!())); // bare attribute, e.g. "disabled"
            continue;
        }
        i += 1;
        while i < n && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = if i < n && (bytes[i] == b'"' || bytes[i] == b'\'') {
            let q = bytes[i];
            i += 1;
            let vs = i;
            while i < n && bytes[i] != q {
                i += 1;
            }
            let v = &s[vs..i];
            if i < n {
                i += 1;
            }
            v
        } else {
            let vs = i;
            while i < n && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            &s[vs..i]
        };
        out.push((name, normalize_entities(value)));
    }

    out
}
