//! URL fragment codec.
//!
//! The shareable state lives in one slot of a query-string-shaped fragment,
//! e.g. `#theme=dark&config=...`. Other slots belong to someone else and
//! are carried through untouched.
//!
//! The slot value is the config JSON percent-encoded with the
//! `encodeURIComponent` set, and the fragment as a whole is then
//! form-urlencoded. The value is therefore escaped twice, which is also
//! what links produced by the web viewer look like, so those keep
//! loading.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::{BoxSpec, CodecError, Config, CONFIG_VERSION};

/// Fragment key owned by the codec.
pub const CONFIG_KEY: &str = "config";

/// Characters escaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters escaped by `application/x-www-form-urlencoded` (space is
/// handled separately as `+`).
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

#[derive(Serialize)]
struct ConfigRef<'a> {
    version: u32,
    objects: &'a [BoxSpec],
}

/// Encode `objects` as the value of the config slot.
pub fn encode(objects: &[BoxSpec]) -> Result<String, CodecError> {
    let json = serde_json::to_string(&ConfigRef {
        version: CONFIG_VERSION,
        objects,
    })?;
    Ok(utf8_percent_encode(&json, COMPONENT).to_string())
}

/// Decode a config slot value produced by [`encode`].
pub fn decode(value: &str) -> Result<Vec<BoxSpec>, CodecError> {
    let json = percent_decode_str(value).decode_utf8()?;
    Ok(Config::from_json(&json)?.objects)
}

/// Read the boxes stored in `hash`.
///
/// Returns `None` when the slot is absent or empty, and also when it is
/// malformed; in the latter case the problem is logged and the caller keeps
/// its current state.
pub fn read_config(hash: &str) -> Option<Vec<BoxSpec>> {
    let fragment = Fragment::parse(hash);
    let value = fragment.get(CONFIG_KEY).filter(|v| !v.is_empty())?;
    match decode(value) {
        Ok(objects) => Some(objects),
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed config in URL fragment");
            None
        }
    }
}

/// Store `objects` in the config slot of `hash`, keeping every other slot.
///
/// The returned string has no leading `#`.
pub fn write_config(hash: &str, objects: &[BoxSpec]) -> Result<String, CodecError> {
    let mut fragment = Fragment::parse(hash);
    fragment.set(CONFIG_KEY, encode(objects)?);
    Ok(fragment.to_string())
}

/// Ordered key/value pairs of a query-string-shaped fragment.
///
/// Keys and values are held decoded; [`fmt::Display`] re-encodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pairs: Vec<(String, String)>,
}

impl Fragment {
    /// Parse a fragment, with or without its leading `#`.
    pub fn parse(hash: &str) -> Self {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        let pairs = hash
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (form_decode(key), form_decode(value))
            })
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`.
    ///
    /// The first existing pair keeps its position and later duplicates are
    /// dropped; a new key is appended.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Remove every pair stored under `key`. Returns whether any existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() != before
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the fragment has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", form_encode(key), form_encode(value))?;
        }
        Ok(())
    }
}

fn form_encode(s: &str) -> String {
    s.split(' ')
        .map(|word| utf8_percent_encode(word, FORM).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn form_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BoxSpec> {
        vec![
            BoxSpec::new("Fridge", 0.7, 1.8, 0.65, "#cccccc").with_id("1712345678901"),
            BoxSpec::new("Shelf", 0.4, 2.1, 0.3, "#8b4513").with_id("1712345678902"),
        ]
    }

    #[test]
    fn roundtrip_empty() {
        let value = encode(&[]).unwrap();
        assert_eq!(decode(&value).unwrap(), Vec::<BoxSpec>::new());
    }

    #[test]
    fn roundtrip_single() {
        let objects = vec![BoxSpec::new("Box", 1.0, 1.0, 1.0, "#00ff00").with_id("a")];
        assert_eq!(decode(&encode(&objects).unwrap()).unwrap(), objects);
    }

    #[test]
    fn roundtrip_preserves_order() {
        let mut objects = sample();
        objects.reverse();
        assert_eq!(decode(&encode(&objects).unwrap()).unwrap(), objects);
    }

    #[test]
    fn roundtrip_escaped_and_unicode_text() {
        let objects = vec![
            BoxSpec::new("Sofa & Chair = 100% #1 + \"quoted\"", 2.0, 0.9, 1.0, "rgb(1, 2, 3)")
                .with_id("id with spaces&=?"),
            BoxSpec::new("冷蔵庫 🧊\nsecond line", 0.1, 0.2, 0.3, "#ABCDEF").with_id("ü"),
            BoxSpec::new("", 1e-9, 12345.678901234567, 0.0, "").with_id(""),
        ];
        let value = encode(&objects).unwrap();
        assert!(!value.contains(' '));
        assert!(!value.contains('&'));
        assert!(!value.contains('#'));
        assert_eq!(decode(&value).unwrap(), objects);

        let hash = write_config("", &objects).unwrap();
        assert_eq!(read_config(&hash).unwrap(), objects);
    }

    #[test]
    fn roundtrip_awkward_floats() {
        let objects = vec![BoxSpec::new("f", 0.1 + 0.2, 1.0 / 3.0, f64::MIN_POSITIVE, "c")];
        assert_eq!(decode(&encode(&objects).unwrap()).unwrap(), objects);
    }

    #[test]
    fn reads_legacy_fragment() {
        // written by the web viewer: no version field, integer dimensions
        let hash = "#config=%257B%2522objects%2522%253A%255B%257B%2522id%2522%253A%25221712345678901%2522%252C%2522name%2522%253A%2522Sofa%2520%2526%2520Chair%2522%252C%2522width%2522%253A2%252C%2522height%2522%253A0.9%252C%2522length%2522%253A1%252C%2522color%2522%253A%2522%2523ff0000%2522%257D%255D%257D";
        let objects = read_config(hash).unwrap();
        assert_eq!(
            objects,
            vec![BoxSpec::new("Sofa & Chair", 2.0, 0.9, 1.0, "#ff0000").with_id("1712345678901")]
        );
    }

    #[test]
    fn writes_double_escaped_value() {
        let objects = vec![BoxSpec::new("A", 1.0, 2.0, 3.0, "#ff0000").with_id("1")];
        let hash = write_config("", &objects).unwrap();
        assert!(hash.starts_with("config=%257B%2522version%2522%253A1%252C"));
    }

    #[test]
    fn preserves_other_slots() {
        let hash = "#theme=dark&config=stale&units=cm";
        let written = write_config(hash, &sample()).unwrap();
        let fragment = Fragment::parse(&written);
        let keys: Vec<_> = fragment.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["theme", "config", "units"]);
        assert_eq!(fragment.get("theme"), Some("dark"));
        assert_eq!(fragment.get("units"), Some("cm"));
        assert_eq!(read_config(&written).unwrap(), sample());
    }

    #[test]
    fn appends_slot_when_missing() {
        let written = write_config("#theme=dark", &[]).unwrap();
        assert!(written.starts_with("theme=dark&config="));
    }

    #[test]
    fn absent_or_empty_slot_is_none() {
        assert_eq!(read_config(""), None);
        assert_eq!(read_config("#"), None);
        assert_eq!(read_config("#theme=dark"), None);
        assert_eq!(read_config("#config="), None);
    }

    #[test]
    fn malformed_slot_is_none() {
        assert_eq!(read_config("#config=not-json"), None);
        assert_eq!(read_config("#config=%257B%2522objects%2522"), None);
        assert_eq!(read_config("#config=%2522hello%2522"), None);
        // newer schema
        let future = utf8_percent_encode(r#"{"version":2,"objects":[]}"#, COMPONENT).to_string();
        let mut fragment = Fragment::default();
        fragment.set(CONFIG_KEY, future);
        assert_eq!(read_config(&fragment.to_string()), None);
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        assert!(matches!(decode("%FF%FE"), Err(CodecError::Encoding(_))));
    }

    #[test]
    fn fragment_plus_is_space() {
        let fragment = Fragment::parse("note=two+words&x=%2B");
        assert_eq!(fragment.get("note"), Some("two words"));
        assert_eq!(fragment.get("x"), Some("+"));
        assert_eq!(fragment.to_string(), "note=two+words&x=%2B");
    }

    #[test]
    fn fragment_set_collapses_duplicates() {
        let mut fragment = Fragment::parse("a=1&b=2&a=3&c=4&a=5");
        fragment.set("a", "9");
        assert_eq!(fragment.to_string(), "a=9&b=2&c=4");
        assert_eq!(fragment.len(), 3);
    }

    #[test]
    fn fragment_remove_and_bare_keys() {
        let mut fragment = Fragment::parse("#flag&&a=1");
        assert_eq!(fragment.get("flag"), Some(""));
        assert!(fragment.remove("flag"));
        assert!(!fragment.remove("flag"));
        assert_eq!(fragment.to_string(), "a=1");
        assert!(!fragment.is_empty());
    }
}
