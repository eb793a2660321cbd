//! The locale-aware value generator.

use crate::locale::{Locale, LocaleData};
use crate::FakerError;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const HOSTNAME_PREFIXES: &[&str] = &["db", "srv", "desktop", "laptop", "lt", "email", "web"];
const SPECIAL_CHARS: &[u8] = b"!@#$%^&*()_+";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Produces realistic random values for a single [`Locale`].
///
/// A `Faker` is a small immutable value. Switching locale means building a
/// new one, so it can be handed to every provider call without locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Faker {
    locale: Locale,
}

impl Faker {
    /// Create a faker for the given locale.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale this faker draws its word pools from.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn data(&self) -> &'static LocaleData {
        self.locale.data()
    }

    /// Random integer in `[min, max]`, both ends included.
    pub fn random_int(&self, min: i64, max: i64) -> Result<i64, FakerError> {
        if min > max {
            return Err(FakerError::InvalidRange { min, max });
        }
        Ok(rand::thread_rng().gen_range(min..=max))
    }

    /// Random float in `[min, max]`.
    pub fn random_float(&self, min: f64, max: f64) -> Result<f64, FakerError> {
        if !(min.is_finite() && max.is_finite() && min <= max && (max - min).is_finite()) {
            return Err(FakerError::InvalidFloatRange { min, max });
        }
        Ok(rand::thread_rng().gen_range(min..=max))
    }

    pub fn first_name(&self) -> &'static str {
        pick(self.data().first_names)
    }

    pub fn last_name(&self) -> &'static str {
        pick(self.data().last_names)
    }

    /// Full name, `First Last`.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn city(&self) -> &'static str {
        pick(self.data().cities)
    }

    /// ASCII user name built from a first and/or last name.
    pub fn user_name(&self) -> String {
        let mut rng = rand::thread_rng();
        let first = ascii_slug(self.first_name());
        let last = ascii_slug(self.last_name());
        match rng.gen_range(0..4) {
            0 => format!("{first}.{last}"),
            1 => format!("{first}{last}"),
            2 => format!("{}{last}", first.get(..1).unwrap_or_default()),
            _ => format!("{last}{:02}", rng.gen_range(0..100)),
        }
    }

    /// A single domain label derived from a last name.
    pub fn domain_word(&self) -> String {
        ascii_slug(self.last_name())
    }

    /// `word.tld`, with `levels - 1` extra labels in front.
    pub fn domain_name(&self, levels: u32) -> String {
        let mut labels: Vec<String> = (1..levels.max(1)).map(|_| self.domain_word()).collect();
        labels.push(format!("{}.{}", self.domain_word(), pick(self.data().tlds)));
        labels.join(".")
    }

    /// Host name such as `web-42.rossi.it`. Zero levels yields only the host part.
    pub fn hostname(&self, levels: u32) -> String {
        let host = format!(
            "{}-{:02}",
            pick(HOSTNAME_PREFIXES),
            rand::thread_rng().gen_range(0..100)
        );
        if levels == 0 {
            host
        } else {
            format!("{host}.{}", self.domain_name(levels))
        }
    }

    pub fn free_email(&self) -> String {
        format!("{}@{}", self.user_name(), pick(self.data().free_email_domains))
    }

    pub fn company_email(&self) -> String {
        format!("{}@{}", self.user_name(), self.domain_name(1))
    }

    pub fn uri(&self) -> String {
        let mut rng = rand::thread_rng();
        let scheme = if rng.gen_bool(0.5) { "https" } else { "http" };
        let domain = self.domain_name(1);
        match rng.gen_range(0..3) {
            0 => format!("{scheme}://www.{domain}/"),
            1 => format!("{scheme}://{domain}/{}/", ascii_slug(self.word())),
            _ => format!(
                "{scheme}://www.{domain}/{}/{}.html",
                ascii_slug(self.word()),
                ascii_slug(self.word())
            ),
        }
    }

    /// Public IPv4 address (never in a private, loopback, link-local,
    /// multicast or reserved block).
    pub fn ipv4_public(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let octets: [u8; 4] = rng.gen();
            if is_public(octets) {
                return format_ipv4(octets);
            }
        }
    }

    /// Address from one of the RFC 1918 private blocks.
    pub fn ipv4_private(&self) -> String {
        let mut rng = rand::thread_rng();
        let octets = match rng.gen_range(0..3) {
            0 => [10, rng.gen(), rng.gen(), rng.gen()],
            1 => [172, rng.gen_range(16..32), rng.gen(), rng.gen()],
            _ => [192, 168, rng.gen(), rng.gen()],
        };
        format_ipv4(octets)
    }

    /// Colon separated lowercase MAC address.
    pub fn mac_address(&self) -> String {
        let bytes: [u8; 6] = rand::thread_rng().gen();
        bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Random UUID v4 in hyphenated form.
    pub fn uuid4(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Random password. When `length` allows it, the result contains at
    /// least one upper case letter, one lower case letter, and one character
    /// from every requested optional class.
    pub fn password(&self, length: usize, special_chars: bool, digits: bool) -> String {
        let mut rng = rand::thread_rng();

        let mut pool: Vec<u8> = [LOWER, UPPER].concat();
        let mut required = vec![pick(LOWER), pick(UPPER)];
        if digits {
            pool.extend_from_slice(DIGITS);
            required.push(pick(DIGITS));
        }
        if special_chars {
            pool.extend_from_slice(SPECIAL_CHARS);
            required.push(pick(SPECIAL_CHARS));
        }

        let mut chars: Vec<u8> = if length >= required.len() {
            required
        } else {
            Vec::new()
        };
        while chars.len() < length {
            chars.push(pick(&pool));
        }
        chars.shuffle(&mut rng);

        chars.into_iter().map(char::from).collect()
    }

    pub fn word(&self) -> &'static str {
        pick(self.data().words)
    }

    /// Sentence of `nb_words` words, capitalised and ending in a period.
    /// With `variable` the word count varies by up to 40% (never below 1).
    pub fn sentence(&self, nb_words: usize, variable: bool) -> String {
        if nb_words == 0 {
            return String::new();
        }
        let count = if variable {
            vary(nb_words)
        } else {
            nb_words
        };

        let words: Vec<&str> = (0..count).map(|_| self.word()).collect();
        let mut sentence = capitalize(&words.join(" "));
        sentence.push('.');
        sentence
    }

    /// Paragraph of `nb_sentences` sentences.
    pub fn paragraph(&self, nb_sentences: usize, variable: bool) -> String {
        if nb_sentences == 0 {
            return String::new();
        }
        let count = if variable {
            vary(nb_sentences)
        } else {
            nb_sentences
        };

        (0..count)
            .map(|_| self.sentence(6, true))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Random moment between `start` and `end`. Inverted bounds yield `start`.
    pub fn date_time_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
        let start_ts = start.timestamp();
        let end_ts = end.timestamp();
        if start_ts >= end_ts {
            return start;
        }
        let random_ts = rand::thread_rng().gen_range(start_ts..=end_ts);
        DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
    }

    /// Epoch seconds of a random moment between `start` and `end`.
    pub fn unix_time(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        self.date_time_between(start, end).timestamp()
    }
}

fn pick<T: Copy>(pool: &[T]) -> T {
    // Every pool is a non-empty constant table.
    pool[rand::thread_rng().gen_range(0..pool.len())]
}

fn vary(n: usize) -> usize {
    let spread = (n * 40 / 100).max(1);
    let low = n.saturating_sub(spread).max(1);
    rand::thread_rng().gen_range(low..=n + spread)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase ASCII rendering of a name, suitable for hosts and mailboxes.
fn ascii_slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.to_lowercase().chars() {
        match c {
            'a'..='z' | '0'..='9' => out.push(c),
            'à' | 'á' | 'â' => out.push('a'),
            'ä' => out.push_str("ae"),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ò' | 'ó' | 'ô' => out.push('o'),
            'ö' => out.push_str("oe"),
            'ù' | 'ú' | 'û' => out.push('u'),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            'ç' => out.push('c'),
            _ => {}
        }
    }
    out
}

fn format_ipv4(octets: [u8; 4]) -> String {
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

fn is_public(octets: [u8; 4]) -> bool {
    match octets {
        [0, ..] | [10, ..] | [127, ..] => false,
        [100, b, ..] if (64..128).contains(&b) => false,
        [169, 254, ..] => false,
        [172, b, ..] if (16..32).contains(&b) => false,
        [192, 0, 0, _] | [192, 0, 2, _] | [192, 168, ..] => false,
        [198, b, ..] if b == 18 || b == 19 => false,
        [198, 51, 100, _] | [203, 0, 113, _] => false,
        [a, ..] if a >= 224 => false,
        _ => true,
    }
}
