//! Form intake: urlencoded bodies parsed and validated into catalog inputs.
//!
//! Every field is checked and all problems are reported together, so a
//! rejected submission can be corrected in one round trip.

use chrono::{DateTime, NaiveDateTime, Utc};
use gigboard_db::artists::ArtistInput;
use gigboard_db::genres::Genres;
use gigboard_db::shows::ShowInput;
use gigboard_db::venues::VenueInput;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

static PHONE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").ok());

const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Decoded `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value for `key`, trimmed. Blank values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Every value of a repeatable field, accepting both `key` and `key[]`.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        let bracketed = format!("{key}[]");
        self.pairs
            .iter()
            .filter(|(k, _)| k == key || *k == bracketed)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn checkbox(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(v.to_ascii_lowercase().as_str(), "y" | "on" | "true" | "1")
        })
    }
}

/// Collects field errors while individual fields are read.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn required(&mut self, form: &FormData, field: &str) -> String {
        match form.get(field) {
            Some(v) => v.to_string(),
            None => {
                self.fail(field, "This field is required.");
                String::new()
            }
        }
    }

    fn state(&mut self, form: &FormData) -> String {
        let raw = self.required(form, "state");
        if raw.is_empty() {
            return raw;
        }
        let code = raw.to_ascii_uppercase();
        if !STATE_CODES.contains(&code.as_str()) {
            self.fail("state", format!("'{raw}' is not a US state code."));
        }
        code
    }

    fn phone(&mut self, form: &FormData) -> Option<String> {
        let phone = form.get("phone")?;
        let valid = PHONE_RE.as_ref().is_some_and(|re| re.is_match(phone));
        if !valid {
            self.fail("phone", "Phone numbers look like 123-123-1234.");
        }
        Some(phone.to_string())
    }

    fn link(&mut self, form: &FormData, field: &str) -> Option<String> {
        let raw = form.get(field)?;
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => self.fail(field, "Enter a full http:// or https:// URL."),
        }
        Some(raw.to_string())
    }

    fn id(&mut self, form: &FormData, field: &str) -> i32 {
        let Some(raw) = form.get(field) else {
            self.fail(field, "This field is required.");
            return 0;
        };
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => id,
            _ => {
                self.fail(field, "Must be a positive whole number.");
                0
            }
        }
    }

    fn start_time(&mut self, form: &FormData) -> DateTime<Utc> {
        let Some(raw) = form.get("start_time") else {
            self.fail("start_time", "This field is required.");
            return DateTime::UNIX_EPOCH;
        };
        parse_start_time(raw).unwrap_or_else(|| {
            self.fail("start_time", "Use a date and time like 2019-05-21 21:30:00.");
            DateTime::UNIX_EPOCH
        })
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Accepts RFC 3339 or a naive `YYYY-MM-DD HH:MM[:SS]` (also with `T`), read as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn optional(form: &FormData, field: &str) -> Option<String> {
    form.get(field).map(str::to_string)
}

pub fn venue_input(form: &FormData) -> Result<VenueInput, Vec<FieldError>> {
    let mut check = Checker::default();
    let input = VenueInput {
        name: check.required(form, "name"),
        city: check.required(form, "city"),
        state: check.state(form),
        address: check.required(form, "address"),
        phone: check.phone(form),
        genres: Genres::new(form.get_all("genres")),
        image_link: check.link(form, "image_link"),
        website_link: check.link(form, "website_link"),
        facebook_link: check.link(form, "facebook_link"),
        seeking_talent: form.checkbox("seeking_talent"),
        seeking_description: optional(form, "seeking_description"),
    };
    check.finish(input)
}

pub fn artist_input(form: &FormData) -> Result<ArtistInput, Vec<FieldError>> {
    let mut check = Checker::default();
    let input = ArtistInput {
        name: check.required(form, "name"),
        city: check.required(form, "city"),
        state: check.state(form),
        phone: check.phone(form),
        genres: Genres::new(form.get_all("genres")),
        image_link: check.link(form, "image_link"),
        website_link: check.link(form, "website_link"),
        facebook_link: check.link(form, "facebook_link"),
        seeking_venue: form.checkbox("seeking_venue"),
        seeking_description: optional(form, "seeking_description"),
    };
    check.finish(input)
}

pub fn show_input(form: &FormData) -> Result<ShowInput, Vec<FieldError>> {
    let mut check = Checker::default();
    let input = ShowInput {
        artist_id: check.id(form, "artist_id"),
        venue_id: check.id(form, "venue_id"),
        start_time: check.start_time(form),
    };
    check.finish(input)
}

/// The search box value. Missing means "match everything".
pub fn search_term(form: &FormData) -> String {
    form.get("search_term").unwrap_or_default().to_string()
}
