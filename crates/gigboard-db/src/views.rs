//! View models handed to the presentation layer.
//!
//! Everything here is plain data: queries in [`crate::venues`],
//! [`crate::artists`] and [`crate::shows`] fill these in, the server
//! serializes them as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::{artist, show, venue};
use crate::shows::ShowRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// All venues sharing one `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

impl From<artist::Model> for ArtistSummary {
    fn from(a: artist::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// A show as seen from a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShowSummary {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowRow> for ArtistShowSummary {
    fn from(row: ShowRow) -> Self {
        Self {
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

/// A show as seen from an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShowSummary {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowRow> for VenueShowSummary {
    fn from(row: ShowRow) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            start_time: row.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowRow> for ShowListing {
    fn from(row: ShowRow) -> Self {
        Self {
            id: row.id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub past_shows: Vec<ArtistShowSummary>,
    pub upcoming_shows: Vec<ArtistShowSummary>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn assemble(venue: venue::Model, rows: Vec<ShowRow>, now: DateTime<Utc>) -> Self {
        let (past, upcoming) = partition_by_time(rows, now);
        let past_shows: Vec<ArtistShowSummary> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<ArtistShowSummary> =
            upcoming.into_iter().map(Into::into).collect();
        Self {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub past_shows: Vec<VenueShowSummary>,
    pub upcoming_shows: Vec<VenueShowSummary>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn assemble(artist: artist::Model, rows: Vec<ShowRow>, now: DateTime<Utc>) -> Self {
        let (past, upcoming) = partition_by_time(rows, now);
        let past_shows: Vec<VenueShowSummary> = past.into_iter().map(Into::into).collect();
        let upcoming_shows: Vec<VenueShowSummary> = upcoming.into_iter().map(Into::into).collect();
        Self {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Split rows into `(past, upcoming)`, keeping input order within each side.
pub fn partition_by_time(rows: Vec<ShowRow>, now: DateTime<Utc>) -> (Vec<ShowRow>, Vec<ShowRow>) {
    let (upcoming, past): (Vec<ShowRow>, Vec<ShowRow>) = rows
        .into_iter()
        .partition(|row| show::is_upcoming(row.start_time, now));
    (past, upcoming)
}

/// Collect venues into one group per `(city, state)`.
///
/// Groups come out in order of first appearance and venues keep their
/// input order inside a group.
pub fn group_by_area<I>(venues: I) -> Vec<AreaGroup>
where
    I: IntoIterator<Item = (String, String, VenueSummary)>,
{
    let mut groups: Vec<AreaGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (city, state, summary) in venues {
        match index.get(&(city.clone(), state.clone())) {
            Some(&i) => groups[i].venues.push(summary),
            None => {
                index.insert((city.clone(), state.clone()), groups.len());
                groups.push(AreaGroup {
                    city,
                    state,
                    venues: vec![summary],
                });
            }
        }
    }

    groups
}
