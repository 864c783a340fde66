//! Case-insensitive name search over venues or artists.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::entities::{artist, venue};
use crate::error::CatalogError;
use crate::shows;
use crate::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Lower-cased, trimmed search term. Names are folded with the same Unicode
/// rule in [`name_matches`], never by the database.
pub fn fold_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether `name` contains the already folded `needle`, ignoring case.
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

/// Find venues or artists whose name contains `term`, ignoring case.
///
/// Hits are ordered by id and carry their upcoming show count. An empty
/// term matches everything.
pub async fn search<C>(
    db: &C,
    kind: EntityKind,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, CatalogError>
where
    C: ConnectionTrait,
{
    let needle = fold_term(term);

    let names: Vec<(i32, String)> = match kind {
        EntityKind::Venue => {
            venue::Entity::find()
                .select_only()
                .column(venue::Column::Id)
                .column(venue::Column::Name)
                .order_by_asc(venue::Column::Id)
                .into_tuple()
                .all(db)
                .await?
        }
        EntityKind::Artist => {
            artist::Entity::find()
                .select_only()
                .column(artist::Column::Id)
                .column(artist::Column::Name)
                .order_by_asc(artist::Column::Id)
                .into_tuple()
                .all(db)
                .await?
        }
    };
    let matches: Vec<(i32, String)> = names
        .into_iter()
        .filter(|(_, name)| name_matches(name, &needle))
        .collect();

    let ids: Vec<i32> = matches.iter().map(|(id, _)| *id).collect();
    let counts = shows::upcoming_counts(db, kind, &ids, now).await?;

    let data: Vec<SearchHit> = matches
        .into_iter()
        .map(|(id, name)| SearchHit {
            id,
            name,
            num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
        })
        .collect();

    tracing::debug!(kind = kind.label(), term, hits = data.len(), "search");

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}
