//! Show queries: past/upcoming classification, joined listings, counts.
//!
//! A show is upcoming when `start_time >= now` and past otherwise, see
//! [`show::is_upcoming`]. `now` is always supplied by the caller.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set, TransactionTrait,
};
use std::collections::HashMap;

use crate::entities::{artist, show, venue};
use crate::error::CatalogError;
use crate::views::ShowListing;
use crate::{DeletePolicy, EntityKind};

/// The venue or artist whose shows are being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue(i32),
    Artist(i32),
}

impl ShowOwner {
    pub fn kind(self) -> EntityKind {
        match self {
            Self::Venue(_) => EntityKind::Venue,
            Self::Artist(_) => EntityKind::Artist,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Venue(id) | Self::Artist(id) => id,
        }
    }
}

fn owner_column(kind: EntityKind) -> show::Column {
    match kind {
        EntityKind::Venue => show::Column::VenueId,
        EntityKind::Artist => show::Column::ArtistId,
    }
}

fn owned_by(owner: ShowOwner) -> Select<show::Entity> {
    show::Entity::find().filter(owner_column(owner.kind()).eq(owner.id()))
}

/// A show joined with the names and images of its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ShowRow {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

pub(crate) async fn owner_exists<C>(db: &C, owner: ShowOwner) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let found = match owner {
        ShowOwner::Venue(id) => venue::Entity::find_by_id(id).count(db).await?,
        ShowOwner::Artist(id) => artist::Entity::find_by_id(id).count(db).await?,
    };
    Ok(found > 0)
}

async fn ensure_owner<C>(db: &C, owner: ShowOwner) -> Result<(), CatalogError>
where
    C: ConnectionTrait,
{
    if owner_exists(db, owner).await? {
        Ok(())
    } else {
        Err(CatalogError::not_found(owner.kind().label(), owner.id()))
    }
}

/// Shows of `owner` that started before `now`, oldest first.
pub async fn past_shows<C>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<Vec<show::Model>, CatalogError>
where
    C: ConnectionTrait,
{
    ensure_owner(db, owner).await?;
    let shows = owned_by(owner)
        .filter(show::Column::StartTime.lt(now))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    Ok(shows)
}

/// Shows of `owner` starting at or after `now`, soonest first.
pub async fn upcoming_shows<C>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<Vec<show::Model>, CatalogError>
where
    C: ConnectionTrait,
{
    ensure_owner(db, owner).await?;
    let shows = owned_by(owner)
        .filter(show::Column::StartTime.gte(now))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    Ok(shows)
}

/// Number of upcoming shows at a venue. Zero when it has none.
pub async fn upcoming_show_count<C>(
    db: &C,
    venue_id: i32,
    now: DateTime<Utc>,
) -> Result<u64, CatalogError>
where
    C: ConnectionTrait,
{
    let owner = ShowOwner::Venue(venue_id);
    ensure_owner(db, owner).await?;
    let count = owned_by(owner)
        .filter(show::Column::StartTime.gte(now))
        .count(db)
        .await?;
    Ok(count)
}

/// Upcoming show counts for many venues or artists in a single grouped query.
///
/// Ids without upcoming shows are absent from the map; read them as zero.
pub async fn upcoming_counts<C>(
    db: &C,
    kind: EntityKind,
    ids: &[i32],
    now: DateTime<Utc>,
) -> Result<HashMap<i32, u64>, DbErr>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let column = owner_column(kind);
    let rows: Vec<(i32, i64)> = show::Entity::find()
        .select_only()
        .column(column)
        .column_as(Expr::col((show::Entity, show::Column::Id)).count(), "upcoming")
        .filter(column.is_in(ids.iter().copied()))
        .filter(show::Column::StartTime.gte(now))
        .group_by(column)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, u64::try_from(count).unwrap_or(0)))
        .collect())
}

/// Shows joined with their venue and artist, ordered by start time.
///
/// One query regardless of how many shows match.
pub async fn show_rows<C>(db: &C, owner: Option<ShowOwner>) -> Result<Vec<ShowRow>, DbErr>
where
    C: ConnectionTrait,
{
    let mut query = show::Entity::find()
        .select_only()
        .column(show::Column::Id)
        .column(show::Column::StartTime)
        .column(show::Column::VenueId)
        .column(show::Column::ArtistId)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def());

    if let Some(owner) = owner {
        query = query.filter(owner_column(owner.kind()).eq(owner.id()));
    }

    query
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .into_model::<ShowRow>()
        .all(db)
        .await
}

/// Every show with venue and artist names, for the shows page.
pub async fn list<C>(db: &C) -> Result<Vec<ShowListing>, CatalogError>
where
    C: ConnectionTrait,
{
    let rows = show_rows(db, None).await?;
    Ok(rows.into_iter().map(ShowListing::from).collect())
}

pub async fn find<C>(db: &C, id: i32) -> Result<show::Model, CatalogError>
where
    C: ConnectionTrait,
{
    show::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("show", id))
}

/// List a new show. Both the venue and the artist must already exist.
pub async fn create(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, CatalogError> {
    let txn = db.begin().await?;
    match insert_show(&txn, &input).await {
        Ok(created) => {
            txn.commit().await?;
            tracing::info!(
                show_id = created.id,
                venue_id = created.venue_id,
                artist_id = created.artist_id,
                "show listed"
            );
            Ok(created)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

async fn insert_show<C>(db: &C, input: &ShowInput) -> Result<show::Model, CatalogError>
where
    C: ConnectionTrait,
{
    if !owner_exists(db, ShowOwner::Venue(input.venue_id)).await? {
        return Err(CatalogError::missing_reference("venue", input.venue_id));
    }
    if !owner_exists(db, ShowOwner::Artist(input.artist_id)).await? {
        return Err(CatalogError::missing_reference("artist", input.artist_id));
    }

    let created = show::ActiveModel {
        start_time: Set(input.start_time),
        venue_id: Set(input.venue_id),
        artist_id: Set(input.artist_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(created)
}

/// Apply the delete policy to the shows of a record that is about to go.
///
/// Returns how many shows were removed. Must run inside the transaction
/// that deletes the owner.
pub(crate) async fn release_owner<C>(
    db: &C,
    owner: ShowOwner,
    policy: DeletePolicy,
) -> Result<u64, CatalogError>
where
    C: ConnectionTrait,
{
    let dependents = owned_by(owner).count(db).await?;
    if dependents == 0 {
        return Ok(0);
    }

    match policy {
        DeletePolicy::Restrict => Err(CatalogError::HasDependents {
            entity: owner.kind().label(),
            id: owner.id(),
            shows: dependents,
        }),
        DeletePolicy::Cascade => {
            let removed = show::Entity::delete_many()
                .filter(owner_column(owner.kind()).eq(owner.id()))
                .exec(db)
                .await?;
            Ok(removed.rows_affected)
        }
    }
}
