//! Venue records: CRUD, the area listing and the detail page.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::venue;
use crate::error::CatalogError;
use crate::genres::Genres;
use crate::shows::{self, ShowOwner};
use crate::views::{group_by_area, AreaGroup, VenueDetail, VenueSummary};
use crate::{DeletePolicy, EntityKind};

/// Validated venue fields, as submitted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn apply(self, am: &mut venue::ActiveModel) {
        am.name = Set(self.name);
        am.city = Set(self.city);
        am.state = Set(self.state);
        am.address = Set(self.address);
        am.phone = Set(self.phone);
        am.genres = Set(self.genres);
        am.image_link = Set(self.image_link);
        am.website_link = Set(self.website_link);
        am.facebook_link = Set(self.facebook_link);
        am.seeking_talent = Set(self.seeking_talent);
        am.seeking_description = Set(self.seeking_description);
    }
}

pub async fn find<C>(db: &C, id: i32) -> Result<venue::Model, CatalogError>
where
    C: ConnectionTrait,
{
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("venue", id))
}

/// All venues, ordered for the area listing.
pub async fn list<C>(db: &C) -> Result<Vec<venue::Model>, CatalogError>
where
    C: ConnectionTrait,
{
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;
    Ok(venues)
}

/// Venues grouped by `(city, state)`, each annotated with its upcoming show count.
pub async fn listing<C>(db: &C, now: DateTime<Utc>) -> Result<Vec<AreaGroup>, CatalogError>
where
    C: ConnectionTrait,
{
    let venues = list(db).await?;
    let ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
    let counts = shows::upcoming_counts(db, EntityKind::Venue, &ids, now).await?;

    Ok(group_by_area(venues.into_iter().map(|v| {
        let summary = VenueSummary {
            id: v.id,
            name: v.name,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
        };
        (v.city, v.state, summary)
    })))
}

pub async fn detail<C>(db: &C, id: i32, now: DateTime<Utc>) -> Result<VenueDetail, CatalogError>
where
    C: ConnectionTrait,
{
    let venue = find(db, id).await?;
    let rows = shows::show_rows(db, Some(ShowOwner::Venue(id))).await?;
    Ok(VenueDetail::assemble(venue, rows, now))
}

pub async fn create(db: &DatabaseConnection, input: VenueInput) -> Result<venue::Model, CatalogError> {
    let txn = db.begin().await?;
    let mut am = venue::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut am);

    match am.insert(&txn).await {
        Ok(created) => {
            txn.commit().await?;
            tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
            Ok(created)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e.into())
        }
    }
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: VenueInput,
) -> Result<venue::Model, CatalogError> {
    let txn = db.begin().await?;
    let result = async {
        let mut am: venue::ActiveModel = find(&txn, id).await?.into();
        input.apply(&mut am);
        Ok::<_, CatalogError>(am.update(&txn).await?)
    }
    .await;

    match result {
        Ok(updated) => {
            txn.commit().await?;
            tracing::info!(venue_id = id, "venue updated");
            Ok(updated)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Delete a venue, handling its shows according to `policy`.
///
/// Returns the number of shows removed along with it.
pub async fn delete(
    db: &DatabaseConnection,
    id: i32,
    policy: DeletePolicy,
) -> Result<u64, CatalogError> {
    let txn = db.begin().await?;
    let result = async {
        find(&txn, id).await?;
        let removed = shows::release_owner(&txn, ShowOwner::Venue(id), policy).await?;
        venue::Entity::delete_by_id(id).exec(&txn).await?;
        Ok::<_, CatalogError>(removed)
    }
    .await;

    match result {
        Ok(removed) => {
            txn.commit().await?;
            tracing::info!(venue_id = id, shows_removed = removed, %policy, "venue deleted");
            Ok(removed)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}
