//! Artist records: CRUD, the artist index and the detail page.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::artist;
use crate::error::CatalogError;
use crate::genres::Genres;
use crate::shows::{self, ShowOwner};
use crate::views::{ArtistDetail, ArtistSummary};
use crate::DeletePolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn apply(self, am: &mut artist::ActiveModel) {
        am.name = Set(self.name);
        am.city = Set(self.city);
        am.state = Set(self.state);
        am.phone = Set(self.phone);
        am.genres = Set(self.genres);
        am.image_link = Set(self.image_link);
        am.website_link = Set(self.website_link);
        am.facebook_link = Set(self.facebook_link);
        am.seeking_venue = Set(self.seeking_venue);
        am.seeking_description = Set(self.seeking_description);
    }
}

pub async fn find<C>(db: &C, id: i32) -> Result<artist::Model, CatalogError>
where
    C: ConnectionTrait,
{
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("artist", id))
}

pub async fn list<C>(db: &C) -> Result<Vec<ArtistSummary>, CatalogError>
where
    C: ConnectionTrait,
{
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;
    Ok(artists.into_iter().map(ArtistSummary::from).collect())
}

pub async fn detail<C>(db: &C, id: i32, now: DateTime<Utc>) -> Result<ArtistDetail, CatalogError>
where
    C: ConnectionTrait,
{
    let artist = find(db, id).await?;
    let rows = shows::show_rows(db, Some(ShowOwner::Artist(id))).await?;
    Ok(ArtistDetail::assemble(artist, rows, now))
}

pub async fn create(db: &DatabaseConnection, input: ArtistInput) -> Result<artist::Model, CatalogError> {
    let txn = db.begin().await?;
    let mut am = artist::ActiveModel {
        ..Default::default()
    };
    input.apply(&mut am);

    match am.insert(&txn).await {
        Ok(created) => {
            txn.commit().await?;
            tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
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
    input: ArtistInput,
) -> Result<artist::Model, CatalogError> {
    let txn = db.begin().await?;
    let result = async {
        let mut am: artist::ActiveModel = find(&txn, id).await?.into();
        input.apply(&mut am);
        Ok::<_, CatalogError>(am.update(&txn).await?)
    }
    .await;

    match result {
        Ok(updated) => {
            txn.commit().await?;
            tracing::info!(artist_id = id, "artist updated");
            Ok(updated)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Delete an artist, handling its shows according to `policy`.
pub async fn delete(
    db: &DatabaseConnection,
    id: i32,
    policy: DeletePolicy,
) -> Result<u64, CatalogError> {
    let txn = db.begin().await?;
    let result = async {
        find(&txn, id).await?;
        let removed = shows::release_owner(&txn, ShowOwner::Artist(id), policy).await?;
        artist::Entity::delete_by_id(id).exec(&txn).await?;
        Ok::<_, CatalogError>(removed)
    }
    .await;

    match result {
        Ok(removed) => {
            txn.commit().await?;
            tracing::info!(artist_id = id, shows_removed = removed, %policy, "artist deleted");
            Ok(removed)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}
