//! Past/upcoming classification, counts and referential integrity of shows.

mod common;

use common::*;
use gigboard_db::entities::show;
use gigboard_db::shows::{self, ShowInput, ShowOwner};
use gigboard_db::{CatalogError, EntityKind};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_past_and_upcoming_partition_venue_shows() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&t.db, "Guns N Petals").await;

    let older = add_show(&t.db, venue.id, artist.id, now() - days(30)).await;
    let recent = add_show(&t.db, venue.id, artist.id, now() - days(1)).await;
    let later = add_show(&t.db, venue.id, artist.id, now() + days(7)).await;
    let soon = add_show(&t.db, venue.id, artist.id, now() + days(1)).await;

    let past = shows::past_shows(&t.db, ShowOwner::Venue(venue.id), now())
        .await
        .unwrap();
    let upcoming = shows::upcoming_shows(&t.db, ShowOwner::Venue(venue.id), now())
        .await
        .unwrap();

    assert_eq!(past.iter().map(|s| s.id).collect::<Vec<_>>(), vec![older.id, recent.id]);
    assert_eq!(upcoming.iter().map(|s| s.id).collect::<Vec<_>>(), vec![soon.id, later.id]);

    for s in show::Entity::find().all(&t.db).await.unwrap() {
        if s.start_time < now() {
            assert!(past.contains(&s));
            assert!(!upcoming.contains(&s));
        } else {
            assert!(upcoming.contains(&s));
            assert!(!past.contains(&s));
        }
    }
}

#[tokio::test]
async fn test_show_starting_now_is_upcoming() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&t.db, "Guns N Petals").await;
    let boundary = add_show(&t.db, venue.id, artist.id, now()).await;

    let past = shows::past_shows(&t.db, ShowOwner::Venue(venue.id), now())
        .await
        .unwrap();
    let upcoming = shows::upcoming_shows(&t.db, ShowOwner::Venue(venue.id), now())
        .await
        .unwrap();

    assert!(past.is_empty());
    assert_eq!(upcoming, vec![boundary.clone()]);
    assert!(boundary.is_upcoming(now()));
}

#[tokio::test]
async fn test_artist_side_classification() {
    let t = TestDb::new().await;
    let hop = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;
    let park = add_venue(&t.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let sax = add_artist(&t.db, "The Wild Sax Band").await;
    let other = add_artist(&t.db, "Matt Quevedo").await;

    add_show(&t.db, hop.id, sax.id, now() - days(3)).await;
    add_show(&t.db, park.id, sax.id, now() + days(3)).await;
    add_show(&t.db, park.id, other.id, now() + days(4)).await;

    let past = shows::past_shows(&t.db, ShowOwner::Artist(sax.id), now())
        .await
        .unwrap();
    let upcoming = shows::upcoming_shows(&t.db, ShowOwner::Artist(sax.id), now())
        .await
        .unwrap();

    assert_eq!(past.len(), 1);
    assert_eq!(past[0].venue_id, hop.id);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].venue_id, park.id);
}

#[tokio::test]
async fn test_shows_of_unknown_owner_is_not_found() {
    let t = TestDb::new().await;

    let err = shows::past_shows(&t.db, ShowOwner::Venue(999), now())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "venue", id: 999 }));

    let err = shows::upcoming_shows(&t.db, ShowOwner::Artist(5), now())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "artist", id: 5 }));
}

#[tokio::test]
async fn test_upcoming_show_count_zero_without_shows() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "The Dueling Pianos Bar", "New York", "NY").await;

    let count = shows::upcoming_show_count(&t.db, venue.id, now())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_upcoming_show_count_ignores_past_shows() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = add_artist(&t.db, "The Wild Sax Band").await;

    add_show(&t.db, venue.id, artist.id, now() - days(10)).await;
    add_show(&t.db, venue.id, artist.id, now() + days(1)).await;
    add_show(&t.db, venue.id, artist.id, now() + days(8)).await;

    let count = shows::upcoming_show_count(&t.db, venue.id, now())
        .await
        .unwrap();
    assert_eq!(count, 2);

    let err = shows::upcoming_show_count(&t.db, venue.id + 100, now())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn test_upcoming_counts_batch() {
    let t = TestDb::new().await;
    let a = add_venue(&t.db, "A", "San Francisco", "CA").await;
    let b = add_venue(&t.db, "B", "San Francisco", "CA").await;
    let artist = add_artist(&t.db, "Guns N Petals").await;

    add_show(&t.db, a.id, artist.id, now() + days(1)).await;
    add_show(&t.db, a.id, artist.id, now() + days(2)).await;
    add_show(&t.db, b.id, artist.id, now() - days(2)).await;

    let counts = shows::upcoming_counts(&t.db, EntityKind::Venue, &[a.id, b.id], now())
        .await
        .unwrap();
    assert_eq!(counts.get(&a.id), Some(&2));
    assert_eq!(counts.get(&b.id), None);

    let by_artist = shows::upcoming_counts(&t.db, EntityKind::Artist, &[artist.id], now())
        .await
        .unwrap();
    assert_eq!(by_artist.get(&artist.id), Some(&2));

    let empty = shows::upcoming_counts(&t.db, EntityKind::Venue, &[], now())
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_create_show_with_unknown_artist_fails() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;

    let err = shows::create(
        &t.db,
        ShowInput {
            venue_id: venue.id,
            artist_id: 4242,
            start_time: now(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::MissingReference { entity: "artist", id: 4242 }
    ));
    assert_eq!(show::Entity::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_show_with_unknown_venue_fails() {
    let t = TestDb::new().await;
    let artist = add_artist(&t.db, "Matt Quevedo").await;

    let err = shows::create(
        &t.db,
        ShowInput {
            venue_id: 77,
            artist_id: artist.id,
            start_time: now(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::MissingReference { entity: "venue", id: 77 }
    ));
    assert_eq!(show::Entity::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_joins_venue_and_artist() {
    let t = TestDb::new().await;
    let hop = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;
    let park = add_venue(&t.db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let gnp = add_artist(&t.db, "Guns N Petals").await;
    let sax = add_artist(&t.db, "The Wild Sax Band").await;

    add_show(&t.db, park.id, sax.id, now() + days(5)).await;
    add_show(&t.db, hop.id, gnp.id, now() - days(5)).await;

    let listing = shows::list(&t.db).await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].venue_name, "The Musical Hop");
    assert_eq!(listing[0].artist_name, "Guns N Petals");
    assert_eq!(listing[0].artist_image_link, gnp.image_link);
    assert_eq!(listing[1].venue_id, park.id);
    assert_eq!(listing[1].artist_id, sax.id);
    assert!(listing[0].start_time < listing[1].start_time);
}

#[tokio::test]
async fn test_find_show() {
    let t = TestDb::new().await;
    let venue = add_venue(&t.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&t.db, "Guns N Petals").await;
    let created = add_show(&t.db, venue.id, artist.id, now()).await;

    assert_eq!(shows::find(&t.db, created.id).await.unwrap(), created);
    assert!(matches!(
        shows::find(&t.db, created.id + 1).await,
        Err(CatalogError::NotFound { entity: "show", .. })
    ));
}
