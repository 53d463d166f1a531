use chrono::{Duration, Utc};
use rentroot::domain::filter::{ListingFilter, ListingPredicate, SearchQuery};
use rentroot::domain::geo::GeoPoint;
use rentroot::domain::listing::ListingUpdate;
use rentroot::domain::review::NewReview;
use rentroot::domain::types::{
    ListingCategory, ListingTitle, ReviewComment, ReviewRating, UserEmail,
};
use rentroot::repository::{
    DieselRepository, ListingListQuery, ListingReader, ListingWriter, ReviewReader, ReviewWriter,
    UserReader,
};

mod common;

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let user = common::create_user(&repo, "student");
    let email = UserEmail::new("Student@Example.com").expect("valid email");

    let found = repo
        .get_user_by_email(&email)
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert_eq!(found.username, "student");
    assert_eq!(
        repo.get_user_by_id(user.id).expect("should query user"),
        Some(found)
    );
}

#[test]
fn lists_listings_newest_first_and_applies_filters() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");
    let now = Utc::now().naive_utc();

    let mut oldest = common::new_listing(owner.id, "Oldest", now - Duration::days(30));
    oldest.amenities.verified = true;
    oldest.amenities.pet_friendly = true;
    let mut middle = common::new_listing(owner.id, "Middle", now - Duration::days(3));
    middle.category = ListingCategory::Beach;
    let mut newest = common::new_listing(owner.id, "Newest", now - Duration::hours(1));
    newest.amenities.verified = true;

    for listing in [&oldest, &middle, &newest] {
        repo.create_listing(listing).expect("should create listing");
    }

    let titles = |query: ListingListQuery| -> Vec<String> {
        repo.list_listings(query)
            .expect("should list listings")
            .into_iter()
            .map(|l| l.title.into_inner())
            .collect()
    };

    assert_eq!(
        titles(ListingListQuery::default()),
        vec!["Newest", "Middle", "Oldest"]
    );
    assert_eq!(
        titles(ListingListQuery::default().predicate(ListingPredicate::Verified)),
        vec!["Newest", "Oldest"]
    );
    assert_eq!(
        titles(ListingListQuery::default().predicate(ListingPredicate::PetFriendly)),
        vec!["Oldest"]
    );
    assert_eq!(
        titles(
            ListingListQuery::default()
                .predicate(ListingPredicate::Category(ListingCategory::Beach))
        ),
        vec!["Middle"]
    );

    let new_predicate = ListingFilter::New
        .predicate(now)
        .expect("new filter has a predicate");
    assert_eq!(
        titles(ListingListQuery::default().predicate(new_predicate)),
        vec!["Newest", "Middle"]
    );
}

#[test]
fn search_matches_title_or_description_literally() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");
    let now = Utc::now().naive_utc();

    let beach = common::new_listing(owner.id, "Beach House", now);
    let mut cottage = common::new_listing(owner.id, "Cottage", now);
    cottage.description = "Two minutes from the BEACH".try_into().expect("valid");
    let discount = common::new_listing(owner.id, "100% off weekend", now);
    for listing in [&beach, &cottage, &discount] {
        repo.create_listing(listing).expect("should create listing");
    }

    let search = |text: &str| -> Vec<String> {
        let query = SearchQuery::parse(Some(text)).expect("non-blank query");
        let mut titles: Vec<String> = repo
            .search_listings(ListingListQuery::default().search(query))
            .expect("should search listings")
            .into_iter()
            .map(|l| l.title.into_inner())
            .collect();
        titles.sort();
        titles
    };

    assert_eq!(search("beach"), vec!["Beach House", "Cottage"]);
    assert_eq!(search("100%"), vec!["100% off weekend"]);
    assert_eq!(search("%"), vec!["100% off weekend"]);
    assert!(search("castle").is_empty());
}

#[test]
fn search_folds_non_ascii_case() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");
    let now = Utc::now().naive_utc();

    let chateau = common::new_listing(owner.id, "Château Éclair", now);
    let mut chalet = common::new_listing(owner.id, "Chalet", now - Duration::days(1));
    chalet.description = "Walk to the ÉCOLE in five minutes".try_into().expect("valid");
    for listing in [&chateau, &chalet] {
        repo.create_listing(listing).expect("should create listing");
    }

    let search = |text: &str| -> Vec<String> {
        let query = SearchQuery::parse(Some(text)).expect("non-blank query");
        let mut titles: Vec<String> = repo
            .search_listings(ListingListQuery::default().search(query))
            .expect("should search listings")
            .into_iter()
            .map(|l| l.title.into_inner())
            .collect();
        titles.sort();
        titles
    };

    assert_eq!(search("château éclair"), vec!["Château Éclair"]);
    assert_eq!(search("É"), vec!["Chalet", "Château Éclair"]);
    assert_eq!(search("école"), vec!["Chalet"]);

    let query = SearchQuery::parse(Some("CHÂTEAU")).expect("non-blank query");
    let listed = repo
        .list_listings(ListingListQuery::default().search(query))
        .expect("should list listings");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Château Éclair");
}

#[test]
fn stores_location_as_a_single_point() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");

    let mut listing = common::new_listing(owner.id, "Null Island", Utc::now().naive_utc());
    listing.geometry = Some(GeoPoint::new(0.0, 0.0).expect("valid point"));
    let created = repo.create_listing(&listing).expect("should create listing");

    let loaded = repo
        .get_listing_by_id(created.id)
        .expect("should query listing")
        .expect("listing should exist");
    assert_eq!(
        loaded.geometry.map(|point| point.coordinates()),
        Some([0.0, 0.0])
    );
}

#[test]
fn update_keeps_owner_and_creation_time() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");
    let created_at = Utc::now().naive_utc() - Duration::days(2);

    let created = repo
        .create_listing(&common::new_listing(owner.id, "Before", created_at))
        .expect("should create listing");

    let update = ListingUpdate {
        title: ListingTitle::new("After").expect("valid title"),
        description: created.description.clone(),
        image: None,
        price: created.price,
        location: created.location.clone(),
        country: created.country.clone(),
        category: ListingCategory::Luxury,
        amenities: created.amenities,
        geometry: Some(GeoPoint::new(-74.0, 40.0).expect("valid point")),
        updated_at: Utc::now().naive_utc(),
    };
    assert_eq!(
        repo.update_listing(created.id, &update)
            .expect("should update listing"),
        1
    );

    let loaded = repo
        .get_listing_by_id(created.id)
        .expect("should query listing")
        .expect("listing should exist");
    assert_eq!(loaded.title, "After");
    assert_eq!(loaded.category, ListingCategory::Luxury);
    assert_eq!(loaded.owner_id, owner.id);
    assert_eq!(loaded.created_at, created.created_at);
    assert_eq!(loaded.image, created.image);
    assert_eq!(loaded.geometry.map(|p| p.latitude()), Some(40.0));
}

#[test]
fn deleting_listing_removes_its_reviews() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let owner = common::create_user(&repo, "owner");
    let guest = common::create_user(&repo, "guest");
    let now = Utc::now().naive_utc();

    let doomed = repo
        .create_listing(&common::new_listing(owner.id, "Doomed", now))
        .expect("should create listing");
    let kept = repo
        .create_listing(&common::new_listing(owner.id, "Kept", now))
        .expect("should create listing");

    let review = |listing_id, rating| NewReview {
        listing_id,
        author_id: guest.id,
        comment: ReviewComment::new("Nice stay").expect("valid comment"),
        rating: ReviewRating::new(rating).expect("valid rating"),
        created_at: now,
    };
    let first = repo
        .create_review(&review(doomed.id, 4))
        .expect("should create review");
    let second = repo
        .create_review(&review(doomed.id, 2))
        .expect("should create review");
    let other = repo
        .create_review(&review(kept.id, 5))
        .expect("should create review");
    assert_eq!(first.author, "guest");

    assert_eq!(
        repo.delete_listing(doomed.id)
            .expect("should delete listing"),
        1
    );

    assert!(
        repo.get_listing_by_id(doomed.id)
            .expect("should query listing")
            .is_none()
    );
    for review in [&first, &second] {
        assert!(
            repo.get_review_by_id(review.id)
                .expect("should query review")
                .is_none()
        );
    }
    assert!(
        repo.get_review_by_id(other.id)
            .expect("should query review")
            .is_some()
    );
    assert_eq!(
        repo.list_reviews(kept.id).expect("should list reviews").len(),
        1
    );
}
