//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use roster_core::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
  store::{PersonStore, StoreError as _},
};
use uuid::Uuid;

use crate::{Error, SqliteStore, encode::{encode_dt, now}};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn enriched(name: &str, surname: &str, age: u32, gender: &str, nationality: &str) -> NewPerson {
  NewPerson {
    age: Some(age),
    gender: Some(gender.into()),
    nationality: Some(nationality.into()),
    ..NewPerson::new(name, surname)
  }
}

/// Insert in order, pausing so `created_at` strictly increases.
async fn seed(s: &SqliteStore, people: Vec<NewPerson>) {
  for p in people {
    s.create(p).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
  }
}

fn names(people: &[Person]) -> Vec<&str> {
  people.iter().map(|p| p.name.as_str()).collect()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_round_trip() {
  let s = store().await;

  let created = s
    .create(enriched("Alice", "Smith", 30, "female", "US"))
    .await
    .unwrap();
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get(created.id).await.unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.age, Some(30));
  assert_eq!(fetched.gender.as_deref(), Some("female"));
  assert_eq!(fetched.nationality.as_deref(), Some("US"));
  assert_eq!(fetched.patronymic, None);
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let s = store().await;
  let err = s.get(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
  assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_name_is_refused_by_schema() {
  let s = store().await;
  let err = s.create(NewPerson::new("", "Smith")).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert!(!err.is_not_found());
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_defaults_return_newest_first() {
  let s = store().await;
  seed(&s, vec![
    enriched("First", "A", 20, "male", "DE"),
    enriched("Second", "B", 30, "female", "US"),
    enriched("Third", "C", 40, "male", "US"),
  ])
  .await;

  let all = s.search(&PersonFilter::default()).await.unwrap();
  assert_eq!(names(&all), ["Third", "Second", "First"]);
}

#[tokio::test]
async fn search_name_and_age_range() {
  let s = store().await;
  seed(&s, vec![
    enriched("Alice", "Smith", 30, "female", "US"),
    enriched("Bob", "Jones", 25, "male", "GB"),
    enriched("Natalia", "Petrova", 35, "female", "RU"),
    enriched("ALINA", "Kim", 50, "female", "KR"),
    enriched("Kalinda", "Roe", 22, "female", "AU"),
  ])
  .await;

  let filter = PersonFilter {
    name: Some("ali".into()),
    age_min: Some(20),
    age_max: Some(40),
    ..Default::default()
  };
  let found = s.search(&filter).await.unwrap();
  assert_eq!(names(&found), ["Kalinda", "Natalia", "Alice"]);
  assert!(found.iter().all(|p| (20..=40).contains(&p.age.unwrap())));
}

#[tokio::test]
async fn each_filter_narrows_the_result() {
  let s = store().await;
  seed(&s, vec![
    enriched("Ann", "Lee", 30, "female", "US"),
    enriched("Ann", "Park", 31, "female", "KR"),
    enriched("Andy", "Lee", 32, "male", "US"),
  ])
  .await;

  let mut filter = PersonFilter::default();
  assert_eq!(s.search(&filter).await.unwrap().len(), 3);

  filter.surname = Some("lee".into());
  assert_eq!(s.search(&filter).await.unwrap().len(), 2);

  filter.gender = Some("female".into());
  assert_eq!(s.search(&filter).await.unwrap().len(), 1);

  filter.nationality = Some("KR".into());
  assert!(s.search(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn exact_match_filters_are_case_sensitive() {
  let s = store().await;
  seed(&s, vec![enriched("Eve", "Doe", 28, "female", "US")]).await;

  let filter = PersonFilter { nationality: Some("us".into()), ..Default::default() };
  assert!(s.search(&filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_paginates() {
  let s = store().await;
  seed(
    &s,
    (0..5).map(|i| enriched(&format!("P{i}"), "X", 30, "male", "US")).collect(),
  )
  .await;

  let filter = PersonFilter { limit: Some(2), offset: Some(1), ..Default::default() };
  let page = s.search(&filter).await.unwrap();
  assert_eq!(names(&page), ["P3", "P2"]);

  let filter = PersonFilter { limit: Some(0), offset: Some(-4), ..Default::default() };
  assert_eq!(s.search(&filter).await.unwrap().len(), 5);
}

#[tokio::test]
async fn undecodable_row_fails_the_whole_search() {
  let s = store().await;
  seed(&s, vec![enriched("Good", "Row", 30, "male", "US")]).await;

  let at = encode_dt(now());
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO persons (id, name, surname, age, created_at, updated_at)
         VALUES ('bad-uuid', 'John', 'Doe', 30, ?1, ?1)",
        rusqlite::params![at],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.search(&PersonFilter::default()).await.unwrap_err();
  assert!(matches!(err, Error::Scan(_)), "got {err:?}");
}

#[tokio::test]
async fn wrongly_typed_column_is_a_scan_error() {
  let s = store().await;
  seed(&s, vec![enriched("Good", "Row", 30, "male", "US")]).await;

  let id = Uuid::new_v4();
  let id_str = crate::encode::encode_uuid(id);
  let at = encode_dt(now());
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO persons (id, name, surname, age, created_at, updated_at)
         VALUES (?1, 'John', 'Doe', 30.5, ?2, ?2)",
        rusqlite::params![id_str, at],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.search(&PersonFilter::default()).await.unwrap_err();
  assert!(matches!(err, Error::Scan(_)), "got {err:?}");
  assert!(!err.is_not_found());

  let err = s.get(id).await.unwrap_err();
  assert!(matches!(err, Error::Scan(_)), "got {err:?}");
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sparse_patch_changes_only_supplied_fields() {
  let s = store().await;
  let before = s
    .create(enriched("Jane", "Doe", 25, "female", "US").with_patronymic("Ann"))
    .await
    .unwrap();
  tokio::time::sleep(Duration::from_millis(2)).await;

  let patch = PersonPatch {
    age: Some(26),
    nationality: Some("CA".into()),
    ..Default::default()
  };
  s.update(before.id, &patch).await.unwrap();

  let after = s.get(before.id).await.unwrap();
  assert_eq!(after.age, Some(26));
  assert_eq!(after.nationality.as_deref(), Some("CA"));
  assert_eq!(after.name, before.name);
  assert_eq!(after.surname, before.surname);
  assert_eq!(after.patronymic, before.patronymic);
  assert_eq!(after.gender, before.gender);
  assert_eq!(after.created_at, before.created_at);
  assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn empty_patch_only_advances_updated_at() {
  let s = store().await;
  let before = s.create(enriched("Max", "Mustermann", 40, "male", "DE")).await.unwrap();
  tokio::time::sleep(Duration::from_millis(2)).await;

  s.update(before.id, &PersonPatch::default()).await.unwrap();

  let after = s.get(before.id).await.unwrap();
  assert!(after.updated_at > before.updated_at);
  assert_eq!(Person { updated_at: before.updated_at, ..after }, before);
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let s = store().await;
  let patch = PersonPatch { name: Some("Ghost".into()), ..Default::default() };
  let err = s.update(Uuid::new_v4(), &patch).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_second_delete_is_not_found() {
  let s = store().await;
  let person = s.create(enriched("Del", "Me", 33, "male", "FR")).await.unwrap();

  s.delete(person.id).await.unwrap();
  assert!(matches!(s.get(person.id).await, Err(Error::NotFound(_))));

  let err = s.delete(person.id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(id) if id == person.id));
}
