//! [`SqliteStore`], the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
  store::PersonStore,
};

use crate::{
  Error, Result,
  encode::{PERSON_COLUMNS, RawPerson, encode_dt, encode_uuid, now},
  query::{Statement, build_search, build_update},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster person store backed by a single SQLite file.
///
/// Clones share the same background connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a built `SELECT` and decode every row. The first row that fails to
  /// decode fails the whole call.
  pub async fn list(&self, stmt: Statement) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared
          .query_map(rusqlite::params_from_iter(stmt.args.iter()), RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::reading)?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  /// Run a built `UPDATE`/`DELETE` and report how many rows it touched.
  pub async fn execute(&self, stmt: Statement) -> Result<usize> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(&stmt.sql, rusqlite::params_from_iter(stmt.args.iter()))?)
      })
      .await?;
    Ok(affected)
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewPerson) -> Result<Person> {
    let created_at = now();
    let person = Person {
      id:          Uuid::new_v4(),
      name:        input.name,
      surname:     input.surname,
      patronymic:  input.patronymic,
      age:         input.age,
      gender:      input.gender,
      nationality: input.nationality,
      created_at,
      updated_at:  created_at,
    };

    let id_str      = encode_uuid(person.id);
    let name        = person.name.clone();
    let surname     = person.surname.clone();
    let patronymic  = person.patronymic.clone();
    let age         = person.age;
    let gender      = person.gender.clone();
    let nationality = person.nationality.clone();
    let at_str      = encode_dt(created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             id, name, surname, patronymic, age, gender, nationality,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            id_str,
            name,
            surname,
            patronymic,
            age,
            gender,
            nationality,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %person.id, "inserted person");
    Ok(person)
  }

  async fn get(&self, id: Uuid) -> Result<Person> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1"),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(Error::reading)?;

    raw.ok_or(Error::NotFound(id))?.into_person()
  }

  async fn search(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let stmt = build_search(filter);
    tracing::debug!(sql = %stmt.sql, args = stmt.args.len(), "searching persons");
    self.list(stmt).await
  }

  async fn update(&self, id: Uuid, patch: &PersonPatch) -> Result<()> {
    let stmt = build_update(id, patch, now());
    match self.execute(stmt).await? {
      0 => Err(Error::NotFound(id)),
      _ => Ok(()),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let stmt = Statement {
      sql:  "DELETE FROM persons WHERE id = ?1".to_owned(),
      args: vec![rusqlite::types::Value::Text(encode_uuid(id))],
    };
    match self.execute(stmt).await? {
      0 => Err(Error::NotFound(id)),
      _ => Ok(()),
    }
  }
}
