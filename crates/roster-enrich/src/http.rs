//! [`HttpLookup`], the HTTP implementation of [`Lookup`].
//!
//! Each attribute has its own base URL; the subject's name is appended as
//! the `name` query parameter.
//!
//! | Kind          | Response body                                              |
//! |---------------|------------------------------------------------------------|
//! | `age`         | `{"age": 30}`                                              |
//! | `gender`      | `{"gender": "female"}` (`null` reads as `"unknown"`)       |
//! | `nationality` | `{"country": [{"country_id": "US", "probability": 0.8}]}`  |

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
  error::LookupError,
  lookup::{AttributeKind, Lookup, LookupValue},
};

/// Gender reported when the service recognises the request but not the name.
pub const UNKNOWN_GENDER: &str = "unknown";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Base URLs of the three inference services.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoints {
  pub age:         String,
  pub gender:      String,
  pub nationality: String,
}

impl Endpoints {
  pub fn url(&self, kind: AttributeKind) -> &str {
    match kind {
      AttributeKind::Age => &self.age,
      AttributeKind::Gender => &self.gender,
      AttributeKind::Nationality => &self.nationality,
    }
  }
}

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AgeBody {
  age: u32,
}

#[derive(Deserialize)]
struct GenderBody {
  gender: Option<String>,
}

#[derive(Deserialize)]
struct NationalityBody {
  #[serde(default)]
  country: Vec<CountryCandidate>,
}

#[derive(Deserialize)]
struct CountryCandidate {
  country_id:  String,
  #[serde(default)]
  probability: f64,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Looks attributes up over HTTP.
///
/// Cloning shares the inner [`reqwest::Client`] connection pool.
#[derive(Clone)]
pub struct HttpLookup {
  client:    Client,
  endpoints: Endpoints,
}

impl HttpLookup {
  pub fn new(endpoints: Endpoints) -> reqwest::Result<Self> {
    let client = Client::builder().build()?;
    Ok(Self::with_client(client, endpoints))
  }

  pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
    Self { client, endpoints }
  }

  pub fn endpoints(&self) -> &Endpoints { &self.endpoints }

  async fn get<T: DeserializeOwned>(
    &self,
    kind: AttributeKind,
    name: &str,
  ) -> Result<T, LookupError> {
    let resp = self
      .client
      .get(self.endpoints.url(kind))
      .query(&[("name", name)])
      .send()
      .await
      .map_err(|e| LookupError::failed(kind, e))?;

    let status = resp.status();
    if !status.is_success() {
      return Err(LookupError::Upstream { kind, status: status.as_u16() });
    }

    resp.json().await.map_err(|e| LookupError::failed(kind, e))
  }
}

impl Lookup for HttpLookup {
  async fn fetch(&self, kind: AttributeKind, name: &str) -> Result<LookupValue, LookupError> {
    let value = match kind {
      AttributeKind::Age => {
        let body: AgeBody = self.get(kind, name).await?;
        LookupValue::Age(body.age)
      }
      AttributeKind::Gender => {
        let body: GenderBody = self.get(kind, name).await?;
        LookupValue::Gender(body.gender.unwrap_or_else(|| UNKNOWN_GENDER.to_owned()))
      }
      AttributeKind::Nationality => {
        let body: NationalityBody = self.get(kind, name).await?;
        // The service orders candidates by probability, best first.
        match body.country.into_iter().next() {
          Some(top) => {
            tracing::debug!(country = %top.country_id, probability = top.probability, "top nationality");
            LookupValue::Nationality(top.country_id)
          }
          None => LookupValue::Nationality(String::new()),
        }
      }
    };

    tracing::debug!(%kind, name, ?value, "lookup succeeded");
    Ok(value)
  }
}
