use crate::config::ApiCredentials;
use crate::http::{Error, Request, Response};

use super::{ApiError, DesiredRecord, DnsProvider, Record, Zone};

use serde_derive::Deserialize;

const API_URL: &str = "https://api.hosting.ionos.com/dns/v1/zones";

/// GET /zones/{id} returns the zone itself plus its records; only the
/// records are of interest.
#[derive(Deserialize, Debug)]
struct ZoneDetails {
    records: Vec<Record>,
}

pub struct Client {
    api_key: Box<str>,
}

impl Client {
    pub fn new(credentials: &ApiCredentials) -> Self {
        Self {
            api_key: credentials.api_key().into(),
        }
    }

    fn request(&self, request: Request) -> Request {
        request
            .set("accept", "application/json")
            .set("X-API-Key", &self.api_key)
    }

    fn parse_error(error: Error) -> ApiError {
        match error {
            Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                ApiError::Status(code, body.into())
            }
            Error::Transport(tp) => ApiError::Transport(tp),
        }
    }

    fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .into_json::<T>()
            .map_err(|e| ApiError::Json(e.to_string().into()))
    }
}

impl DnsProvider for Client {
    fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        let response = self
            .request(Request::get(API_URL))
            .call()
            .map_err(Self::parse_error)?;

        Self::parse_json(response)
    }

    fn list_records(&self, zone_id: &str, host: &str) -> Result<Vec<Record>, ApiError> {
        let url = format!("{}/{}", API_URL, zone_id);

        let response = self
            .request(Request::get(&url))
            .call()
            .map_err(Self::parse_error)?;

        let details = Self::parse_json::<ZoneDetails>(response)?;

        Ok(details
            .records
            .into_iter()
            .filter(|record| record.name.as_ref() == host)
            .collect())
    }

    fn create_records(&self, zone_id: &str, records: &[DesiredRecord]) -> Result<(), ApiError> {
        let url = format!("{}/{}/records", API_URL, zone_id);

        self.request(Request::post(&url))
            .send_json(records)
            .map_err(Self::parse_error)?;

        Ok(())
    }

    fn patch_records(&self, zone_id: &str, records: &[DesiredRecord]) -> Result<(), ApiError> {
        let url = format!("{}/{}", API_URL, zone_id);

        self.request(Request::patch(&url))
            .send_json(records)
            .map_err(Self::parse_error)?;

        Ok(())
    }
}
