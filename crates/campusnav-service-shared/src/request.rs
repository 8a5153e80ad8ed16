//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use campusnav_lib::{Campus, LocationId};

use crate::ProblemDetails;

/// Upper bound on locations accepted by a graph replacement. The matrix build
/// is cubic in this number.
pub const MAX_LOCATIONS: usize = 1_000;

/// Validation trait for request types.
pub trait Validate {
    /// Validate the request, returning a boxed `ProblemDetails` carrying
    /// `request_id` when invalid.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query string of `GET /api/v1/shortest-path`.
///
/// Ids arrive as raw strings so that missing and non-numeric values produce
/// problem responses rather than a bare extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortestPathQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_id: Option<String>,
}

impl ShortestPathQuery {
    /// Parse both ids.
    pub fn location_ids(
        &self,
        request_id: &str,
    ) -> Result<(LocationId, LocationId), Box<ProblemDetails>> {
        let start = parse_id("start_id", self.start_id.as_deref(), request_id)?;
        let end = parse_id("end_id", self.end_id.as_deref(), request_id)?;
        Ok((start, end))
    }
}

fn parse_id(
    field: &str,
    raw: Option<&str>,
    request_id: &str,
) -> Result<LocationId, Box<ProblemDetails>> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty());
    let Some(raw) = raw else {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' parameter is required", field),
            request_id,
        )));
    };

    raw.parse().map_err(|_| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{}' parameter must be an integer, got '{}'", field, raw),
            request_id,
        ))
    })
}

impl Validate for ShortestPathQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.location_ids(request_id).map(|_| ())
    }
}

/// Body of `PUT /api/v1/graph`: a complete replacement campus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplaceGraphRequest {
    pub campus: Campus,
}

impl Validate for ReplaceGraphRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.campus.locations.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'locations' field must contain at least one location",
                request_id,
            )));
        }

        if self.campus.locations.len() > MAX_LOCATIONS {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'locations' field cannot exceed {}", MAX_LOCATIONS),
                request_id,
            )));
        }

        if let Some(location) = self
            .campus
            .locations
            .iter()
            .find(|location| location.name.trim().is_empty())
        {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("Location {} has an empty name", location.id),
                request_id,
            )));
        }

        Ok(())
    }
}
