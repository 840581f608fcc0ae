//! `reqwest` client for the feedback endpoint.

use std::time::Duration;

use feedhub_platform::{Feedback, FeedbackApi, NewFeedback, Result};
use reqwest::blocking::{Client, Response};
use tracing::{debug, warn};

use crate::error::IoError;

pub struct HttpFeedbackApi {
    client: Client,
    endpoint: String,
}

impl HttpFeedbackApi {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, IoError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn check_status(response: Response) -> std::result::Result<Response, IoError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    warn!("feedback endpoint answered {status}: {body}");
    Err(IoError::Status {
        status: status.as_u16(),
        body,
    })
}

impl FeedbackApi for HttpFeedbackApi {
    fn list(&self) -> Result<Vec<Feedback>> {
        debug!("GET {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().map_err(IoError::from)?;
        let response = check_status(response)?;
        let recent = response.json::<Vec<Feedback>>().map_err(IoError::from)?;
        Ok(recent)
    }

    fn create(&self, feedback: &NewFeedback) -> Result<Feedback> {
        debug!("POST {} (rating {})", self.endpoint, feedback.rating);
        let response = check_status(
            self.client
                .post(&self.endpoint)
                .json(feedback)
                .send()
                .map_err(IoError::from)?,
        )?;
        let created = response.json::<Feedback>().map_err(IoError::from)?;
        Ok(created)
    }
}
