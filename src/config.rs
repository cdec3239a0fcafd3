//! Configuration options for the qfolders client

use std::time::Duration;

/// Configuration options for the qfolders client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,

    /// Public base URL of the deployed site, used for the email-confirmation
    /// redirect sent on sign-up
    pub site_url: String,

    /// The storage bucket holding uploaded PDF references
    pub pdf_bucket: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
            site_url: "https://q-folders.vercel.app".to_string(),
            pdf_bucket: "question-pdfs".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// Set the site URL used for confirmation-email redirects
    pub fn with_site_url(mut self, value: &str) -> Self {
        self.site_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the storage bucket for PDF uploads
    pub fn with_pdf_bucket(mut self, value: &str) -> Self {
        self.pdf_bucket = value.to_string();
        self
    }

    /// The URL users land on after confirming their email address
    pub fn confirmation_redirect_url(&self) -> String {
        format!("{}/auth/confirmed", self.site_url.trim_end_matches('/'))
    }
}
