use crate::core::{ConfigProvider, ReferenceSource, SerialNumber, WarrantySource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Parameters the lookup endpoint expects next to `sn`.
pub const LOOKUP_COMPANION_PARAMS: [(&str, &str); 5] = [
    ("Continue", "Continue"),
    ("cn", ""),
    ("locale", ""),
    ("caller", ""),
    ("num", "0"),
];

pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}

async fn get_text(request: reqwest::RequestBuilder) -> Result<String> {
    let response = request.send().await?;
    tracing::debug!("Response status: {}", response.status());
    let body = response.error_for_status()?.text().await?;
    Ok(body)
}

#[derive(Debug, Clone)]
pub struct HttpWarrantySource {
    client: Client,
    endpoint: String,
}

impl HttpWarrantySource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Self {
        Self::new(client, config.lookup_endpoint())
    }
}

#[async_trait]
impl WarrantySource for HttpWarrantySource {
    async fn fetch_lookup_page(&self, serial: &SerialNumber) -> Result<String> {
        let mut params = vec![("sn", serial.as_str())];
        params.extend_from_slice(&LOOKUP_COMPANION_PARAMS);

        tracing::debug!("Requesting {} for serial {}", self.endpoint, serial);
        get_text(self.client.get(&self.endpoint).query(&params)).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpReferenceSource {
    client: Client,
    url: String,
}

impl HttpReferenceSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn fetch_reference_document(&self) -> Result<String> {
        tracing::debug!("Fetching ASD reference document from {}", self.url);
        get_text(self.client.get(&self.url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::utils::error::WarrantyError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_lookup_sends_serial_and_companion_params() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/wcResults.do")
                .query_param("sn", "C02ABC")
                .query_param("Continue", "Continue")
                .query_param_exists("cn")
                .query_param_exists("locale")
                .query_param_exists("caller")
                .query_param("num", "0");
            then.status(200).body("<html>page</html>");
        });

        let source = HttpWarrantySource::new(Client::new(), server.url("/wcResults.do"));
        let serial = SerialNumber::new("C02ABC").unwrap();
        let body = source.fetch_lookup_page(&serial).await.unwrap();

        page_mock.assert();
        assert_eq!(body, "<html>page</html>");
    }

    #[tokio::test]
    async fn test_lookup_endpoint_comes_from_config() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/configured").query_param("sn", "W80XYZ");
            then.status(200).body("configured");
        });

        let config = AppConfig {
            lookup_endpoint: server.url("/configured"),
            ..AppConfig::default()
        };
        let source = HttpWarrantySource::from_config(build_client(&config).unwrap(), &config);
        let serial = SerialNumber::new("W80XYZ").unwrap();

        assert_eq!(source.fetch_lookup_page(&serial).await.unwrap(), "configured");
        page_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let server = MockServer::start();
        let ref_mock = server.mock(|when, then| {
            when.method(GET).path("/asdcheck");
            then.status(404);
        });

        let source = HttpReferenceSource::new(Client::new(), server.url("/asdcheck"));
        let err = source.fetch_reference_document().await.unwrap_err();

        ref_mock.assert();
        assert!(matches!(err, WarrantyError::ApiError(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_reference_document_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/asdcheck");
            then.status(200).body("iMac: 3S149\n");
        });

        let source = HttpReferenceSource::new(Client::new(), server.url("/asdcheck"));
        assert_eq!(source.fetch_reference_document().await.unwrap(), "iMac: 3S149\n");
    }
}
