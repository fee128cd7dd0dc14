//! Tests for the Mailgun API client.


#[cfg(test)]
mod services_tests;

#[cfg(test)]
mod support {
    use crate::client::MailgunClient;
    use crate::config::MailgunConfigBuilder;
    use crate::mocks::{MockHttpTransport, MockResponse};
    use std::sync::Arc;

    pub const API_KEY: &str = "key-3ax6xnjp29jd6fds4gc373sgvjxteol0";

    /// Client over a mock transport that replays `responses` in order
    pub fn mock_client(
        responses: impl IntoIterator<Item = MockResponse>,
    ) -> (MailgunClient, Arc<MockHttpTransport>) {
        let transport = Arc::new(MockHttpTransport::new().add_responses(responses));
        let config = MailgunConfigBuilder::new()
            .domain("samples.mailgun.org")
            .api_key(API_KEY)
            .build()
            .unwrap();
        let client = MailgunClient::with_transport(config, transport.clone()).unwrap();
        (client, transport)
    }
}
