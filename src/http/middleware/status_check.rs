// Status validation stage.
// Rejects any status outside the allow-list, carrying the server's
// message field when the body decoded.

use async_trait::async_trait;

use crate::error::{ReportsError, Result};
use crate::http::chain::{Middleware, Next};
use crate::http::message::{Request, Response};

const VALID_STATUS_CODES: [u16; 7] = [200, 201, 302, 401, 403, 404, 422];

pub struct StatusCheck;

#[async_trait]
impl Middleware for StatusCheck {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let response = next.run(request).await?;

        if !VALID_STATUS_CODES.contains(&response.status) {
            let message = response
                .message()
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            return Err(ReportsError::RequestFailure(message));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::chain::Chain;
    use crate::http::middleware::JsonDecode;
    use crate::http::testing::{MockTransport, json_response};

    fn chain_with(transport: Arc<MockTransport>) -> Chain {
        // Decode runs inside validation so the message field is available.
        Chain::new(
            transport,
            vec![Box::new(StatusCheck), Box::new(JsonDecode)],
        )
    }

    #[tokio::test]
    async fn unexpected_status_carries_the_server_message() {
        let transport = Arc::new(MockTransport::new(vec![json_response(
            500,
            r#"{"message": "Server Error"}"#,
            &[],
        )]));
        let chain = chain_with(transport);

        let err = chain
            .execute(Request::get("https://api.github.test/users/octocat"))
            .await
            .unwrap_err();

        match err {
            ReportsError::RequestFailure(message) => assert_eq!(message, "Server Error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_falls_back_to_a_generic_message() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(
            502,
            crate::http::message::Headers::new(),
            b"bad gateway".to_vec(),
        )]));
        let chain = chain_with(transport);

        let err = chain
            .execute(Request::get("https://api.github.test/users/octocat"))
            .await
            .unwrap_err();

        match err {
            ReportsError::RequestFailure(message) => assert_eq!(message, "HTTP 502"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn allow_listed_statuses_pass_through() {
        // 201 must pass so gist creation can observe its success status.
        for status in [200, 201, 302, 403, 404, 422] {
            let transport = Arc::new(MockTransport::new(vec![json_response(
                status,
                "{}",
                &[],
            )]));
            let chain = chain_with(transport);

            let response = chain
                .execute(Request::get("https://api.github.test/users/octocat"))
                .await
                .unwrap();
            assert_eq!(response.status, status);
        }
    }
}
