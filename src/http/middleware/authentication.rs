// Authentication stage.
// Attaches the token header on the way out; turns a 401 into the specific
// authentication failure before generic status validation can see it.

use async_trait::async_trait;

use crate::error::{ReportsError, Result};
use crate::http::chain::{Middleware, Next};
use crate::http::message::{Request, Response};

pub struct Authentication {
    token: String,
}

impl Authentication {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl Middleware for Authentication {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let request = request.with_header("Authorization", format!("token {}", self.token));
        let response = next.run(request).await?;

        if response.status == 401 {
            return Err(ReportsError::AuthenticationFailure);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::chain::Chain;
    use crate::http::message::Headers;
    use crate::http::testing::{MockTransport, json_response};

    fn chain_with(transport: Arc<MockTransport>) -> Chain {
        Chain::new(transport, vec![Box::new(Authentication::new("abc123"))])
    }

    #[tokio::test]
    async fn attaches_the_token_header() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(
            200,
            Headers::new(),
            Vec::new(),
        )]));
        let chain = chain_with(transport.clone());

        chain
            .execute(Request::get("https://api.github.test/users/octocat"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].headers.get("authorization"), Some("token abc123"));
    }

    #[tokio::test]
    async fn unauthorized_becomes_authentication_failure() {
        let transport = Arc::new(MockTransport::new(vec![json_response(
            401,
            r#"{"message": "Bad credentials"}"#,
            &[],
        )]));
        let chain = chain_with(transport);

        let err = chain
            .execute(Request::get("https://api.github.test/users/octocat"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportsError::AuthenticationFailure));
    }
}
