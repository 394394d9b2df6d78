// JSON decode stage.
// Attaches the decoded body when the content-type indicates JSON and the
// body is non-empty; the raw bytes stay on the response for caching.

use async_trait::async_trait;

use crate::error::Result;
use crate::http::chain::{Middleware, Next};
use crate::http::message::{Request, Response};

pub struct JsonDecode;

fn json_content(response: &Response) -> bool {
    response
        .content_type()
        .is_some_and(|content_type| content_type.contains("application/json"))
        && !response.body.is_empty()
}

#[async_trait]
impl Middleware for JsonDecode {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let mut response = next.run(request).await?;

        if json_content(&response) {
            response.json = Some(serde_json::from_slice(&response.body)?);
        }
        Ok(response)
    }
}
