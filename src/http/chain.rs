// Middleware chain.
// An explicit ordered list of transformer stages wrapping the transport.
// A request travels down the list; the response travels back up in reverse.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

use super::message::{Request, Response};
use super::transport::Transport;

/// A single pipeline stage. A stage may transform the outgoing request,
/// invoke `next` zero or one times, and transform the returned response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response>;
}

/// Continuation over the remaining stages, ending at the transport.
pub struct Next<'a> {
    transport: &'a dyn Transport,
    stages: &'a [Box<dyn Middleware>],
}

impl Next<'_> {
    pub async fn run(self, request: Request) -> Result<Response> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                let next = Next {
                    transport: self.transport,
                    stages: rest,
                };
                stage.handle(request, next).await
            }
            None => self.transport.send(request).await,
        }
    }
}

/// The assembled pipeline. Built once at client construction.
pub struct Chain {
    transport: Arc<dyn Transport>,
    stages: Vec<Box<dyn Middleware>>,
}

impl Chain {
    pub fn new(transport: Arc<dyn Transport>, stages: Vec<Box<dyn Middleware>>) -> Self {
        Self { transport, stages }
    }

    pub async fn execute(&self, request: Request) -> Result<Response> {
        let next = Next {
            transport: self.transport.as_ref(),
            stages: &self.stages,
        };
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::message::Headers;
    use crate::http::testing::MockTransport;

    struct Tag(&'static str);

    #[async_trait]
    impl Middleware for Tag {
        async fn handle(&self, request: Request, next: Next<'_>) -> Result<Response> {
            let tags = match request.headers.get("x-tags") {
                Some(existing) => format!("{},{}", existing, self.0),
                None => self.0.to_string(),
            };
            next.run(request.with_header("x-tags", tags)).await
        }
    }

    #[tokio::test]
    async fn stages_run_in_declared_order() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(
            200,
            Headers::new(),
            Vec::new(),
        )]));
        let chain = Chain::new(
            transport.clone(),
            vec![Box::new(Tag("outer")), Box::new(Tag("inner"))],
        );

        chain
            .execute(Request::get("https://api.github.test/"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].headers.get("x-tags"), Some("outer,inner"));
    }

    #[tokio::test]
    async fn empty_chain_reaches_the_transport() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(
            204,
            Headers::new(),
            Vec::new(),
        )]));
        let chain = Chain::new(transport.clone(), Vec::new());

        let response = chain
            .execute(Request::get("https://api.github.test/"))
            .await
            .unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(transport.call_count(), 1);
    }
}
