// Pagination over Link-header collections.
// An explicit loop, never recursion: either follow rel="next" until it
// disappears, or count pages up to the number declared by rel="last".

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ReportsError, Result};
use crate::http::chain::Chain;
use crate::http::message::Request;

/// Page references parsed from a response's `Link` header. Recomputed per
/// response, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    /// Parse a header of the form
    /// `<https://...?page=2>; rel="next", <https://...?page=14>; rel="last"`.
    pub fn parse(header: Option<&str>) -> Self {
        let mut links = Self::default();
        let Some(header) = header else {
            return links;
        };

        for segment in header.split(',') {
            let mut parts = segment.split(';');
            let Some(url) = parts
                .next()
                .map(str::trim)
                .and_then(|url| url.strip_prefix('<'))
                .and_then(|url| url.strip_suffix('>'))
            else {
                continue;
            };

            for param in parts {
                match param.trim() {
                    "rel=\"next\"" => links.next = Some(url.to_string()),
                    "rel=\"last\"" => links.last = Some(url.to_string()),
                    _ => {}
                }
            }
        }
        links
    }

    /// Page number carried by the `rel="last"` URL's `page` parameter.
    pub fn last_page_number(&self) -> Option<u32> {
        let last = self.last.as_deref()?;
        let query = last.split_once('?')?.1;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))?
            .parse()
            .ok()
    }
}

/// Drives repeated chain calls across a paginated collection, accumulating
/// every page's items in order.
pub struct Pager<'a> {
    chain: &'a Chain,
}

impl<'a> Pager<'a> {
    pub fn new(chain: &'a Chain) -> Self {
        Self { chain }
    }

    pub async fn fetch_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let (mut items, links) = self.fetch_page(url).await?;

        if let Some(last_page) = links.last_page_number() {
            // The first response declared the final page number; count up
            // to it regardless of intermediate next links.
            debug!("paginating {url} through page {last_page}");
            for page in 2..=last_page {
                let page_url = url_with_page(url, page);
                let (page_items, _) = self.fetch_page(&page_url).await?;
                items.extend(page_items);
            }
        } else {
            let mut next = links.next;
            while let Some(next_url) = next {
                debug!("following next link: {next_url}");
                let (page_items, links) = self.fetch_page(&next_url).await?;
                items.extend(page_items);
                next = links.next;
            }
        }

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ReportsError::from))
            .collect()
    }

    async fn fetch_page(&self, url: &str) -> Result<(Vec<Value>, PageLinks)> {
        let response = self.chain.execute(Request::get(url)).await?;

        if response.status != 200 {
            return Err(ReportsError::PaginationFailed {
                url: url.to_string(),
                status: response.status,
            });
        }

        let items = match response.json {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ReportsError::RequestFailure(
                    "expected a JSON array while paginating".to_string(),
                ));
            }
        };
        let links = PageLinks::parse(response.headers.get("link"));
        Ok((items, links))
    }
}

fn url_with_page(url: &str, page: u32) -> String {
    if url.contains('?') {
        format!("{url}&page={page}")
    } else {
        format!("{url}?page={page}")
    }
}
