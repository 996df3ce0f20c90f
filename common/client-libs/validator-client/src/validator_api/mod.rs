// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::validator_api::error::ValidatorAPIError;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

pub mod error;
pub mod routes;

type PathSegments<'a> = &'a [&'a str];

/// Client of the REST status API serving pre-aggregated snapshots of the network.
///
/// Every request is sent to the configured urls one after another, in order, until one of them
/// responds with `200 OK` and a readable body. Each url is tried exactly once per request.
#[derive(Debug, Clone)]
pub struct ValidatorApiQuerier {
    urls: Vec<Url>,
    reqwest_client: reqwest::Client,
}

impl ValidatorApiQuerier {
    pub fn new(urls: Vec<Url>) -> Result<Self, ValidatorAPIError> {
        if urls.is_empty() {
            return Err(ValidatorAPIError::NoApiUrlsProvided);
        }
        if let Some(url) = urls.iter().find(|url| url.cannot_be_a_base()) {
            return Err(ValidatorAPIError::UnusableBaseUrl { url: url.clone() });
        }

        Ok(ValidatorApiQuerier {
            urls,
            reqwest_client: reqwest::Client::new(),
        })
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn change_urls(&mut self, urls: Vec<Url>) -> Result<(), ValidatorAPIError> {
        *self = Self::new(urls)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn query_validator_api<T>(&self, path: PathSegments<'_>) -> Result<T, ValidatorAPIError>
    where
        for<'a> T: Deserialize<'a>,
    {
        for base in &self.urls {
            let url = create_api_url(base, path);
            match self.reqwest_client.get(url.clone()).send().await {
                Ok(res) if res.status() == StatusCode::OK => match res.json().await {
                    Ok(body) => {
                        debug!("{url} responded successfully");
                        return Ok(body);
                    }
                    Err(err) => warn!("failed to read the response of {url}: {err}"),
                },
                Ok(res) => warn!("{url} responded with {}", res.status()),
                Err(err) => warn!("failed to query {url}: {err}"),
            }
        }

        Err(ValidatorAPIError::NoAliveApis)
    }

    pub async fn get_mixnodes<T>(&self) -> Result<Vec<T>, ValidatorAPIError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_validator_api(&[routes::API_VERSION, routes::MIXNODES])
            .await
    }

    pub async fn get_active_mixnodes<T>(&self) -> Result<Vec<T>, ValidatorAPIError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_validator_api(&[routes::API_VERSION, routes::MIXNODES, routes::ACTIVE])
            .await
    }

    pub async fn get_rewarded_mixnodes<T>(&self) -> Result<Vec<T>, ValidatorAPIError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_validator_api(&[routes::API_VERSION, routes::MIXNODES, routes::REWARDED])
            .await
    }

    pub async fn get_gateways<T>(&self) -> Result<Vec<T>, ValidatorAPIError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_validator_api(&[routes::API_VERSION, routes::GATEWAYS])
            .await
    }
}

fn create_api_url(base: &Url, segments: PathSegments<'_>) -> Url {
    let mut url = base.clone();
    // bases are checked on construction, so this always succeeds
    if let Ok(mut path_segments) = url.path_segments_mut() {
        path_segments.pop_if_empty();
        for segment in segments {
            path_segments.push(segment.trim_matches('/'));
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn url(raw: &str) -> Url {
        raw.parse().unwrap()
    }

    #[test]
    fn api_urls_are_joined_with_the_base_path() {
        assert_eq!(
            "http://foomp.com/v1/mixnodes",
            create_api_url(&url("http://foomp.com"), &["v1", "mixnodes"]).as_str()
        );
        assert_eq!(
            "https://validator.nymtech.net/api/v1/mixnodes/active",
            create_api_url(
                &url("https://validator.nymtech.net/api/"),
                &["v1", "/mixnodes/", "active"]
            )
            .as_str()
        );
    }

    #[test]
    fn at_least_one_usable_url_is_required() {
        assert!(matches!(
            ValidatorApiQuerier::new(vec![]),
            Err(ValidatorAPIError::NoApiUrlsProvided)
        ));
        assert!(matches!(
            ValidatorApiQuerier::new(vec![url("mailto:nobody@nymtech.net")]),
            Err(ValidatorAPIError::UnusableBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn unavailable_api_reports_no_alive_apis() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/mixnodes")
            .with_status(503)
            .with_body("maintenance")
            .expect(1)
            .create_async()
            .await;

        let querier = ValidatorApiQuerier::new(vec![url(&server.url())]).unwrap();
        let err = querier.get_mixnodes::<String>().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "None of the provided validator APIs seem to be alive"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn successful_response_is_returned_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/gateways")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["gw1", "gw2"]"#)
            .create_async()
            .await;

        let querier = ValidatorApiQuerier::new(vec![url(&server.url())]).unwrap();
        let gateways: Vec<String> = querier.get_gateways().await.unwrap();
        assert_eq!(gateways, vec!["gw1", "gw2"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn urls_are_tried_once_in_order() {
        let mut dead = Server::new_async().await;
        let mut alive = Server::new_async().await;

        let dead_mock = dead
            .mock("GET", "/v1/mixnodes/rewarded")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let alive_mock = alive
            .mock("GET", "/v1/mixnodes/rewarded")
            .with_status(200)
            .with_body("[1, 2, 3]")
            .expect(1)
            .create_async()
            .await;

        let querier =
            ValidatorApiQuerier::new(vec![url(&dead.url()), url(&alive.url())]).unwrap();
        let rewarded: Vec<u32> = querier.get_rewarded_mixnodes().await.unwrap();
        assert_eq!(rewarded, vec![1, 2, 3]);

        dead_mock.assert_async().await;
        alive_mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreadable_body_falls_through_to_the_next_url() {
        let mut garbled = Server::new_async().await;
        let mut healthy = Server::new_async().await;

        let garbled_mock = garbled
            .mock("GET", "/v1/gateways")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .expect(1)
            .create_async()
            .await;
        let healthy_mock = healthy
            .mock("GET", "/v1/gateways")
            .with_status(200)
            .with_body(r#"["gw1"]"#)
            .expect(1)
            .create_async()
            .await;

        let querier =
            ValidatorApiQuerier::new(vec![url(&garbled.url()), url(&healthy.url())]).unwrap();
        let gateways: Vec<String> = querier.get_gateways().await.unwrap();
        assert_eq!(gateways, ["gw1"]);

        garbled_mock.assert_async().await;
        healthy_mock.assert_async().await;

        let only_garbled = ValidatorApiQuerier::new(vec![url(&garbled.url())]).unwrap();
        let res: Result<Vec<String>, _> = only_garbled.get_gateways().await;
        assert!(matches!(res, Err(ValidatorAPIError::NoAliveApis)));
    }
}
