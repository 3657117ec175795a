use crate::http::{HTTPError, HTTPResult};
use crate::reddit::{RedditClient, Service};
use crate::tools::RedditTools;
use itertools::Itertools;
use reqwest::StatusCode;
use std::fs;
use std::sync::Mutex;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

/// Serves canned responses from `tests/data` instead of contacting Reddit.
///
/// A request for `/r/rust/hot` is served from `tests/data/r_rust_hot.json`,
/// or from `tests/data/r_rust_hot_<after>.json` when an `after` cursor is
/// given. Missing files are reported as HTTP 404s.
#[derive(Debug, Default)]
pub struct TestService {
    requests: Mutex<Vec<String>>,
}

impl TestService {
    /// Every request made so far, as `path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: &str, query: &[(&str, String)]) {
        let request = if query.is_empty() {
            path.to_string()
        } else {
            let qs = query.iter().map(|(k, v)| format!("{k}={v}")).join("&");
            format!("{path}?{qs}")
        };
        self.requests.lock().unwrap().push(request);
    }
}

impl Service for TestService {
    async fn get_resource(&self, path: &str, query: &[(&str, String)]) -> HTTPResult<String> {
        do_logging();
        self.record(path, query);

        let mut name = path.trim_start_matches('/').replace('/', "_");
        if let Some((_, after)) = query.iter().find(|(k, _)| *k == "after") {
            name = format!("{name}_{after}");
        }
        fs::read_to_string(format!("tests/data/{name}.json"))
            .map_err(|_| HTTPError::Http(StatusCode::NOT_FOUND))
    }
}

impl RedditClient<TestService> {
    /// Returns a client that serves data from `tests/data`.
    pub fn test() -> Self {
        RedditClient::new(TestService::default())
    }
}

impl RedditTools<TestService> {
    /// Returns tools backed by data from `tests/data`.
    pub fn test() -> Self {
        RedditTools::new(RedditClient::test())
    }
}
