use std::{
    collections::{HashMap, VecDeque},
    future::{ready, Future},
    sync::{Arc, Mutex},
};

use specsync_client::{Network, NetworkError, RangeResponse};

/// Replies served in order; once drained, the last reply keeps being served.
struct Script<T: Clone> {
    queue: VecDeque<Result<T, NetworkError>>,
    last: Option<Result<T, NetworkError>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            last: None,
        }
    }

    fn push(&mut self, reply: Result<T, NetworkError>) {
        self.queue.push_back(reply);
    }

    fn next(&mut self, endpoint: &str) -> Result<T, NetworkError> {
        if let Some(reply) = self.queue.pop_front() {
            self.last = Some(reply.clone());
            return reply;
        }
        self.last.clone().unwrap_or_else(|| {
            Err(NetworkError::Request {
                endpoint: endpoint.to_string(),
                message: "no reply scripted".to_string(),
            })
        })
    }
}

struct FakeNetworkInner {
    config_specs: Script<String>,
    id_list_metadata: Script<String>,
    ranges: HashMap<String, Script<RangeResponse>>,
    files: HashMap<String, String>,
    config_requests: Vec<u64>,
    metadata_requests: usize,
    range_requests: Vec<(String, u64)>,
}

/// In-memory [`Network`] with scripted replies and a request log.
///
/// Clones share the same script, so a test can keep one handle while the
/// store owns another.
#[derive(Clone)]
pub struct FakeNetwork {
    inner: Arc<Mutex<FakeNetworkInner>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeNetworkInner {
                config_specs: Script::new(),
                id_list_metadata: Script::new(),
                ranges: HashMap::new(),
                files: HashMap::new(),
                config_requests: Vec::new(),
                metadata_requests: 0,
                range_requests: Vec::new(),
            })),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut FakeNetworkInner) -> R) -> R {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut inner)
    }

    pub fn push_config_specs(&self, body: String) {
        self.with_inner(|inner| inner.config_specs.push(Ok(body)));
    }

    pub fn push_config_specs_error(&self, error: NetworkError) {
        self.with_inner(|inner| inner.config_specs.push(Err(error)));
    }

    pub fn push_id_list_metadata(&self, body: String) {
        self.with_inner(|inner| inner.id_list_metadata.push(Ok(body)));
    }

    pub fn push_id_list_metadata_error(&self, error: NetworkError) {
        self.with_inner(|inner| inner.id_list_metadata.push(Err(error)));
    }

    /// Scripts the next reply for a range request against `url`. Scripted
    /// replies take precedence over a file served with [`FakeNetwork::serve_file`].
    pub fn push_range(&self, url: &str, reply: Result<RangeResponse, NetworkError>) {
        self.with_inner(|inner| {
            inner
                .ranges
                .entry(url.to_string())
                .or_insert_with(Script::new)
                .push(reply)
        });
    }

    /// Serves `content` at `url`, answering each range request with the
    /// bytes from the requested offset onwards.
    pub fn serve_file(&self, url: &str, content: &str) {
        self.with_inner(|inner| {
            inner.files.insert(url.to_string(), content.to_string());
        });
    }

    pub fn config_requests(&self) -> Vec<u64> {
        self.with_inner(|inner| inner.config_requests.clone())
    }

    pub fn metadata_requests(&self) -> usize {
        self.with_inner(|inner| inner.metadata_requests)
    }

    pub fn range_requests(&self) -> Vec<(String, u64)> {
        self.with_inner(|inner| inner.range_requests.clone())
    }

    fn range_reply(&self, url: &str, start: u64) -> Result<RangeResponse, NetworkError> {
        self.with_inner(|inner| {
            inner.range_requests.push((url.to_string(), start));

            if let Some(script) = inner.ranges.get_mut(url) {
                if !script.queue.is_empty() || !inner.files.contains_key(url) {
                    return script.next(url);
                }
            }

            match inner.files.get(url) {
                Some(content) => Ok(slice_file(content, start)),
                None => Err(NetworkError::Status {
                    endpoint: url.to_string(),
                    status: 404,
                }),
            }
        })
    }
}

impl Default for FakeNetwork {
    fn default() -> Self {
        Self::new()
    }
}

fn slice_file(content: &str, start: u64) -> RangeResponse {
    let bytes = content.as_bytes();
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    if start >= bytes.len() {
        return RangeResponse {
            status: 416,
            content_length: Some(0),
            body: String::new(),
        };
    }

    let tail = &bytes[start..];
    RangeResponse {
        status: 206,
        content_length: Some(tail.len() as u64),
        body: String::from_utf8_lossy(tail).into_owned(),
    }
}

impl Network for FakeNetwork {
    fn fetch_config_specs(
        &self,
        since_time: u64,
    ) -> impl Future<Output = Result<String, NetworkError>> + Send {
        let reply = self.with_inner(|inner| {
            inner.config_requests.push(since_time);
            inner.config_specs.next("download_config_specs")
        });
        ready(reply)
    }

    fn fetch_id_list_metadata(&self) -> impl Future<Output = Result<String, NetworkError>> + Send {
        let reply = self.with_inner(|inner| {
            inner.metadata_requests += 1;
            inner.id_list_metadata.next("get_id_lists")
        });
        ready(reply)
    }

    fn fetch_id_list_range(
        &self,
        url: &str,
        start: u64,
    ) -> impl Future<Output = Result<RangeResponse, NetworkError>> + Send {
        ready(self.range_reply(url, start))
    }
}
