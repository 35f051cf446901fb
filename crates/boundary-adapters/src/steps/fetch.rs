use std::sync::Arc;

use boundary_core::typed_step;
use serde_json::Value;

use crate::fetcher::Fetcher;

typed_step! {
    pub step Fetch {
        name: "fetch",
        input: String,
        output: Value,
        fields { fetcher: Arc<dyn Fetcher> },
        transform(me, url) {
            Ok(me.fetcher.fetch(&url)?)
        }
    }
}
