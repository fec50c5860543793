//! # Settings Endpoint
//!
//! The `/settings` singleton, and any other `GET`/`PUT` document resource.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::ApiClient;
use crate::core::error::Result;
use crate::core::service::Document;

/// A document resource at a fixed path.
pub struct RestDocument<T> {
    api: Arc<ApiClient>,
    path: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestDocument<T> {
    pub fn new(api: Arc<ApiClient>, path: impl Into<String>) -> Self {
        Self {
            api,
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Document<T> for RestDocument<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn path(&self) -> &str {
        &self.path
    }

    async fn get(&self) -> Result<T> {
        self.api.get::<T>(&self.path).await
    }

    async fn put(&self, document: &T) -> Result<T> {
        self.api.send_json(Method::PUT, &self.path, document).await
    }
}
