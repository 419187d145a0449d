//! Taxonomy API client methods

use super::{AuthenticatedClient, ClientError, read_json, read_message};
use crate::types::{ApiMessage, DeleteTaxonomyRequest, NewTaxonomy, Taxonomy, TaxonomyDocument};
use reqwest::Method;
use std::collections::BTreeMap;

impl AuthenticatedClient {
    /// Create an empty taxonomy for a domain
    pub async fn add_taxonomy(
        &self,
        domain: &str,
        description: &str,
    ) -> Result<ApiMessage, ClientError> {
        let request = self.request(Method::POST, "/taxonomie/add").json(&NewTaxonomy {
            domain: domain.to_string(),
            description: description.to_string(),
        });
        read_message(request.send().await?).await
    }

    /// Fetch one taxonomy, including its category tree
    pub async fn get_taxonomy(&self, id: i64) -> Result<Taxonomy, ClientError> {
        let request = self
            .request(Method::GET, "/taxonomie/get")
            .query(&[("taxonomie_id", id)]);
        read_json(request.send().await?).await
    }

    /// List the caller's taxonomies keyed by id; `data` is omitted server-side
    pub async fn list_taxonomies(&self) -> Result<BTreeMap<String, Taxonomy>, ClientError> {
        let request = self.request(Method::GET, "/taxonomie/get");
        read_json(request.send().await?).await
    }

    /// Delete a taxonomy; the server re-checks the account password
    pub async fn delete_taxonomy(&self, id: i64, password: &str) -> Result<ApiMessage, ClientError> {
        let request = self
            .request(Method::DELETE, "/taxonomie/delete")
            .json(&DeleteTaxonomyRequest {
                id,
                password: password.to_string(),
            });
        read_message(request.send().await?).await
    }

    /// Replace the stored category tree
    pub async fn save_taxonomy(
        &self,
        document: &TaxonomyDocument,
    ) -> Result<ApiMessage, ClientError> {
        let request = self.request(Method::PUT, "/taxonomie/save").json(document);
        read_message(request.send().await?).await
    }

    /// Ask the server to fill in missing categories and return the result
    pub async fn generate_taxonomy(
        &self,
        document: &TaxonomyDocument,
    ) -> Result<TaxonomyDocument, ClientError> {
        let request = self
            .request(Method::POST, "/taxonomie/generate")
            .json(document);
        read_json(request.send().await?).await
    }
}
