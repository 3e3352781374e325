//! Notion content-store client
//!
//! Talks to the Notion REST API and maps database pages onto the site's
//! content records. Pages that fail to map are logged and skipped so a
//! single malformed CMS row never takes a listing down.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::ContentStoreConfig;
use crate::models::{Category, ImageSet, LocalizedText, Product, Project};
use crate::services::content::ContentStore;
use crate::utils::{ApiError, ApiResult};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const QUERY_PAGE_SIZE: u32 = 100;

pub struct NotionClient {
    http_client: Client,
    api_base: String,
    token: String,
    products_db: String,
    projects_db: String,
}

impl NotionClient {
    pub fn new(config: &ContentStoreConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_base: NOTION_API_BASE.to_string(),
            token: config.notion_token.clone(),
            products_db: config.products_database_id.clone(),
            projects_db: config.projects_database_id.clone(),
        }
    }

    #[cfg(test)]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Query a database, following `next_cursor` until the result set is
    /// complete.
    async fn query_database(
        &self,
        database_id: &str,
        filter: Option<Value>,
    ) -> ApiResult<Vec<Value>> {
        let url = format!("{}/databases/{}/query", self.api_base, database_id);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": QUERY_PAGE_SIZE });
            if let Some(filter) = &filter {
                body["filter"] = filter.clone();
            }
            if let Some(cursor) = &cursor {
                body["start_cursor"] = Value::String(cursor.clone());
            }

            let response = self
                .http_client
                .post(&url)
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!("Content store request failed: {}", e);
                    ApiError::content_store_failed(e.to_string())
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                tracing::error!("Content store query failed with {}: {}", status, error_text);
                return Err(ApiError::content_store_failed(format!(
                    "status {}: {}",
                    status, error_text
                )));
            }

            let payload: Value = response.json().await.map_err(|e| {
                ApiError::ContentStoreMalformed { message: e.to_string() }
            })?;

            if let Some(results) = payload["results"].as_array() {
                pages.extend(results.iter().cloned());
            }

            match payload["next_cursor"].as_str() {
                Some(next) if payload["has_more"].as_bool().unwrap_or(false) => {
                    cursor = Some(next.to_string());
                },
                _ => break,
            }
        }

        Ok(pages)
    }

    async fn query_products(&self, filter: Option<Value>) -> ApiResult<Vec<Product>> {
        let pages = self.query_database(&self.products_db, filter).await?;
        let mut products = Vec::with_capacity(pages.len());
        for page in &pages {
            match map_product(page) {
                Some(product) => products.push(product),
                None => {
                    tracing::warn!(
                        "Skipping product page {} with incomplete properties",
                        page["id"].as_str().unwrap_or("<no id>")
                    );
                },
            }
        }
        Ok(products)
    }

    async fn query_projects(&self, filter: Option<Value>) -> ApiResult<Vec<Project>> {
        let pages = self.query_database(&self.projects_db, filter).await?;
        let mut projects = Vec::with_capacity(pages.len());
        for page in &pages {
            match map_project(page) {
                Some(project) => projects.push(project),
                None => {
                    tracing::warn!(
                        "Skipping project page {} with incomplete properties",
                        page["id"].as_str().unwrap_or("<no id>")
                    );
                },
            }
        }
        Ok(projects)
    }
}

#[async_trait]
impl ContentStore for NotionClient {
    async fn products(&self) -> ApiResult<Vec<Product>> {
        tracing::debug!("Fetching full product catalog");
        self.query_products(None).await
    }

    async fn product_by_slug(&self, slug: &str) -> ApiResult<Option<Product>> {
        tracing::debug!("Fetching product slug={}", slug);
        let filter = json!({ "property": "Slug", "rich_text": { "equals": slug } });
        let mut products = self.query_products(Some(filter)).await?;
        Ok(if products.is_empty() { None } else { Some(products.remove(0)) })
    }

    async fn products_by_category(&self, category: Category) -> ApiResult<Vec<Product>> {
        tracing::debug!("Fetching products category={}", category);
        let filter =
            json!({ "property": "Categorie", "select": { "equals": category.as_str() } });
        self.query_products(Some(filter)).await
    }

    async fn featured_products(&self) -> ApiResult<Vec<Product>> {
        tracing::debug!("Fetching featured products");
        let filter = json!({ "property": "Vedette", "checkbox": { "equals": true } });
        self.query_products(Some(filter)).await
    }

    async fn similar_products(
        &self,
        slug: &str,
        category: Category,
        limit: usize,
    ) -> ApiResult<Vec<Product>> {
        let mut products = self.products_by_category(category).await?;
        products.retain(|product| product.slug != slug);
        products.truncate(limit);
        Ok(products)
    }

    async fn projects(&self) -> ApiResult<Vec<Project>> {
        tracing::debug!("Fetching published projects");
        let filter = json!({ "property": "Publie", "checkbox": { "equals": true } });
        let mut projects = self.query_projects(Some(filter)).await?;
        // Newest work first on the projects page.
        projects.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(projects)
    }

    async fn project_by_slug(&self, slug: &str) -> ApiResult<Option<Project>> {
        tracing::debug!("Fetching project slug={}", slug);
        let filter = json!({
            "and": [
                { "property": "Slug", "rich_text": { "equals": slug } },
                { "property": "Publie", "checkbox": { "equals": true } }
            ]
        });
        let mut projects = self.query_projects(Some(filter)).await?;
        Ok(if projects.is_empty() { None } else { Some(projects.remove(0)) })
    }
}

// ============================================================
// Page property mapping
// ============================================================

fn property<'a>(page: &'a Value, name: &str) -> Option<&'a Value> {
    page.get("properties")?.get(name)
}

/// Concatenated plain text of a `title` property.
fn title_text(page: &Value, name: &str) -> Option<String> {
    plain_text(property(page, name)?.get("title")?)
}

/// Concatenated plain text of a `rich_text` property.
fn rich_text(page: &Value, name: &str) -> Option<String> {
    plain_text(property(page, name)?.get("rich_text")?)
}

fn plain_text(fragments: &Value) -> Option<String> {
    let text: String = fragments
        .as_array()?
        .iter()
        .filter_map(|fragment| fragment["plain_text"].as_str())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

fn select_value(page: &Value, name: &str) -> Option<String> {
    property(page, name)?
        .get("select")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

fn multi_select(page: &Value, name: &str) -> Vec<String> {
    property(page, name)
        .and_then(|prop| prop.get("multi_select")?.as_array())
        .map(|options| {
            options
                .iter()
                .filter_map(|option| option["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn number(page: &Value, name: &str) -> Option<f64> {
    property(page, name)?.get("number")?.as_f64()
}

fn checkbox(page: &Value, name: &str) -> bool {
    property(page, name)
        .and_then(|prop| prop.get("checkbox")?.as_bool())
        .unwrap_or(false)
}

/// URLs of a `files` property, both uploaded and external entries.
fn file_urls(page: &Value, name: &str) -> Vec<String> {
    property(page, name)
        .and_then(|prop| prop.get("files")?.as_array())
        .map(|files| {
            files
                .iter()
                .filter_map(|file| {
                    file.pointer("/file/url")
                        .or_else(|| file.pointer("/external/url"))?
                        .as_str()
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn last_edited(page: &Value) -> DateTime<Utc> {
    page["last_edited_time"]
        .as_str()
        .and_then(|time| time.parse().ok())
        .unwrap_or_default()
}

/// Map one product page. `None` when a required property is missing or
/// unreadable; the caller logs and skips.
fn map_product(page: &Value) -> Option<Product> {
    let id = page["id"].as_str()?.to_string();
    let slug = rich_text(page, "Slug")?;
    let category = select_value(page, "Categorie")?.parse().ok()?;

    Some(Product {
        id,
        slug,
        name: LocalizedText::new(
            title_text(page, "Nom")?,
            rich_text(page, "Name").unwrap_or_default(),
        ),
        description: LocalizedText::new(
            rich_text(page, "Description").unwrap_or_default(),
            rich_text(page, "Description EN").unwrap_or_default(),
        ),
        category,
        price_eur: number(page, "Prix"),
        dimensions: rich_text(page, "Dimensions"),
        materials: multi_select(page, "Matieres"),
        images: file_urls(page, "Images")
            .iter()
            .map(|url| ImageSet::from_original(url))
            .collect(),
        featured: checkbox(page, "Vedette"),
        available: checkbox(page, "Disponible"),
        updated_at: last_edited(page),
    })
}

/// Map one project page, same contract as [`map_product`].
fn map_project(page: &Value) -> Option<Project> {
    let id = page["id"].as_str()?.to_string();
    let slug = rich_text(page, "Slug")?;
    let gallery: Vec<ImageSet> = file_urls(page, "Galerie")
        .iter()
        .map(|url| ImageSet::from_original(url))
        .collect();

    Some(Project {
        id,
        slug,
        title: LocalizedText::new(
            title_text(page, "Titre")?,
            rich_text(page, "Title").unwrap_or_default(),
        ),
        summary: LocalizedText::new(
            rich_text(page, "Resume").unwrap_or_default(),
            rich_text(page, "Summary").unwrap_or_default(),
        ),
        location: rich_text(page, "Lieu"),
        year: number(page, "Annee").map(|year| year as i32),
        cover: file_urls(page, "Couverture")
            .first()
            .map(|url| ImageSet::from_original(url)),
        gallery,
        product_slugs: multi_select(page, "Objets"),
        published: checkbox(page, "Publie"),
        updated_at: last_edited(page),
    })
}
