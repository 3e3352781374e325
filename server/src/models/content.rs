use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::utils::images::{ImagePreset, optimized_image_url};

/// Catalog sections, mirroring the select options of the content store.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Tables,
    Seating,
    Storage,
    Lighting,
    Objects,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Seating => "seating",
            Self::Storage => "storage",
            Self::Lighting => "lighting",
            Self::Objects => "objects",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tables" => Ok(Self::Tables),
            "seating" => Ok(Self::Seating),
            "storage" => Ok(Self::Storage),
            "lighting" => Ok(Self::Lighting),
            "objects" => Ok(Self::Objects),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// A text value carried in both site languages.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub fr: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self { fr: fr.into(), en: en.into() }
    }
}

/// One source image plus its CDN-derived presentation variants.
///
/// Variants are computed once at mapping time; for non-CDN URLs every
/// variant equals the original.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub original: String,
    pub thumbnail: String,
    pub card: String,
    pub gallery: String,
    pub hero: String,
}

impl ImageSet {
    pub fn from_original(url: &str) -> Self {
        Self {
            original: url.to_string(),
            thumbnail: optimized_image_url(url, ImagePreset::Thumbnail),
            card: optimized_image_url(url, ImagePreset::Card),
            gallery: optimized_image_url(url, ImagePreset::Gallery),
            hero: optimized_image_url(url, ImagePreset::Hero),
        }
    }
}

/// A catalog piece.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Product {
    /// Content-store page id.
    pub id: String,
    pub slug: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: Category,
    /// Studio pieces are priced on request when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_eur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    pub materials: Vec<String>,
    pub images: Vec<ImageSet>,
    pub featured: bool,
    pub available: bool,
    pub updated_at: DateTime<Utc>,
}

/// An interior-design project.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Project {
    /// Content-store page id.
    pub id: String,
    pub slug: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<ImageSet>,
    pub gallery: Vec<ImageSet>,
    /// Slugs of catalog pieces featured in the project.
    pub product_slugs: Vec<String>,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}
