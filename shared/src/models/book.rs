//! Book Model

use super::author::Author;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Visible condition of a used book
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookRating {
    Superb,
    Excellent,
    Good,
    Fair,
    Poor,
    Damaged,
    #[default]
    Unrated,
}

/// Availability status of a book
///
/// Only order completion moves a book to `Sold`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BookStatus {
    Sold,
    Reserved,
    #[default]
    Available,
    Processing,
}

/// Book entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    /// Identifier carried over from the shop's previous inventory system
    pub legacy_id: Option<String>,
    pub title: String,
    /// Acquisition cost in currency units
    pub cost: f64,
    /// Sticker price in currency units
    pub retail_price: f64,
    pub rating: BookRating,
    pub status: BookStatus,
    pub publication_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create book payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreate {
    pub legacy_id: Option<String>,
    pub title: String,
    pub cost: f64,
    pub retail_price: f64,
    #[serde(default)]
    pub rating: BookRating,
    #[serde(default)]
    pub status: BookStatus,
    pub publication_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    /// Author references (many-to-many)
    #[serde(default)]
    pub author_ids: Vec<i64>,
}

/// Update book payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookUpdate {
    pub legacy_id: Option<String>,
    pub title: Option<String>,
    pub cost: Option<f64>,
    pub retail_price: Option<f64>,
    pub rating: Option<BookRating>,
    pub status: Option<BookStatus>,
    pub publication_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub edition: Option<String>,
    /// When present, replaces the full author set
    pub author_ids: Option<Vec<i64>>,
}

/// Book with resolved authors (for detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub authors: Vec<Author>,
}
