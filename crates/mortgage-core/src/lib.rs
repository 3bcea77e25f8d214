//! Core library for mortgage statement extraction.
//!
//! This crate provides:
//! - A typed model of the document-intelligence service response
//! - Per-field extraction heuristics (loan amount, balance, APR, term, address, dates)
//! - Record assembly into a normalized `MortgageRecord`
//! - Plain-text rendering and simple loan analysis
//! - An HTTP client for the document service (feature `client`)

pub mod analysis;
pub mod error;
pub mod models;
pub mod render;
pub mod statement;

#[cfg(feature = "client")]
pub mod client;

pub use analysis::{LoanAnalysis, RateAssessment, analyze};
pub use error::{AcquisitionError, MortgageError, Result};
pub use models::config::{Credentials, MortgageConfig};
pub use models::record::{DateKind, DateSet, FieldSource, MortgageRecord, ParsedFields};
pub use models::response::{CustomField, DocumentResponse, LineItem, Party};
pub use render::{format_currency, render};
pub use statement::{RecordAssembler, normalize};

#[cfg(feature = "client")]
pub use client::DocumentServiceClient;
