//! # blackbox-rest
//!
//! Authenticated HTTP client for the blackbox REST API.
//!
//! Every call goes through [`RestClient::request`], which attaches the
//! `authorization` header, encodes extra data as a query string for `GET`
//! and as a JSON body otherwise, and turns non-2xx responses into
//! [`RestError::RequestFailed`].

mod client;
mod endpoints;
mod error;

pub use client::{RestClient, NO_DATA};
pub use endpoints::{MessageQuery, SendMessage};
pub use error::{RestError, RestResult};

pub use reqwest::Method;
