//! Endpoint methods on [`crate::GalleryClient`], one per backend route.
//!
//! Every method issues exactly one request and returns the response body
//! unmodified. Identifiers are interpolated into the path as given.

mod images;
mod keys;
mod session;
mod users;
