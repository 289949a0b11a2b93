//! Command boundary integration tests: every bookshelf command through `Service::dispatch`.

mod aggregates;
mod library;
mod social;
mod support;

#[cfg(feature = "http")]
mod http;
