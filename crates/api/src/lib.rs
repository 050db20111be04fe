//! HTTP API: server, routing, and request/response mapping for `/fruits`.

pub mod app;
