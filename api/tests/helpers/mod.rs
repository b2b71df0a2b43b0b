pub mod app;

pub use app::{bearer, body_json, make_test_app, request};
