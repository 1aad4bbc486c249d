//! Helper functions shared by the server and the static generator

mod url;

pub use url::*;
