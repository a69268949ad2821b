pub mod error;
pub mod url_router;
pub mod url_template;
