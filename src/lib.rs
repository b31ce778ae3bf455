pub mod core;
pub mod domain;
pub mod utils;

pub use crate::core::catalog::Catalog;
pub use crate::domain::model::{Article, ArticleId, Author, AuthorId, Magazine, MagazineId};
pub use crate::utils::error::{DomainError, Result};
