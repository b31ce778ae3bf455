use serde::{Deserialize, Serialize};

use crate::utils::error::{DomainError, Result};
use crate::utils::validation::{validate_length_between, validate_non_blank};

/// Handle to an [`Author`] owned by a [`crate::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub(crate) usize);

/// Handle to a [`Magazine`] owned by a [`crate::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagazineId(pub(crate) usize);

/// Handle to an [`Article`] owned by a [`crate::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(pub(crate) usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    name: String,
    articles: Vec<ArticleId>,
}

impl Author {
    pub(crate) fn new(name: &str) -> Result<Self> {
        validate_non_blank("author.name", name)?;
        Ok(Self {
            name: name.to_string(),
            articles: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author names are single-shot; the name is fixed at construction.
    pub(crate) fn set_name(&mut self, _value: &str) -> Result<()> {
        Err(DomainError::ImmutableField {
            field: "author.name",
        })
    }

    /// Articles written by this author, in creation order.
    pub fn articles(&self) -> &[ArticleId] {
        &self.articles
    }

    pub(crate) fn attach_article(&mut self, id: ArticleId) {
        self.articles.push(id);
    }

    pub(crate) fn detach_article(&mut self, id: ArticleId) {
        self.articles.retain(|article| *article != id);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Magazine {
    name: String,
    category: String,
    articles: Vec<ArticleId>,
}

impl Magazine {
    pub(crate) fn new(name: &str, category: &str) -> Result<Self> {
        validate_length_between("magazine.name", name, 2, 16)?;
        validate_non_blank("magazine.category", category)?;
        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            articles: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Magazine names stay mutable, re-validated on every assignment.
    pub(crate) fn set_name(&mut self, value: &str) -> Result<()> {
        validate_length_between("magazine.name", value, 2, 16)?;
        self.name = value.to_string();
        Ok(())
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub(crate) fn set_category(&mut self, value: &str) -> Result<()> {
        validate_non_blank("magazine.category", value)?;
        self.category = value.to_string();
        Ok(())
    }

    /// Articles published in this magazine, in creation order.
    pub fn articles(&self) -> &[ArticleId] {
        &self.articles
    }

    pub(crate) fn attach_article(&mut self, id: ArticleId) {
        self.articles.push(id);
    }

    pub(crate) fn detach_article(&mut self, id: ArticleId) {
        self.articles.retain(|article| *article != id);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    author: AuthorId,
    magazine: MagazineId,
    title: String,
}

impl Article {
    pub(crate) fn new(author: AuthorId, magazine: MagazineId, title: &str) -> Result<Self> {
        validate_length_between("article.title", title, 5, 50)?;
        Ok(Self {
            author,
            magazine,
            title: title.to_string(),
        })
    }

    pub fn author(&self) -> AuthorId {
        self.author
    }

    pub fn magazine(&self) -> MagazineId {
        self.magazine
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Titles are single-shot; the title is fixed at construction.
    pub(crate) fn set_title(&mut self, _value: &str) -> Result<()> {
        Err(DomainError::ImmutableField {
            field: "article.title",
        })
    }

    // Reassignment keeps the old/new owners' article lists in sync; only the
    // catalog may call these.
    pub(crate) fn set_author(&mut self, author: AuthorId) {
        self.author = author;
    }

    pub(crate) fn set_magazine(&mut self, magazine: MagazineId) {
        self.magazine = magazine;
    }
}
