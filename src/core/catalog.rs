use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::model::{Article, ArticleId, Author, AuthorId, Magazine, MagazineId};
use crate::utils::error::{DomainError, Result};
use crate::utils::validation::{validate_length_between, validate_non_blank};

/// Owns every author, magazine, and article and wires the graph between them.
///
/// The article vector doubles as the registry of all articles in creation
/// order. Handles are indices into these vectors; entities are never removed,
/// so a handle issued by a catalog stays valid for that catalog's lifetime.
/// Handles from a different catalog are meaningless here and either fail to
/// resolve or resolve to an unrelated entity.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogSnapshot")]
pub struct Catalog {
    authors: Vec<Author>,
    magazines: Vec<Magazine>,
    articles: Vec<Article>,
}

/// Shape accepted from serde. A snapshot is promoted to a [`Catalog`] only
/// after every invariant the wire format could have broken is re-checked.
#[derive(Debug, Deserialize)]
struct CatalogSnapshot {
    authors: Vec<Author>,
    magazines: Vec<Magazine>,
    articles: Vec<Article>,
}

impl TryFrom<CatalogSnapshot> for Catalog {
    type Error = DomainError;

    fn try_from(snapshot: CatalogSnapshot) -> Result<Self> {
        let catalog = Catalog {
            authors: snapshot.authors,
            magazines: snapshot.magazines,
            articles: snapshot.articles,
        };
        catalog.check_integrity()?;
        Ok(catalog)
    }
}

fn snapshot_error(reason: String) -> DomainError {
    DomainError::Validation {
        field: "catalog".to_string(),
        value: "snapshot".to_string(),
        reason,
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author(&mut self, name: &str) -> Result<AuthorId> {
        let author = Author::new(name)?;
        let id = AuthorId(self.authors.len());
        tracing::debug!("Registered author {:?}: {:?}", id, author.name());
        self.authors.push(author);
        Ok(id)
    }

    pub fn add_magazine(&mut self, name: &str, category: &str) -> Result<MagazineId> {
        let magazine = Magazine::new(name, category)?;
        let id = MagazineId(self.magazines.len());
        tracing::debug!(
            "Registered magazine {:?}: {:?} ({:?})",
            id,
            magazine.name(),
            magazine.category()
        );
        self.magazines.push(magazine);
        Ok(id)
    }

    /// Creates an article and links it into the graph.
    ///
    /// Both handles and the title are validated before anything is touched,
    /// so a rejected article leaves no trace. On success the article is
    /// appended to the author's list, the magazine's list, and the registry,
    /// in that order.
    pub fn add_article(
        &mut self,
        author: AuthorId,
        magazine: MagazineId,
        title: &str,
    ) -> Result<ArticleId> {
        self.resolve_author(author)?;
        self.resolve_magazine(magazine)?;
        let article = match Article::new(author, magazine, title) {
            Ok(article) => article,
            Err(err) => {
                tracing::warn!("Rejected article {:?}: {}", title, err);
                return Err(err);
            }
        };

        let id = ArticleId(self.articles.len());
        self.authors[author.0].attach_article(id);
        self.magazines[magazine.0].attach_article(id);
        self.articles.push(article);
        tracing::debug!(
            "Article {:?} ({:?}) wired to {:?} and {:?}",
            id,
            title,
            author,
            magazine
        );
        Ok(id)
    }

    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id.0)
    }

    pub fn magazine(&self, id: MagazineId) -> Option<&Magazine> {
        self.magazines.get(id.0)
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(id.0)
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn magazines(&self) -> &[Magazine] {
        &self.magazines
    }

    /// The registry: every article ever created, in creation order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    /// Articles written by the author, in creation order, duplicates kept.
    pub fn author_articles(&self, id: AuthorId) -> Result<&[ArticleId]> {
        self.resolve_author(id).map(Author::articles)
    }

    /// Distinct magazines the author has written for, first-seen order.
    pub fn author_magazines(&self, id: AuthorId) -> Result<Vec<MagazineId>> {
        let author = self.resolve_author(id)?;
        let mut seen = HashSet::new();
        Ok(author
            .articles()
            .iter()
            .map(|article| self.articles[article.0].magazine())
            .filter(|magazine| seen.insert(*magazine))
            .collect())
    }

    /// Distinct categories across the author's magazines, or `None` when the
    /// author has no articles yet.
    pub fn topic_areas(&self, id: AuthorId) -> Result<Option<Vec<String>>> {
        if self.resolve_author(id)?.articles().is_empty() {
            return Ok(None);
        }
        let mut seen = HashSet::new();
        let areas = self
            .author_magazines(id)?
            .into_iter()
            .map(|magazine| self.magazines[magazine.0].category().to_string())
            .filter(|category| seen.insert(category.clone()))
            .collect();
        Ok(Some(areas))
    }

    /// Articles published by the magazine, in creation order.
    pub fn magazine_articles(&self, id: MagazineId) -> Result<&[ArticleId]> {
        self.resolve_magazine(id).map(Magazine::articles)
    }

    /// Distinct authors who have written for the magazine, first-seen order.
    pub fn contributors(&self, id: MagazineId) -> Result<Vec<AuthorId>> {
        let magazine = self.resolve_magazine(id)?;
        let mut seen = HashSet::new();
        Ok(magazine
            .articles()
            .iter()
            .map(|article| self.articles[article.0].author())
            .filter(|author| seen.insert(*author))
            .collect())
    }

    /// One title per article in publication order, or `None` when the
    /// magazine has no articles. Duplicate titles are preserved.
    pub fn article_titles(&self, id: MagazineId) -> Result<Option<Vec<String>>> {
        let magazine = self.resolve_magazine(id)?;
        if magazine.articles().is_empty() {
            return Ok(None);
        }
        Ok(Some(
            magazine
                .articles()
                .iter()
                .map(|article| self.articles[article.0].title().to_string())
                .collect(),
        ))
    }

    /// Authors with strictly more than two articles in this magazine, or
    /// `None` when the magazine is empty or nobody clears that bar. Counting
    /// looks at this magazine's articles only.
    pub fn contributing_authors(&self, id: MagazineId) -> Result<Option<Vec<AuthorId>>> {
        let magazine = self.resolve_magazine(id)?;
        if magazine.articles().is_empty() {
            return Ok(None);
        }
        let mut counts: HashMap<AuthorId, usize> = HashMap::new();
        for article in magazine.articles() {
            *counts.entry(self.articles[article.0].author()).or_insert(0) += 1;
        }
        let frequent: Vec<AuthorId> = self
            .contributors(id)?
            .into_iter()
            .filter(|author| counts[author] > 2)
            .collect();
        Ok(if frequent.is_empty() {
            None
        } else {
            Some(frequent)
        })
    }

    /// Always fails: author names are fixed at construction.
    pub fn rename_author(&mut self, id: AuthorId, name: &str) -> Result<()> {
        self.resolve_author(id)?;
        self.authors[id.0].set_name(name)
    }

    pub fn rename_magazine(&mut self, id: MagazineId, name: &str) -> Result<()> {
        self.resolve_magazine(id)?;
        self.magazines[id.0].set_name(name)
    }

    pub fn recategorize_magazine(&mut self, id: MagazineId, category: &str) -> Result<()> {
        self.resolve_magazine(id)?;
        self.magazines[id.0].set_category(category)
    }

    /// Always fails: titles are fixed at construction.
    pub fn retitle_article(&mut self, id: ArticleId, title: &str) -> Result<()> {
        self.resolve_article(id)?;
        self.articles[id.0].set_title(title)
    }

    /// Moves an article to a different author, keeping both authors' article
    /// lists consistent with the article's own reference.
    pub fn reassign_article_author(&mut self, id: ArticleId, new_author: AuthorId) -> Result<()> {
        self.resolve_article(id)?;
        self.resolve_author(new_author)?;
        let old_author = self.articles[id.0].author();
        if old_author == new_author {
            return Ok(());
        }
        self.authors[old_author.0].detach_article(id);
        self.authors[new_author.0].attach_article(id);
        self.articles[id.0].set_author(new_author);
        tracing::debug!(
            "Article {:?} moved from {:?} to {:?}",
            id,
            old_author,
            new_author
        );
        Ok(())
    }

    /// Moves an article to a different magazine; same contract as
    /// [`Catalog::reassign_article_author`].
    pub fn reassign_article_magazine(
        &mut self,
        id: ArticleId,
        new_magazine: MagazineId,
    ) -> Result<()> {
        self.resolve_article(id)?;
        self.resolve_magazine(new_magazine)?;
        let old_magazine = self.articles[id.0].magazine();
        if old_magazine == new_magazine {
            return Ok(());
        }
        self.magazines[old_magazine.0].detach_article(id);
        self.magazines[new_magazine.0].attach_article(id);
        self.articles[id.0].set_magazine(new_magazine);
        tracing::debug!(
            "Article {:?} moved from {:?} to {:?}",
            id,
            old_magazine,
            new_magazine
        );
        Ok(())
    }

    /// Re-checks everything a snapshot could have broken: field constraints,
    /// handle bounds, and exactly-once list membership.
    fn check_integrity(&self) -> Result<()> {
        for author in &self.authors {
            validate_non_blank("author.name", author.name())?;
        }
        for magazine in &self.magazines {
            validate_length_between("magazine.name", magazine.name(), 2, 16)?;
            validate_non_blank("magazine.category", magazine.category())?;
        }
        for (index, author) in self.authors.iter().enumerate() {
            for article in author.articles() {
                if self.article(*article).map(Article::author) != Some(AuthorId(index)) {
                    return Err(snapshot_error(format!(
                        "{:?} listed by {:?} is missing or belongs to another author",
                        article,
                        AuthorId(index)
                    )));
                }
            }
        }
        for (index, magazine) in self.magazines.iter().enumerate() {
            for article in magazine.articles() {
                if self.article(*article).map(Article::magazine) != Some(MagazineId(index)) {
                    return Err(snapshot_error(format!(
                        "{:?} listed by {:?} is missing or belongs to another magazine",
                        article,
                        MagazineId(index)
                    )));
                }
            }
        }
        for (index, article) in self.articles.iter().enumerate() {
            validate_length_between("article.title", article.title(), 5, 50)?;
            let id = ArticleId(index);
            let author = self.resolve_author(article.author())?;
            if author.articles().iter().filter(|a| **a == id).count() != 1 {
                return Err(snapshot_error(format!(
                    "{:?} must appear exactly once in the list of {:?}",
                    id,
                    article.author()
                )));
            }
            let magazine = self.resolve_magazine(article.magazine())?;
            if magazine.articles().iter().filter(|a| **a == id).count() != 1 {
                return Err(snapshot_error(format!(
                    "{:?} must appear exactly once in the list of {:?}",
                    id,
                    article.magazine()
                )));
            }
        }
        Ok(())
    }

    fn resolve_author(&self, id: AuthorId) -> Result<&Author> {
        self.authors.get(id.0).ok_or_else(|| DomainError::Validation {
            field: "author".to_string(),
            value: format!("{:?}", id),
            reason: "No such author in this catalog".to_string(),
        })
    }

    fn resolve_magazine(&self, id: MagazineId) -> Result<&Magazine> {
        self.magazines
            .get(id.0)
            .ok_or_else(|| DomainError::Validation {
                field: "magazine".to_string(),
                value: format!("{:?}", id),
                reason: "No such magazine in this catalog".to_string(),
            })
    }

    fn resolve_article(&self, id: ArticleId) -> Result<&Article> {
        self.articles
            .get(id.0)
            .ok_or_else(|| DomainError::Validation {
                field: "article".to_string(),
                value: format!("{:?}", id),
                reason: "No such article in this catalog".to_string(),
            })
    }
}
