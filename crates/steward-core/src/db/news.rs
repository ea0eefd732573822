//! News sentiment cache operations (append-only)

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewNewsArticle, NewsArticle};

impl Database {
    /// Append a news article with its sentiment analysis
    pub fn insert_news(&self, article: &NewNewsArticle) -> Result<NewsArticle> {
        let keywords_json = serde_json::to_string(&article.keywords)?;
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO news (title, content, source, sentiment_score, keywords, summary)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                article.title,
                article.content,
                article.source,
                article.sentiment_score,
                keywords_json,
                article.summary,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let created = conn.query_row(
            "SELECT id, title, content, source, sentiment_score, keywords, summary, created_at
             FROM news WHERE id = ?",
            params![id],
            Self::row_to_news,
        )?;
        Ok(created)
    }

    /// Most recent articles
    pub fn recent_news(&self, limit: i64) -> Result<Vec<NewsArticle>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, content, source, sentiment_score, keywords, summary, created_at
             FROM news ORDER BY created_at DESC, id DESC LIMIT ?",
        )?;

        let articles = stmt
            .query_map(params![limit], Self::row_to_news)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    /// Articles with a sentiment score in [min, max], newest first
    pub fn news_by_sentiment(&self, min_score: f64, max_score: f64) -> Result<Vec<NewsArticle>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, content, source, sentiment_score, keywords, summary, created_at
             FROM news WHERE sentiment_score >= ? AND sentiment_score <= ?
             ORDER BY created_at DESC, id DESC",
        )?;

        let articles = stmt
            .query_map(params![min_score, max_score], Self::row_to_news)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn row_to_news(row: &rusqlite::Row) -> rusqlite::Result<NewsArticle> {
        let keywords_json: String = row.get(5)?;
        let created_at_str: String = row.get(7)?;
        Ok(NewsArticle {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            source: row.get(3)?,
            sentiment_score: row.get(4)?,
            keywords: serde_json::from_str(&keywords_json).unwrap_or_default(),
            summary: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
