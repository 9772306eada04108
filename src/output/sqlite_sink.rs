//! SQLite result sink
//!
//! Pages, their assets, and their outbound links are written to a SQLite
//! database. Re-crawling a URL replaces the earlier row, so one database can
//! collect several runs; each run is recorded in `runs` together with the
//! hash of the configuration it was started with.

use crate::crawler::{Asset, PageResult};
use crate::output::schema::initialize_schema;
use crate::output::{CrawlStats, ResultSink, SinkResult};
use crate::url::extract_domain;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use url::Url;

/// SQLite storage backend for crawl results
pub struct SqliteSink {
    conn: Connection,
    run_id: Option<i64>,
}

impl SqliteSink {
    /// Opens (or creates) the database file at `path`
    ///
    /// Parent directories are created as needed.
    pub fn open(path: &Path) -> SinkResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn, run_id: None })
    }

    /// Creates an in-memory database
    pub fn open_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn, run_id: None })
    }

    /// Records the start of a run; pages accepted afterwards are tagged with it
    pub fn start_run(&mut self, config_hash: &str) -> SinkResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash) VALUES (?1, ?2)",
            params![now, config_hash],
        )?;
        let run_id = self.conn.last_insert_rowid();
        self.run_id = Some(run_id);
        Ok(run_id)
    }

    pub fn run_id(&self) -> Option<i64> {
        self.run_id
    }

    pub fn count_pages(&self) -> SinkResult<u64> {
        self.count("SELECT COUNT(*) FROM pages")
    }

    pub fn count_assets(&self) -> SinkResult<u64> {
        self.count("SELECT COUNT(*) FROM assets")
    }

    pub fn count_downloaded_assets(&self) -> SinkResult<u64> {
        self.count("SELECT COUNT(*) FROM assets WHERE downloaded = 1")
    }

    pub fn count_links(&self) -> SinkResult<u64> {
        self.count("SELECT COUNT(*) FROM links")
    }

    /// Returns the URLs of all stored pages in insertion order
    pub fn page_urls(&self) -> SinkResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM pages ORDER BY id")?;
        let urls = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(urls)
    }

    fn count(&self, sql: &str) -> SinkResult<u64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[async_trait]
impl ResultSink for SqliteSink {
    async fn record_asset(&mut self, page_url: &Url, asset: &Asset) -> SinkResult<()> {
        let local_path = asset
            .local_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        self.conn.execute(
            "INSERT INTO assets (page_url, url, file_type, content_type, size, local_path, downloaded, error)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(page_url, url) DO UPDATE SET
                file_type = excluded.file_type,
                content_type = excluded.content_type,
                size = excluded.size,
                local_path = excluded.local_path,
                downloaded = excluded.downloaded,
                error = excluded.error",
            params![
                page_url.as_str(),
                asset.url.as_str(),
                asset.file_type,
                asset.content_type,
                asset.size as i64,
                local_path,
                asset.downloaded,
                asset.error,
            ],
        )?;
        Ok(())
    }

    async fn accept_page(&mut self, page: PageResult) -> SinkResult<()> {
        let metadata = serde_json::to_string(&page.metadata)?;
        let features = serde_json::to_string(&page.classification.features)?;
        let domain = extract_domain(&page.url).unwrap_or_default();
        let run_id = self.run_id;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO pages (url, final_url, domain, depth, title, content, html, metadata,
                                doc_type, confidence, features, crawled_at, run_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(url) DO UPDATE SET
                final_url = excluded.final_url,
                domain = excluded.domain,
                depth = excluded.depth,
                title = excluded.title,
                content = excluded.content,
                html = excluded.html,
                metadata = excluded.metadata,
                doc_type = excluded.doc_type,
                confidence = excluded.confidence,
                features = excluded.features,
                crawled_at = excluded.crawled_at,
                run_id = excluded.run_id",
            params![
                page.url.as_str(),
                page.final_url.as_str(),
                domain,
                page.depth,
                page.title,
                page.text,
                page.html,
                metadata,
                page.classification.kind.as_str(),
                page.classification.confidence,
                features,
                page.crawled_at.to_rfc3339(),
                run_id,
            ],
        )?;

        let page_id: i64 = tx.query_row(
            "SELECT id FROM pages WHERE url = ?1",
            params![page.url.as_str()],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM links WHERE from_page_id = ?1", params![page_id])?;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO links (from_page_id, to_url) VALUES (?1, ?2)")?;
            for link in &page.links {
                stmt.execute(params![page_id, link.as_str()])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Stored page {} (id {})", page.url, page_id);
        Ok(())
    }

    async fn finish(&mut self, stats: &CrawlStats) -> SinkResult<()> {
        if let Some(run_id) = self.run_id {
            let stats = serde_json::to_string(stats)?;
            self.conn.execute(
                "UPDATE runs SET finished_at = ?1, stats = ?2 WHERE id = ?3",
                params![Utc::now().to_rfc3339(), stats, run_id],
            )?;
        }
        Ok(())
    }
}
