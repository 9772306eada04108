//! Database schema for the SQLite result sink

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track crawl runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    stats TEXT
);

-- Accepted pages
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    final_url TEXT NOT NULL,
    domain TEXT NOT NULL,
    depth INTEGER NOT NULL,
    title TEXT,
    content TEXT NOT NULL,
    html TEXT,
    metadata TEXT NOT NULL,
    doc_type TEXT NOT NULL,
    confidence REAL NOT NULL,
    features TEXT NOT NULL,
    crawled_at TEXT NOT NULL,
    run_id INTEGER REFERENCES runs(id)
);

CREATE INDEX IF NOT EXISTS idx_pages_domain ON pages(domain);
CREATE INDEX IF NOT EXISTS idx_pages_doc_type ON pages(doc_type);

-- Assets referenced by accepted pages
CREATE TABLE IF NOT EXISTS assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_url TEXT NOT NULL,
    url TEXT NOT NULL,
    file_type TEXT NOT NULL,
    content_type TEXT NOT NULL,
    size INTEGER NOT NULL,
    local_path TEXT,
    downloaded INTEGER NOT NULL,
    error TEXT,
    UNIQUE(page_url, url)
);

CREATE INDEX IF NOT EXISTS idx_assets_page ON assets(page_url);

-- Outbound links of accepted pages
CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_page_id INTEGER NOT NULL REFERENCES pages(id),
    to_url TEXT NOT NULL,
    UNIQUE(from_page_id, to_url)
);

CREATE INDEX IF NOT EXISTS idx_links_from ON links(from_page_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
