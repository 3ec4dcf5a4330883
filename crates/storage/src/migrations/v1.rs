//! Migration v1: recipes keyed by a unique upstream id

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id INTEGER UNIQUE,
    title TEXT NOT NULL,
    image TEXT,
    instructions TEXT NOT NULL DEFAULT '',
    ingredients TEXT NOT NULL DEFAULT '',
    cached INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_recipes_title_lower ON recipes (LOWER(title));
";
