//! Migration v2: similarity edges owned by a recipe

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS similar_recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    similar_external_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    image TEXT,
    created_at TEXT NOT NULL,
    UNIQUE (recipe_id, similar_external_id)
);

CREATE INDEX IF NOT EXISTS idx_similar_recipes_owner ON similar_recipes (recipe_id);
";
