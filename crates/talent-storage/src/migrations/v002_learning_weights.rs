//! v002: learning_weights history with a single active row.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS learning_weights (
    version           INTEGER PRIMARY KEY AUTOINCREMENT,
    semantic_weight   REAL NOT NULL CHECK (semantic_weight >= 0),
    skill_weight      REAL NOT NULL CHECK (skill_weight >= 0),
    experience_weight REAL NOT NULL CHECK (experience_weight >= 0),
    trained_at        TEXT,
    sample_count      INTEGER NOT NULL DEFAULT 0,
    confidence        REAL NOT NULL DEFAULT 0,
    source            TEXT NOT NULL CHECK (source IN ('default', 'learned')),
    fingerprint       TEXT,
    is_active         INTEGER NOT NULL DEFAULT 0,
    published_at      TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_learning_weights_active
    ON learning_weights(is_active) WHERE is_active = 1;
";
