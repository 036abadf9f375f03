//! v001: interaction_ledger, append-only.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS interaction_ledger (
    seq                 INTEGER PRIMARY KEY AUTOINCREMENT,
    id                  TEXT NOT NULL UNIQUE,
    job_id              TEXT NOT NULL,
    candidate_id        TEXT NOT NULL,
    recruiter_id        TEXT NOT NULL,
    session_id          TEXT,
    interaction_type    TEXT NOT NULL CHECK (interaction_type IN
                            ('view', 'shortlist', 'application', 'interview', 'hire', 'reject')),
    search_rank         INTEGER CHECK (search_rank IS NULL OR search_rank >= 1),
    semantic_score      REAL,
    skill_overlap_score REAL,
    experience_score    REAL,
    reward              REAL NOT NULL,
    timestamp           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ledger_timestamp ON interaction_ledger(timestamp);
CREATE INDEX IF NOT EXISTS idx_ledger_type ON interaction_ledger(interaction_type);
CREATE INDEX IF NOT EXISTS idx_ledger_job_candidate ON interaction_ledger(job_id, candidate_id);

CREATE TRIGGER IF NOT EXISTS interaction_ledger_no_update
BEFORE UPDATE ON interaction_ledger
BEGIN
    SELECT RAISE(ABORT, 'interaction_ledger is append-only: UPDATE rejected');
END;

CREATE TRIGGER IF NOT EXISTS interaction_ledger_no_delete
BEFORE DELETE ON interaction_ledger
BEGIN
    SELECT RAISE(ABORT, 'interaction_ledger is append-only: DELETE rejected');
END;
";
