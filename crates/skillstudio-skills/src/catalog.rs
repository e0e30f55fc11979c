//! Cached skill catalog
//!
//! The catalog owns a scanner and a cache cell holding the last [`SkillSnapshot`]. The cell
//! moves Empty → Fresh → Stale (TTL elapsed) → Fresh and is swapped wholesale, so readers
//! holding an `Arc<SkillSnapshot>` never see a half-built snapshot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use skillstudio_config::SkillsSettings;
use tracing::debug;

use crate::models::{RuntimeSkill, SkillLookup, SkillSnapshot};
use crate::scanner::SkillScanner;

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let step = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        *self.now.write() += step;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

#[derive(Debug)]
struct CacheCell {
    snapshot: Arc<SkillSnapshot>,
    expires_at: DateTime<Utc>,
}

/// Skill catalog with a TTL cache over [`SkillScanner`]
pub struct SkillCatalog {
    scanner: SkillScanner,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cell: RwLock<Option<CacheCell>>,
    scans: AtomicUsize,
}

impl std::fmt::Debug for SkillCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillCatalog")
            .field("scanner", &self.scanner)
            .field("ttl", &self.ttl)
            .field("scans", &self.scan_count())
            .finish_non_exhaustive()
    }
}

impl SkillCatalog {
    pub fn new(scanner: SkillScanner, ttl: Duration) -> Self {
        Self::with_clock(scanner, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(scanner: SkillScanner, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            scanner,
            ttl,
            clock,
            cell: RwLock::new(None),
            scans: AtomicUsize::new(0),
        }
    }

    pub fn from_settings(settings: &SkillsSettings) -> Self {
        Self::new(
            SkillScanner::from_settings(settings),
            Duration::from_secs(settings.cache_ttl_secs),
        )
    }

    pub fn scanner(&self) -> &SkillScanner {
        &self.scanner
    }

    /// Number of scans performed so far
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Current snapshot, rescanning when forced, empty or expired
    pub fn snapshot(&self, force: bool) -> Arc<SkillSnapshot> {
        let now = self.clock.now();
        if !force {
            if let Some(cell) = self.cell.read().as_ref() {
                if cell.expires_at > now {
                    debug!("Skill catalog cache hit");
                    return Arc::clone(&cell.snapshot);
                }
            }
        }

        debug!(force, "Skill catalog cache miss, rescanning");
        let snapshot = Arc::new(self.scanner.scan_at(now));
        self.scans.fetch_add(1, Ordering::SeqCst);

        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::days(36_500));
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        *self.cell.write() = Some(CacheCell {
            snapshot: Arc::clone(&snapshot),
            expires_at,
        });
        snapshot
    }

    /// Force a rescan
    pub fn reload(&self) -> Arc<SkillSnapshot> {
        self.snapshot(true)
    }

    /// Drop the cached snapshot; the next read rescans
    pub fn invalidate(&self) {
        *self.cell.write() = None;
    }

    pub fn runtime_skills(&self) -> Vec<RuntimeSkill> {
        self.snapshot(false).skills.clone()
    }

    /// Look a skill up by exact name, returning the sorted list of names either way
    pub fn get_by_name(&self, name: &str) -> SkillLookup {
        let snapshot = self.snapshot(false);
        SkillLookup {
            skill: snapshot.skill(name).cloned(),
            available: snapshot.skill_names(),
        }
    }
}
