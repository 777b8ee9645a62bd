//! Restricting a crawl to specific titles, with implied ancestors.

use crate::ids::{self, IdError};
use std::collections::HashSet;

/// The set of title ids a crawl should visit, plus the episode and season
/// ids they imply. An empty set means "crawl everything". Pages outside the
/// set are pruned before any child request is issued.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    tids: HashSet<String>,
    epids: HashSet<String>,
    sids: HashSet<i32>,
}

impl TargetSet {
    pub fn from_tids<I>(tids: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = Self::default();
        for tid in tids {
            set.epids.insert(ids::epid_of_tid(&tid)?.to_string());
            set.sids.insert(ids::sid_of_tid(&tid)?);
            set.tids.insert(tid);
        }
        Ok(set)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tids.is_empty()
    }

    #[must_use]
    pub fn wants_season(&self, sid: i32) -> bool {
        self.is_empty() || self.sids.contains(&sid)
    }

    #[must_use]
    pub fn wants_episode(&self, epid: &str) -> bool {
        self.is_empty() || self.epids.contains(epid)
    }

    #[must_use]
    pub fn wants_title(&self, tid: &str) -> bool {
        self.is_empty() || self.tids.contains(tid)
    }
}
