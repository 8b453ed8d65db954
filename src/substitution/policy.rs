use std::collections::HashSet;

/// Gate deciding which variable names may be substituted at all.
pub trait SubstitutionPolicy: Send + Sync {
    fn allows(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SubstitutionPolicy for AllowAll {
    fn allows(&self, _name: &str) -> bool {
        true
    }
}

/// Only names on the list are substituted. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    names: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl SubstitutionPolicy for AllowList {
    fn allows(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
