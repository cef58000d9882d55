use std::fmt;

/// Named collections of the persistent store that can be counted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Collection {
    Users,
    Files,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Files => "files",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
