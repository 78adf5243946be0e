use crc32fast::Hasher;

/// Generate a project-scoped id seed from the project name using CRC32
pub fn get_project_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"pagecraft://");
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for entities within a document
///
/// Every section, content item, line and image entry carries a stable id
/// minted here. Ids are `{seed}-{n}` where the seed is derived from the
/// project name and `n` is a per-document counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(project_name: &str) -> Self {
        Self {
            seed: get_project_seed(project_name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Get the document seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance the counter past ids already present in loaded data so
    /// fresh ids never collide with persisted ones.
    pub fn skip_past(&mut self, existing_id: &str) {
        if let Some(rest) = existing_id.strip_prefix(&format!("{}-", self.seed)) {
            if let Ok(n) = rest.parse::<u32>() {
                self.count = self.count.max(n);
            }
        }
    }
}
