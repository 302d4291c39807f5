/// Sequential ID generator for scan-scoped and history-scoped identities
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // Prefix shared by every generated ID
    count: u32,   // Sequential counter
}

impl IDGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self::starting_after(seed, 0)
    }

    /// Resume a sequence so the next ID is `count + 1`
    pub fn starting_after(seed: impl Into<String>, count: u32) -> Self {
        Self {
            seed: seed.into(),
            count,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Sequence number carried by an ID from this generator, if any
    pub fn sequence_of(&self, id: &str) -> Option<u32> {
        id.strip_prefix(self.seed.as_str())?
            .strip_prefix('-')?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new("version");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert_eq!(id1, "version-1");
        assert_eq!(id2, "version-2");
        assert_eq!(id3, "version-3");
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_resume_sequence() {
        let mut gen = IDGenerator::starting_after("section", 7);
        assert_eq!(gen.new_id(), "section-8");
        assert_eq!(gen.sequence_of("section-12"), Some(12));
        assert_eq!(gen.sequence_of("subsection-12"), None);
        assert_eq!(gen.sequence_of("section-x"), None);
    }
}
