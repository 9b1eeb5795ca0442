//! Sections: runs of blocks separated by empty blocks

/// Start indices of the sections of a block list, ascending, always
/// beginning with 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBoundaries(Vec<usize>);

impl SectionBoundaries {
    /// Compute boundaries from per-block emptiness flags.
    ///
    /// Every non-empty block that follows one or more empty blocks starts a
    /// new section. Trailing empty blocks start nothing.
    #[must_use]
    pub fn from_empty_flags(empty: &[bool]) -> Self {
        let mut boundaries = vec![0];
        let mut after_empty = false;
        for (index, &is_empty) in empty.iter().enumerate() {
            if !is_empty && after_empty && boundaries.last() != Some(&index) {
                boundaries.push(index);
            }
            after_empty = is_empty;
        }
        Self(boundaries)
    }

    /// Start of the section containing `index`: the greatest boundary not
    /// above it
    #[must_use]
    pub fn section_start(&self, index: usize) -> usize {
        let end = self.0.partition_point(|&boundary| boundary <= index);
        self.0[..end].last().copied().unwrap_or(0)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of sections
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
