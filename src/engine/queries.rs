//! Read-only session queries for [`ViewerEngine`].

use serde::Serialize;

use super::ViewerEngine;
use crate::repr::RenderBackend;
use crate::scene::StructureEntry;

/// Summary of one loaded structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    /// Assigned structure name.
    pub name: String,
    /// Atom count.
    pub atom_count: usize,
    /// Residue count.
    pub residue_count: usize,
    /// Chain count.
    pub chain_count: usize,
    /// Working bond count.
    pub bond_count: usize,
    /// Atom offset into the global index space.
    pub offset: usize,
    /// Whether the structure carries a uniform tint.
    pub tinted: bool,
}

/// Counts and per-structure summaries for the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SessionInfo {
    /// Total atom count across all structures.
    pub atom_count: usize,
    /// Total residue count.
    pub residue_count: usize,
    /// Total chain count.
    pub chain_count: usize,
    /// Total bond count.
    pub bond_count: usize,
    /// Per-structure summaries in insertion order.
    pub structures: Vec<StructureSummary>,
}

impl<B: RenderBackend> ViewerEngine<B> {
    /// Summary of one loaded structure by name.
    pub fn structure_info(
        &self,
        name: &str,
    ) -> Result<StructureSummary, crate::error::EngineError> {
        self.scene
            .entry(name)
            .map(summarize)
            .ok_or_else(|| {
                crate::error::EngineError::UnknownStructure(name.to_owned())
            })
    }

    /// Snapshot session counts and per-structure summaries.
    #[must_use]
    pub fn get_info(&self) -> SessionInfo {
        let structures: Vec<StructureSummary> =
            self.scene.entries().iter().map(summarize).collect();

        SessionInfo {
            atom_count: structures.iter().map(|s| s.atom_count).sum(),
            residue_count: structures.iter().map(|s| s.residue_count).sum(),
            chain_count: structures.iter().map(|s| s.chain_count).sum(),
            bond_count: structures.iter().map(|s| s.bond_count).sum(),
            structures,
        }
    }
}

fn summarize(entry: &StructureEntry) -> StructureSummary {
    StructureSummary {
        name: entry.name().to_owned(),
        atom_count: entry.atom_count(),
        residue_count: entry.model().residues.len(),
        chain_count: entry.model().chains.len(),
        bond_count: entry.bonds().len(),
        offset: entry.offset(),
        tinted: entry.tint().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::test_engine;

    #[test]
    fn info_reports_totals_and_per_structure_summaries() {
        let mut engine = test_engine();
        let _ = engine.add_structure("2 3", "a").unwrap();
        let _ = engine.add_structure("3", "b").unwrap();

        let info = engine.get_info();
        assert_eq!(info.atom_count, 8);
        assert_eq!(info.residue_count, 3);
        assert_eq!(info.chain_count, 2);
        assert_eq!(info.structures.len(), 2);
        assert_eq!(info.structures[0].name, "a");
        assert_eq!(info.structures[1].offset, 5);
        assert!(!info.structures[0].tinted);
        assert!(info.structures[1].tinted);
    }

    #[test]
    fn info_on_an_empty_session_is_all_zero() {
        let engine = test_engine();
        let info = engine.get_info();
        assert_eq!(info, super::SessionInfo::default());
    }

    #[test]
    fn structure_info_reports_unknown_names() {
        let mut engine = test_engine();
        let _ = engine.add_structure("2", "a").unwrap();
        assert_eq!(engine.structure_info("a").unwrap().atom_count, 2);
        assert!(matches!(
            engine.structure_info("zzz"),
            Err(crate::error::EngineError::UnknownStructure(_))
        ));
    }
}
