use size::Size;
use thousands::Separable;

/// Counters collected while a search runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes built from a parent and an action.
    pub generated: usize,
    /// Nodes whose actions were enumerated.
    pub expanded: usize,
    /// Nodes dropped for holding an explored or already queued state.
    pub duplicates: usize,
    /// Frontier entries that got a cheaper path.
    pub decreased_keys: usize,
    /// The most nodes queued at once.
    pub frontier_high_water: usize,

    /// Approximate memory held when the search stopped.
    pub tree_bytes: usize,
    pub frontier_bytes: usize,
    pub explored_bytes: usize,
}

impl SearchStats {
    pub fn write_stats<W: std::io::Write>(&self, name: &str, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{name} Stats:")?;
        writeln!(
            out,
            "  - Generated nodes: {}",
            self.generated.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Expanded nodes:  {}",
            self.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Duplicates:      {}",
            self.duplicates.separate_with_commas()
        )?;
        if self.decreased_keys > 0 {
            writeln!(
                out,
                "  - Decreased keys:  {}",
                self.decreased_keys.separate_with_commas()
            )?;
        }
        writeln!(
            out,
            "  - |Frontier|*:     {}",
            self.frontier_high_water.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Memory:          {} (tree {}, frontier {}, explored {})",
            Size::from_bytes(self.tree_bytes + self.frontier_bytes + self.explored_bytes),
            Size::from_bytes(self.tree_bytes),
            Size::from_bytes(self.frontier_bytes),
            Size::from_bytes(self.explored_bytes),
        )?;

        Ok(())
    }

    pub fn print_stats(&self, name: &str) -> std::io::Result<()> {
        self.write_stats(name, std::io::stdout().lock())
    }
}
