#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a fresh fetch on the state holder.
    Refresh,
}
