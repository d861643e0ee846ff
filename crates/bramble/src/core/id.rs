use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle for a node stored in the [`Core`](crate::Core) arena.
    ///
    /// A handle to a disposed node never resolves to a different node, even after
    /// its slot is reused.
    pub struct NodeId;
}
