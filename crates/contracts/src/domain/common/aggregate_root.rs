use super::AggregateId;

/// Trait for aggregate roots stored in the hosted database
///
/// Carries both per-row accessors and static metadata used to build REST paths and UI labels.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id: AggregateId;

    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Row id
    fn id(&self) -> Self::Id;

    /// Name shown in lists and detail headers
    fn display_name(&self) -> &str;

    // ============================================================================
    // Aggregate class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a002")
    fn aggregate_index() -> &'static str;

    /// REST table name (e.g. "departments")
    fn collection_name() -> &'static str;

    /// Singular UI name
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;

    /// Full system name (e.g. "a002_departments")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
