/// Head constraint: selects what the query runs against.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadConstraint {
    /// Entity collection the query targets
    ///
    /// # Example
    /// ```text
    /// collection('product')
    /// ```
    Collection(String),
}
