/// Options that control how catalog sources read collections.
#[derive(Debug, Clone, Default)]
pub struct IntrospectOptions {
    /// Keep collections flagged as `system` by the store.
    pub include_system_collections: bool,
    /// Keep the store's built-in `id` field.
    pub include_id_field: bool,
}
