use serde::{Deserialize, Serialize};

/// How an empty multi-valued relation on the wire is modeled in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyListPolicy {
    /// Non-required multi-relations are nullable; `[]` decodes to null.
    #[default]
    Null,
    /// Non-required multi-relations stay plain lists; `[]` is kept as is.
    EmptyList,
}

/// Options that control shape derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub empty_list: EmptyListPolicy,
}
